//! 채팅 메시지 엔티티
//!
//! MongoDB `chat_messages` 컬렉션이 메시지 로그의 원본(source of truth)이며,
//! 저장 직후 동일한 내용이 Redis `chat:messages` 채널로 발행됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub sender_id: ObjectId,
    pub sender_name: String,
    /// 수신자가 없으면 강의 전체(공개 채널) 메시지입니다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<ObjectId>,
    /// 특정 영상(강의)에 연결된 메시지인 경우
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<ObjectId>,
    pub message: String,
    pub is_read: bool,
    pub sent_at: DateTime,
}

impl ChatMessage {
    pub fn new(
        sender_id: ObjectId,
        sender_name: String,
        receiver_id: Option<ObjectId>,
        video_id: Option<ObjectId>,
        message: String,
    ) -> Self {
        Self {
            id: None,
            sender_id,
            sender_name,
            receiver_id,
            video_id,
            message,
            is_read: false,
            sent_at: DateTime::now(),
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}
