//! 채팅 관련 응답 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::chat::ChatMessage;

/// 채팅 메시지 응답
///
/// REST 조회 응답이자 Redis `chat:messages` 채널로 발행되는
/// wire 포맷이기도 합니다. SSE 구독자는 이 JSON을 그대로 수신합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageResponse {
    pub id: String,
    pub sender_id: String,
    pub sender_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub sent_at: DateTime<Utc>,
}

impl From<ChatMessage> for ChatMessageResponse {
    fn from(msg: ChatMessage) -> Self {
        Self {
            id: msg.id_string().unwrap_or_default(),
            sender_id: msg.sender_id.to_hex(),
            sender_name: msg.sender_name,
            receiver_id: msg.receiver_id.map(|id| id.to_hex()),
            video_id: msg.video_id.map(|id| id.to_hex()),
            message: msg.message,
            is_read: msg.is_read,
            sent_at: msg.sent_at.to_chrono(),
        }
    }
}
