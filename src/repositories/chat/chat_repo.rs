//! 채팅 메시지 리포지토리
//!
//! MongoDB `chat_messages` 컬렉션이 메시지 로그의 원본입니다.
//! pub/sub fan-out은 서비스 계층(ChatService)의 책임이며,
//! 이 리포지토리는 영속성만 담당합니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use singleton_macro::repository;

use crate::{
    core::registry::Repository,
    db::Database,
    domain::entities::chat::ChatMessage,
};
use crate::core::errors::AppError;

#[repository(name = "chatmessage", collection = "chat_messages")]
pub struct ChatMessageRepository {
    /// MongoDB 데이터베이스 연결 (자동 주입)
    db: Arc<Database>,
}

impl ChatMessageRepository {
    /// 메시지 저장
    pub async fn create(&self, mut message: ChatMessage) -> Result<ChatMessage, AppError> {
        let result = self.collection::<ChatMessage>()
            .insert_one(&message)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        message.id = result.inserted_id.as_object_id();

        Ok(message)
    }

    /// ID로 메시지 조회
    pub async fn find_by_id(&self, id: &str) -> Result<Option<ChatMessage>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 메시지 ID 형식입니다".to_string()))?;

        self.collection::<ChatMessage>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 두 사용자 간의 대화 조회 (최신순)
    ///
    /// 양방향 메시지를 모두 포함합니다.
    pub async fn find_conversation(
        &self,
        user_a: &ObjectId,
        user_b: &ObjectId,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, AppError> {
        let filter = doc! {
            "$or": [
                { "sender_id": user_a, "receiver_id": user_b },
                { "sender_id": user_b, "receiver_id": user_a },
            ]
        };

        let mut cursor = self.collection::<ChatMessage>()
            .find(filter)
            .sort(doc! { "sent_at": -1 })
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut messages = Vec::new();
        while let Some(message) = cursor.try_next().await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
        {
            messages.push(message);
        }

        Ok(messages)
    }

    /// 수신자의 읽지 않은 메시지 조회
    pub async fn find_unread(&self, receiver_id: &ObjectId) -> Result<Vec<ChatMessage>, AppError> {
        let mut cursor = self.collection::<ChatMessage>()
            .find(doc! { "receiver_id": receiver_id, "is_read": false })
            .sort(doc! { "sent_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut messages = Vec::new();
        while let Some(message) = cursor.try_next().await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
        {
            messages.push(message);
        }

        Ok(messages)
    }

    /// 메시지를 읽음으로 표시
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - 메시지가 존재하여 갱신됨
    /// * `Ok(false)` - 해당 ID의 메시지 없음
    pub async fn mark_read(&self, id: &str) -> Result<bool, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 메시지 ID 형식입니다".to_string()))?;

        let result = self.collection::<ChatMessage>()
            .update_one(
                doc! { "_id": object_id },
                doc! { "$set": { "is_read": true } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.matched_count > 0)
    }

    /// 데이터베이스 인덱스 생성
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<ChatMessage>();

        let conversation_index = IndexModel::builder()
            .keys(doc! { "sender_id": 1, "receiver_id": 1, "sent_at": -1 })
            .options(IndexOptions::builder()
                .name("conversation".to_string())
                .build())
            .build();

        let unread_index = IndexModel::builder()
            .keys(doc! { "receiver_id": 1, "is_read": 1 })
            .options(IndexOptions::builder()
                .name("unread_by_receiver".to_string())
                .build())
            .build();

        collection
            .create_indexes([conversation_index, unread_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
