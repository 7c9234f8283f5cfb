//! 채팅 서비스
//!
//! 메시지 로그(MongoDB)가 원본이고, 저장에 성공한 메시지만
//! Redis `chat:messages` 채널로 fan-out됩니다. fan-out 자체는
//! 브로커(Redis)의 책임이며, 발행 실패는 메시지 전송을 실패시키지
//! 않습니다 (로그는 이미 남아있으므로 조회로 복구 가능).

use std::sync::Arc;

use futures_util::Stream;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;

use crate::{
    caching::redis::RedisClient,
    domain::{
        dto::chat::{ChatMessageRequest, ChatMessageResponse},
        entities::chat::ChatMessage,
    },
    domain::models::auth::AuthenticatedUser,
    repositories::chat::ChatMessageRepository,
    repositories::users::UserRepository,
};
use crate::core::errors::AppError;

/// 채팅 메시지 fan-out 채널 이름
pub const CHAT_CHANNEL: &str = "chat:messages";

#[service(name = "chat")]
pub struct ChatService {
    chatmessage_repo: Arc<ChatMessageRepository>,
    user_repo: Arc<UserRepository>,
    redis: Arc<RedisClient>,
}

impl ChatService {
    /// 메시지 전송: 저장 후 발행
    ///
    /// 발신자는 인증 컨텍스트에서 결정됩니다. 수신자 ID가 주어지면
    /// 존재하는 사용자인지 확인합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 발신자/수신자 계정 없음
    /// * `AppError::ValidationError` - 수신자/영상 ID 형식 오류
    pub async fn send_message(
        &self,
        sender: &AuthenticatedUser,
        request: ChatMessageRequest,
    ) -> Result<ChatMessageResponse, AppError> {
        let sender_entity = self.user_repo
            .find_by_username(&sender.username)
            .await?
            .ok_or_else(|| AppError::NotFound("발신자 계정을 찾을 수 없습니다".to_string()))?;

        let sender_id = sender_entity.id
            .ok_or_else(|| AppError::InternalError("발신자 계정에 ID가 없습니다".to_string()))?;

        let receiver_id = match request.receiver_id.as_deref() {
            Some(raw) => {
                let id = ObjectId::parse_str(raw)
                    .map_err(|_| AppError::ValidationError("유효하지 않은 수신자 ID 형식입니다".to_string()))?;

                // 존재하지 않는 수신자에게는 보낼 수 없습니다
                if self.user_repo.find_by_id(raw).await?.is_none() {
                    return Err(AppError::NotFound("수신자를 찾을 수 없습니다".to_string()));
                }

                Some(id)
            }
            None => None,
        };

        let video_id = match request.video_id.as_deref() {
            Some(raw) => Some(
                ObjectId::parse_str(raw)
                    .map_err(|_| AppError::ValidationError("유효하지 않은 영상 ID 형식입니다".to_string()))?
            ),
            None => None,
        };

        let message = ChatMessage::new(
            sender_id,
            sender_entity.display_name,
            receiver_id,
            video_id,
            request.message,
        );

        let saved = self.chatmessage_repo.create(message).await?;
        let response = ChatMessageResponse::from(saved);

        // 저장된 메시지를 그대로 발행 (best-effort)
        match serde_json::to_string(&response) {
            Ok(payload) => {
                if let Err(e) = self.redis.publish(CHAT_CHANNEL, &payload).await {
                    log::warn!("채팅 메시지 발행 실패 - 메시지: {}, 에러: {}", response.id, e);
                }
            }
            Err(e) => {
                log::error!("채팅 메시지 직렬화 실패: {}", e);
            }
        }

        Ok(response)
    }

    /// 호출자와 상대방 간의 대화 조회 (최신순)
    pub async fn get_conversation(
        &self,
        caller: &AuthenticatedUser,
        other_user_id: &str,
        limit: i64,
    ) -> Result<Vec<ChatMessageResponse>, AppError> {
        let caller_entity = self.user_repo
            .find_by_username(&caller.username)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        let caller_id = caller_entity.id
            .ok_or_else(|| AppError::InternalError("사용자 계정에 ID가 없습니다".to_string()))?;

        let other_id = ObjectId::parse_str(other_user_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 사용자 ID 형식입니다".to_string()))?;

        let messages = self.chatmessage_repo
            .find_conversation(&caller_id, &other_id, limit)
            .await?;

        Ok(messages.into_iter().map(ChatMessageResponse::from).collect())
    }

    /// 호출자가 받은 읽지 않은 메시지
    pub async fn get_unread(&self, caller: &AuthenticatedUser) -> Result<Vec<ChatMessageResponse>, AppError> {
        let caller_entity = self.user_repo
            .find_by_username(&caller.username)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        let caller_id = caller_entity.id
            .ok_or_else(|| AppError::InternalError("사용자 계정에 ID가 없습니다".to_string()))?;

        let messages = self.chatmessage_repo.find_unread(&caller_id).await?;

        Ok(messages.into_iter().map(ChatMessageResponse::from).collect())
    }

    /// 메시지를 읽음으로 표시
    ///
    /// 수신자 본인만 표시할 수 있습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 메시지 없음
    /// * `AppError::AuthorizationError` - 수신자가 아닌 사용자의 시도
    pub async fn mark_read(&self, caller: &AuthenticatedUser, message_id: &str) -> Result<(), AppError> {
        let message = self.chatmessage_repo
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| AppError::NotFound("메시지를 찾을 수 없습니다".to_string()))?;

        let caller_entity = self.user_repo
            .find_by_username(&caller.username)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        if message.receiver_id != caller_entity.id {
            return Err(AppError::AuthorizationError(
                "본인이 받은 메시지만 읽음 처리할 수 있습니다".to_string()
            ));
        }

        self.chatmessage_repo.mark_read(message_id).await?;

        Ok(())
    }

    /// 실시간 메시지 스트림 구독
    ///
    /// `chat:messages` 채널을 구독하는 전용 연결을 생성합니다.
    /// 반환된 스트림이 drop되면 (SSE 연결 종료) 구독도 함께 해제됩니다.
    pub async fn subscribe(&self) -> Result<impl Stream<Item = redis::Msg> + use<>, AppError> {
        self.redis
            .subscribe(CHAT_CHANNEL)
            .await
            .map_err(|e| AppError::RedisError(format!("채팅 채널 구독 실패: {}", e)))
    }
}
