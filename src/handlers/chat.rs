//! Chat HTTP Handlers
//!
//! 메시지 전송/조회 REST 엔드포인트와 Redis pub/sub 채널을 구독하는
//! Server-Sent Events 스트림을 제공합니다. 모든 채팅 엔드포인트는
//! 인증이 필요합니다.

use actix_web::{get, post, put, web, HttpResponse};
use futures_util::StreamExt;
use validator::Validate;

use crate::domain::dto::chat::ChatMessageRequest;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::chat::ChatService;
use crate::core::errors::AppError;

/// 대화 조회 기본 개수 제한
const CONVERSATION_LIMIT: i64 = 100;

/// 메시지 전송 핸들러
///
/// 메시지를 저장하고 `chat:messages` 채널로 발행합니다.
/// 발신자는 인증 컨텍스트에서 결정됩니다.
///
/// # Endpoint
/// `POST /api/chat/send`
#[post("/send")]
pub async fn send_message(
    user: AuthenticatedUser,
    payload: web::Json<ChatMessageRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let chat_service = ChatService::instance();
    let message = chat_service.send_message(&user, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(message))
}

/// 대화 조회 핸들러
///
/// 호출자와 지정된 사용자 간의 양방향 메시지를 최신순으로 반환합니다.
///
/// # Endpoint
/// `GET /api/chat/conversation/{user_id}`
#[get("/conversation/{user_id}")]
pub async fn get_conversation(
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let chat_service = ChatService::instance();
    let messages = chat_service
        .get_conversation(&user, &path, CONVERSATION_LIMIT)
        .await?;

    Ok(HttpResponse::Ok().json(messages))
}

/// 읽지 않은 메시지 조회 핸들러
///
/// # Endpoint
/// `GET /api/chat/unread`
#[get("/unread")]
pub async fn get_unread(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let chat_service = ChatService::instance();
    let messages = chat_service.get_unread(&user).await?;

    Ok(HttpResponse::Ok().json(messages))
}

/// 읽음 처리 핸들러
///
/// 수신자 본인만 자신의 메시지를 읽음으로 표시할 수 있습니다.
///
/// # Endpoint
/// `PUT /api/chat/{message_id}/read`
#[put("/{message_id}/read")]
pub async fn mark_read(
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let chat_service = ChatService::instance();
    chat_service.mark_read(&user, &path).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "read": true })))
}

/// 실시간 메시지 스트림 핸들러 (Server-Sent Events)
///
/// `chat:messages` 채널을 구독하고 발행되는 메시지를 `data:` 프레임으로
/// 전달합니다. 클라이언트가 연결을 끊으면 스트림이 drop되면서
/// Redis 구독도 함께 해제됩니다.
///
/// # Endpoint
/// `GET /api/chat/stream`
#[get("/stream")]
pub async fn stream_messages(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let chat_service = ChatService::instance();
    let subscription = chat_service.subscribe().await?;

    log::debug!("채팅 스트림 구독 시작: {}", user.username);

    let sse = subscription.map(|msg| {
        let payload = msg.get_payload::<String>().unwrap_or_default();
        Ok::<_, actix_web::Error>(web::Bytes::from(format!("data: {}\n\n", payload)))
    });

    Ok(HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(sse))
}
