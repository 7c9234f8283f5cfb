//! Admin HTTP Handlers
//!
//! 관리자 대시보드용 엔드포인트입니다. ADMIN 역할 전용 스코프에
//! 등록됩니다.

use actix_web::{get, HttpResponse};

use crate::domain::dto::auth::AccessLogResponse;
use crate::services::users::UserService;
use crate::core::errors::AppError;

/// 목록 조회 기본 개수 제한
const LIST_LIMIT: i64 = 200;

/// 전체 사용자 목록 핸들러
///
/// # Endpoint
/// `GET /api/admin/users` (ADMIN 전용)
#[get("/users")]
pub async fn list_users() -> Result<HttpResponse, AppError> {
    let user_service = UserService::instance();
    let users = user_service.list_users(LIST_LIMIT).await?;

    Ok(HttpResponse::Ok().json(users))
}

/// 최근 로그인 접근 로그 핸들러
///
/// # Endpoint
/// `GET /api/admin/access-logs` (ADMIN 전용)
#[get("/access-logs")]
pub async fn list_access_logs() -> Result<HttpResponse, AppError> {
    let user_service = UserService::instance();
    let logs = user_service.recent_access_logs(LIST_LIMIT).await?;

    let response: Vec<AccessLogResponse> = logs
        .into_iter()
        .map(AccessLogResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(response))
}
