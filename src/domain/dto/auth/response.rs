//! 인증 관련 응답 DTO

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::access::AccessLog;
use crate::domain::entities::users::{Role, User};
use crate::domain::models::auth::AuthenticatedUser;

/// 로그인 성공 응답
///
/// ```json
/// {
///   "access_token": "eyJhbGciOiJIUzI1NiIs...",
///   "token_type": "Bearer",
///   "username": "teacher",
///   "email": "teacher@example.com",
///   "roles": ["TEACHER"]
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub username: String,
    pub email: String,
    pub roles: Vec<Role>,
}

impl LoginResponse {
    pub fn new(identity: &AuthenticatedUser, access_token: String) -> Self {
        Self {
            access_token,
            token_type: "Bearer",
            username: identity.username.clone(),
            email: identity.email.clone(),
            roles: identity.roles.clone(),
        }
    }
}

/// 사용자 프로필 응답
///
/// 비밀번호 해시 등 내부 필드를 제외한 공개 가능한 정보만 담습니다.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at.to_chrono(),
        }
    }
}

/// 접근 로그 응답 (관리자 대시보드용)
#[derive(Debug, Serialize)]
pub struct AccessLogResponse {
    pub user_id: String,
    pub username: String,
    pub access_time: DateTime<Utc>,
    pub ip_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl From<AccessLog> for AccessLogResponse {
    fn from(log: AccessLog) -> Self {
        Self {
            user_id: log.user_id.to_hex(),
            username: log.username,
            access_time: log.access_time.to_chrono(),
            ip_address: log.ip_address,
            user_agent: log.user_agent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_hides_password_hash() {
        let user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "Alice".to_string(),
            "$2b$04$secret-hash".to_string(),
            None,
        );

        let response = UserResponse::from(user);
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("password"));
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"role\":\"STUDENT\""));
    }
}
