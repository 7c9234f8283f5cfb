//! 인증된 사용자 신원 (Identity)
//!
//! 토큰 검증이 성공했을 때 요청 컨텍스트에 부착되는 신원 정보입니다.
//! 요청 수명 동안 불변이며, 요청마다 새로 해석됩니다 (캐시 없음).

use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::core::errors::AppError;
use crate::domain::entities::users::Role;

/// 요청 컨텍스트에 부착되는 인증된 신원
///
/// 검증에 성공한 토큰은 항상 비어있지 않은 신원을 만들어내며,
/// 검증에 실패한 토큰은 신원을 부착하지 않습니다. 보호된 라우트에서는
/// 신원의 부재 자체가 거부 신호입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 고유 주체 (username)
    pub username: String,
    pub email: String,
    pub display_name: String,
    /// 토큰 해석 시점에 재계산되는 역할 집합. 항상 1개 이상입니다.
    pub roles: Vec<Role>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|r| self.roles.contains(r))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

/// 핸들러 시그니처에서 인증된 신원을 직접 받기 위한 extractor
///
/// `AuthMiddleware`가 request extensions에 넣어둔 신원을 꺼냅니다.
/// 미들웨어를 거치지 않았거나 인증이 실패한 요청에서는 401을 반환하므로,
/// 이 extractor를 사용하는 핸들러는 항상 유효한 신원을 보장받습니다.
///
/// ```rust,ignore
/// #[post("/send")]
/// async fn send_message(
///     user: AuthenticatedUser,
///     payload: web::Json<ChatMessageRequest>,
/// ) -> Result<HttpResponse, AppError> { /* ... */ }
/// ```
impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();

        ready(user.ok_or_else(|| {
            AppError::AuthenticationError("유효한 인증 토큰이 필요합니다".to_string())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(roles: Vec<Role>) -> AuthenticatedUser {
        AuthenticatedUser {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            display_name: "Alice".to_string(),
            roles,
        }
    }

    #[test]
    fn test_has_role() {
        let user = sample_user(vec![Role::Student]);

        assert!(user.has_role(Role::Student));
        assert!(!user.has_role(Role::Teacher));
        assert!(!user.is_admin());
    }

    #[test]
    fn test_has_any_role() {
        let user = sample_user(vec![Role::Teacher]);

        assert!(user.has_any_role(&[Role::Teacher, Role::Admin]));
        assert!(!user.has_any_role(&[Role::Admin]));
    }

    #[test]
    fn test_admin_role() {
        let user = sample_user(vec![Role::Admin]);

        assert!(user.is_admin());
        assert!(user.has_any_role(&[Role::Teacher, Role::Admin]));
    }
}
