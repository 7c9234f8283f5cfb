//! 인증 관련 요청 DTO

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::users::Role;

/// 로그인 요청
///
/// `POST /api/auth/login`의 본문입니다. 자격 증명 검증은 선택된
/// 인증 전략(로컬 bcrypt 또는 Keycloak 위임)이 담당합니다.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "사용자명을 입력해주세요"))]
    pub username: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 회원가입 요청
///
/// `POST /api/auth/register`의 본문입니다. 역할을 지정하지 않으면
/// 학생(STUDENT)으로 생성됩니다.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 40, message = "사용자명은 3-40자 사이여야 합니다"))]
    pub username: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "이름을 입력해주세요"))]
    pub display_name: String,

    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_rejects_empty_fields() {
        let request = LoginRequest {
            username: "".to_string(),
            password: "teacher123".to_string(),
        };
        assert!(request.validate().is_err());

        let request = LoginRequest {
            username: "teacher".to_string(),
            password: "".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        let request = RegisterRequest {
            username: "teacher".to_string(),
            email: "teacher@example.com".to_string(),
            password: "teacher123".to_string(),
            display_name: "김선생".to_string(),
            role: Some(Role::Teacher),
        };
        assert!(request.validate().is_ok());

        let request = RegisterRequest {
            username: "teacher".to_string(),
            email: "not-an-email".to_string(),
            password: "teacher123".to_string(),
            display_name: "김선생".to_string(),
            role: None,
        };
        assert!(request.validate().is_err());

        let request = RegisterRequest {
            username: "teacher".to_string(),
            email: "teacher@example.com".to_string(),
            password: "short".to_string(),
            display_name: "김선생".to_string(),
            role: None,
        };
        assert!(request.validate().is_err());
    }
}
