//! 토큰 서비스 (인증 경계의 파사드)
//!
//! 핸들러와 미들웨어가 사용하는 단일 진입점입니다.
//! 실제 발급/검증은 시작 시점에 선택된 토큰 권한 변형
//! ([`TokenAuthorityHandle`])에 위임합니다.

use std::sync::Arc;

use singleton_macro::service;

use crate::config::auth_config::AuthStrategy;
use crate::core::errors::AppError;
use crate::domain::models::auth::AuthenticatedUser;

use super::token_authority::{AuthSession, TokenAuthorityHandle};

/// 토큰 발급/검증 파사드 서비스
///
/// `TokenAuthorityHandle`은 `main.rs`에서 수동 등록되는 인프라 컴포넌트이며,
/// 이 서비스는 싱글톤 매크로를 통해 자동 주입받습니다.
#[service(name = "token")]
pub struct TokenService {
    authority: Arc<TokenAuthorityHandle>,
}

impl TokenService {
    /// 현재 활성화된 인증 전략
    pub fn strategy(&self) -> AuthStrategy {
        self.authority.strategy()
    }

    /// 자격 증명 검증 + 토큰 발급 (로그인)
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 잘못된 자격 증명
    ///   (원인 무관, 단일 결과로 수렴)
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession, AppError> {
        self.authority.login(username, password).await
    }

    /// bearer 토큰 검증 → 신원 해석
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 만료/위조/프로바이더 거부
    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        self.authority.validate(token).await
    }

    /// `Authorization` 헤더 값에서 bearer 토큰 부분을 추출합니다.
    ///
    /// "Bearer {token}" 형식이 아니면 에러를 반환합니다.
    /// 헤더 부재/형식 오류를 요청 중단으로 이어갈지는 호출자
    /// (미들웨어의 인증 모드)가 결정합니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        bearer_token_of(auth_header)
    }
}

/// "Bearer {token}" 형식의 헤더 값에서 토큰 부분 추출
fn bearer_token_of(auth_header: &str) -> Result<&str, AppError> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::AuthenticationError("Bearer 토큰 형식이 아닙니다".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::local_authority::TokenCodec;
    use crate::domain::entities::users::Role;

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token_of("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert_eq!(bearer_token_of("Bearer   spaced  ").unwrap(), "spaced");
    }

    #[test]
    fn test_malformed_authorization_header() {
        assert!(bearer_token_of("bearer abc").is_err());
        assert!(bearer_token_of("Basic dXNlcjpwdw==").is_err());
        assert!(bearer_token_of("Bearer ").is_err());
        assert!(bearer_token_of("abc.def.ghi").is_err());
    }

    #[test]
    fn test_local_codec_round_trip_through_facade_contract() {
        // 파사드가 위임하는 변형의 계약 확인: 발급 → 검증 라운드트립
        let codec = TokenCodec::new("0123456789abcdef0123456789abcdef".to_string(), 1);
        let identity = AuthenticatedUser {
            username: "student1".to_string(),
            email: "student1@example.com".to_string(),
            display_name: "학생1".to_string(),
            roles: vec![Role::Student],
        };

        let (token, _) = codec.issue(&identity).unwrap();
        let resolved = codec.validate(&token).unwrap();

        assert_eq!(resolved.username, "student1");
        assert!(resolved.has_role(Role::Student));
    }
}
