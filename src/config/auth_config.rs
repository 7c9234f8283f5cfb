//! # Authentication Configuration Module
//!
//! JWT 토큰, Keycloak 연동 등 인증 관련 설정을 관리하는 모듈입니다.
//! Spring Security의 JWT/OIDC 설정과 유사한 역할을 수행합니다.
//!
//! ## 지원하는 인증 전략
//!
//! 1. **로컬 서명 (local)**: HMAC-SHA256 공유 비밀키로 JWT를 직접 서명/검증
//! 2. **위임 (keycloak)**: Keycloak 토큰 엔드포인트/userinfo 엔드포인트에 위임
//!
//! 두 전략은 `AUTH_STRATEGY` 환경 변수로 선택되며, 프로세스 시작 시
//! [`validate_at_startup`]이 선택된 전략의 필수 설정을 검증합니다.
//! 검증 실패는 치명적이며 서버는 리스너를 바인딩하기 전에 종료됩니다.
//!
//! ## 필수 환경 변수
//!
//! ### 로컬 서명 전략
//! ```bash
//! export AUTH_STRATEGY="local"
//! export JWT_SECRET="$(openssl rand -base64 48)"   # 256비트 이상
//! export JWT_EXPIRATION_HOURS="24"
//! ```
//!
//! ### 위임 전략
//! ```bash
//! export AUTH_STRATEGY="keycloak"
//! export KEYCLOAK_SERVER_URL="http://keycloak:8080"
//! export KEYCLOAK_REALM="lecture-platform"
//! export KEYCLOAK_CLIENT_ID="backend-client"
//! export KEYCLOAK_CLIENT_SECRET="backend-secret"
//! export KEYCLOAK_TIMEOUT_SECS="5"
//! ```

use std::env;

use crate::core::errors::AppError;

/// 토큰 발급/검증 전략
///
/// 배포 설정에 따라 두 가지 전략 중 하나가 선택됩니다.
/// 런타임에 변경되지 않으며, 시작 시점에 한 번 결정됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategy {
    /// HMAC-SHA256 공유 비밀키로 로컬에서 서명/검증
    Local,
    /// Keycloak 토큰/userinfo 엔드포인트에 위임
    Keycloak,
}

impl AuthStrategy {
    /// `AUTH_STRATEGY` 환경 변수에서 현재 전략을 읽습니다.
    ///
    /// 알 수 없는 값은 조용히 기본값으로 바꾸지 않고 설정 오류로 처리합니다.
    pub fn from_env() -> Result<Self, AppError> {
        let raw = env::var("AUTH_STRATEGY").unwrap_or_else(|_| "local".to_string());

        match raw.to_lowercase().as_str() {
            "local" | "jwt" => Ok(AuthStrategy::Local),
            "keycloak" | "delegated" => Ok(AuthStrategy::Keycloak),
            other => Err(AppError::ConfigurationError(format!(
                "알 수 없는 AUTH_STRATEGY 값입니다: {} (local | keycloak)", other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthStrategy::Local => "local",
            AuthStrategy::Keycloak => "keycloak",
        }
    }
}

/// JSON Web Token (JWT) 관련 설정 (로컬 서명 전략)
///
/// ## 보안 요구사항
///
/// - 서명 비밀키는 최소 256비트 (32바이트)
/// - 환경별로 다른 키 사용, 정기적인 키 순환 권장
/// - 비밀키 길이는 프로세스 시작 시점에 한 번 검증되며,
///   짧은 키로는 서버가 기동되지 않습니다
pub struct JwtConfig;

impl JwtConfig {
    /// 비밀키가 가져야 하는 최소 비트 수
    pub const MIN_SECRET_BITS: usize = 256;

    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// 시작 시점 검증([`validate_secret`])을 통과한 이후에만 호출된다고
    /// 가정하므로 기본값을 제공하지 않습니다.
    ///
    /// # 키 생성 예제
    ///
    /// ```bash
    /// openssl rand -base64 48
    /// ```
    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_default()
    }

    /// 비밀키 존재 여부와 길이를 검증합니다.
    ///
    /// 로컬 서명 전략에서 프로세스 시작 시 정확히 한 번 호출됩니다.
    /// 요청 처리 중에는 다시 검증하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigurationError` - 키가 없거나 256비트 미만인 경우
    pub fn validate_secret() -> Result<(), AppError> {
        let secret = env::var("JWT_SECRET").unwrap_or_default();

        if secret.is_empty() {
            return Err(AppError::ConfigurationError(
                "JWT_SECRET 환경 변수가 설정되지 않았습니다. `openssl rand -base64 48`로 키를 생성하세요".to_string()
            ));
        }

        let bits = secret.as_bytes().len() * 8;
        if bits < Self::MIN_SECRET_BITS {
            return Err(AppError::ConfigurationError(format!(
                "JWT 비밀키가 너무 짧습니다 ({}비트). 최소 {}비트가 필요합니다. `openssl rand -base64 48`로 키를 생성하세요",
                bits, Self::MIN_SECRET_BITS
            )));
        }

        Ok(())
    }

    /// JWT 액세스 토큰의 만료 시간 (시간 단위)
    ///
    /// 로컬 서명 전략에는 폐기 목록이 없으므로 만료가 토큰의 유일한
    /// 종료 수단입니다. 운영 환경에서는 짧은 만료 시간을 권장합니다.
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24)
    }
}

/// Keycloak 연동 설정 (위임 전략)
///
/// Spring의 `keycloak.*` 프로퍼티와 동일한 항목을 환경 변수로 관리합니다.
pub struct KeycloakConfig;

impl KeycloakConfig {
    /// Keycloak 서버 기본 URL
    pub fn server_url() -> String {
        env::var("KEYCLOAK_SERVER_URL").unwrap_or_default()
    }

    /// 인증에 사용할 realm 이름
    pub fn realm() -> String {
        env::var("KEYCLOAK_REALM").unwrap_or_default()
    }

    /// 백엔드 클라이언트 ID
    pub fn client_id() -> String {
        env::var("KEYCLOAK_CLIENT_ID").unwrap_or_default()
    }

    /// 백엔드 클라이언트 시크릿
    ///
    /// 민감 정보입니다. 로그에 출력하지 마세요.
    pub fn client_secret() -> String {
        env::var("KEYCLOAK_CLIENT_SECRET").unwrap_or_default()
    }

    /// 아웃바운드 Keycloak 호출의 제한 시간 (초)
    ///
    /// 토큰 발급/검증 호출 모두에 적용됩니다. 프로바이더가 응답하지 않아도
    /// 요청 처리 스레드는 이 시간 안에 반드시 해제됩니다.
    pub fn timeout_secs() -> u64 {
        env::var("KEYCLOAK_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5)
    }

    /// 비밀번호 그랜트 토큰 엔드포인트 URL
    pub fn token_endpoint() -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token",
            Self::server_url(), Self::realm()
        )
    }

    /// userinfo 엔드포인트 URL (토큰 검증에 사용)
    pub fn userinfo_endpoint() -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/userinfo",
            Self::server_url(), Self::realm()
        )
    }

    /// 위임 전략의 필수 설정을 검증합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigurationError` - 필수 항목이 비어있는 경우
    pub fn validate() -> Result<(), AppError> {
        let required = [
            ("KEYCLOAK_SERVER_URL", Self::server_url()),
            ("KEYCLOAK_REALM", Self::realm()),
            ("KEYCLOAK_CLIENT_ID", Self::client_id()),
            ("KEYCLOAK_CLIENT_SECRET", Self::client_secret()),
        ];

        for (name, value) in required {
            if value.is_empty() {
                return Err(AppError::ConfigurationError(format!(
                    "{} 환경 변수가 설정되지 않았습니다 (위임 인증 전략에 필수)", name
                )));
            }
        }

        Ok(())
    }
}

/// 선택된 인증 전략의 시작 시점 설정 검증
///
/// `main.rs`에서 서버가 리스너를 바인딩하기 전에 호출됩니다.
/// 실패하면 프로세스는 트래픽을 받지 않고 종료되어야 합니다.
///
/// # Returns
///
/// * `Ok(AuthStrategy)` - 검증을 통과한 현재 전략
///
/// # Errors
///
/// * `AppError::ConfigurationError` - 전략 값이 잘못되었거나 필수 설정 누락
pub fn validate_at_startup() -> Result<AuthStrategy, AppError> {
    let strategy = AuthStrategy::from_env()?;

    match strategy {
        AuthStrategy::Local => JwtConfig::validate_secret()?,
        AuthStrategy::Keycloak => KeycloakConfig::validate()?,
    }

    Ok(strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // 환경 변수를 만지는 테스트는 병렬 실행 시 서로 간섭하므로 직렬화한다
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_short_secret_is_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("JWT_SECRET", "too-short");
        }

        let result = JwtConfig::validate_secret();
        assert!(matches!(result, Err(AppError::ConfigurationError(_))));

        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("JWT_SECRET");
        }

        let result = JwtConfig::validate_secret();
        assert!(matches!(result, Err(AppError::ConfigurationError(_))));
    }

    #[test]
    fn test_256_bit_secret_is_accepted() {
        let _guard = ENV_LOCK.lock().unwrap();
        // 32 ASCII 문자 = 256비트
        unsafe {
            std::env::set_var("JWT_SECRET", "0123456789abcdef0123456789abcdef");
        }

        assert!(JwtConfig::validate_secret().is_ok());

        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
    }

    #[test]
    fn test_auth_strategy_parsing() {
        let _guard = ENV_LOCK.lock().unwrap();

        unsafe {
            std::env::set_var("AUTH_STRATEGY", "keycloak");
        }
        assert_eq!(AuthStrategy::from_env().unwrap(), AuthStrategy::Keycloak);

        unsafe {
            std::env::set_var("AUTH_STRATEGY", "local");
        }
        assert_eq!(AuthStrategy::from_env().unwrap(), AuthStrategy::Local);

        unsafe {
            std::env::set_var("AUTH_STRATEGY", "saml");
        }
        assert!(AuthStrategy::from_env().is_err());

        unsafe {
            std::env::remove_var("AUTH_STRATEGY");
        }
        assert_eq!(AuthStrategy::from_env().unwrap(), AuthStrategy::Local);
    }

    #[test]
    fn test_keycloak_endpoints_are_composed_from_realm() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("KEYCLOAK_SERVER_URL", "http://keycloak:8080");
            std::env::set_var("KEYCLOAK_REALM", "lecture-platform");
        }

        assert_eq!(
            KeycloakConfig::token_endpoint(),
            "http://keycloak:8080/realms/lecture-platform/protocol/openid-connect/token"
        );
        assert_eq!(
            KeycloakConfig::userinfo_endpoint(),
            "http://keycloak:8080/realms/lecture-platform/protocol/openid-connect/userinfo"
        );

        unsafe {
            std::env::remove_var("KEYCLOAK_SERVER_URL");
            std::env::remove_var("KEYCLOAK_REALM");
        }
    }
}
