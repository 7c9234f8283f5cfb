//! # 토큰 발급/검증 권한 (Token Authority)
//!
//! 인증 경계의 핵심 seam입니다. 배포 설정(`AUTH_STRATEGY`)에 따라
//! 두 가지 변형 중 하나가 선택되며, 두 변형은 완전히 동일한 계약을 노출합니다:
//!
//! - [`LocalTokenAuthority`](super::local_authority::LocalTokenAuthority):
//!   HMAC-SHA256 공유 비밀키로 JWT를 직접 서명/검증. 네트워크 홉이 없는
//!   자기완결형이지만 만료 전 폐기가 불가능합니다.
//! - [`KeycloakTokenAuthority`](super::keycloak_authority::KeycloakTokenAuthority):
//!   발급은 Keycloak 토큰 엔드포인트에, 검증은 userinfo 엔드포인트에 위임.
//!   매 요청 네트워크 왕복이 발생하는 대신 중앙 집중식 폐기와
//!   사용자 디렉토리 일관성을 얻습니다.
//!
//! 두 변형을 병렬 코드 경로로 유지하지 않고 하나의 다형적 능력으로
//! 묶는 것이 이 모듈의 존재 이유입니다. 선택은 프로세스 시작 시
//! 정확히 한 번 일어나며, 이후에는 읽기 전용입니다.

use async_trait::async_trait;

use crate::config::auth_config::{self, AuthStrategy};
use crate::core::errors::AppError;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::users::UserRepository;

use super::keycloak_authority::KeycloakTokenAuthority;
use super::local_authority::LocalTokenAuthority;

/// 로그인 성공 결과
///
/// 해석된 신원과 발급된 bearer 토큰의 쌍입니다.
#[derive(Debug)]
pub struct AuthSession {
    pub identity: AuthenticatedUser,
    pub access_token: String,
    /// 토큰 유효 시간 (초)
    pub expires_in: i64,
}

/// 토큰 발급/검증 계약
///
/// 위임 변형의 발급은 자격 증명 검증과 토큰 발급이 프로바이더의
/// 단일 호출로 합쳐져 있으므로, 계약도 `login`(검증+발급)과
/// `validate`(검증)로 구성됩니다.
#[async_trait]
pub trait TokenAuthority: Send + Sync {
    /// 현재 변형의 전략 식별자 (로깅/헬스체크용)
    fn strategy(&self) -> AuthStrategy;

    /// 자격 증명을 검증하고 bearer 토큰을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 잘못된 자격 증명.
    ///   비밀번호 불일치, 존재하지 않는 사용자, 프로바이더 응답 없음은
    ///   모두 이 하나의 결과로 수렴합니다 (계정 열거 방지).
    ///   세부 원인은 서버 로그에만 기록됩니다.
    async fn login(&self, username: &str, password: &str) -> Result<AuthSession, AppError>;

    /// bearer 토큰을 검증하고 신원을 해석합니다.
    ///
    /// 성공한 검증은 항상 비어있지 않은 신원을 반환합니다.
    /// 신원은 호출마다 새로 해석되며 캐시되지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 만료/위조/프로바이더 거부.
    ///   클라이언트에는 세분화하지 않습니다.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AppError>;
}

/// 선택된 변형을 감싸는 프로세스 전역 핸들
///
/// `main.rs`에서 한 번 생성되어 `ServiceLocator::set()`으로 등록됩니다.
/// Database/RedisClient와 같은 방식의 인프라 컴포넌트입니다.
pub struct TokenAuthorityHandle {
    inner: Box<dyn TokenAuthority>,
}

impl TokenAuthorityHandle {
    pub fn new(inner: Box<dyn TokenAuthority>) -> Self {
        Self { inner }
    }

    pub fn strategy(&self) -> AuthStrategy {
        self.inner.strategy()
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession, AppError> {
        self.inner.login(username, password).await
    }

    pub async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        self.inner.validate(token).await
    }
}

/// 시작 시점에 설정을 검증하고 토큰 권한 변형을 조립합니다.
///
/// 리스너 바인딩 전에 `main.rs`에서 호출됩니다. 설정 오류는
/// 여기서 치명적으로 처리되어 서버는 트래픽을 받지 않고 종료됩니다.
///
/// # Errors
///
/// * `AppError::ConfigurationError` - 전략 값 오류, 256비트 미만 비밀키,
///   Keycloak 필수 설정 누락, HTTP 클라이언트 초기화 실패
pub fn build_token_authority() -> Result<TokenAuthorityHandle, AppError> {
    let strategy = auth_config::validate_at_startup()?;
    let user_repo = UserRepository::instance();

    let inner: Box<dyn TokenAuthority> = match strategy {
        AuthStrategy::Local => {
            log::info!("🔑 토큰 전략: 로컬 서명 (HMAC-SHA256)");
            Box::new(LocalTokenAuthority::from_env(user_repo))
        }
        AuthStrategy::Keycloak => {
            log::info!("🔑 토큰 전략: Keycloak 위임 ({})", crate::config::KeycloakConfig::server_url());
            Box::new(KeycloakTokenAuthority::from_env(user_repo)?)
        }
    };

    Ok(TokenAuthorityHandle::new(inner))
}
