//! Keycloak 위임 토큰 권한 (keycloak 전략)
//!
//! 발급은 Keycloak 토큰 엔드포인트(password grant)에, 검증은 userinfo
//! 엔드포인트에 위임합니다. 검증 결과는 캐시하지 않으므로 보호된 요청마다
//! 프로바이더 왕복이 한 번 발생합니다. 그 대가로 중앙 집중식 세션 폐기와
//! 사용자 디렉토리 일관성을 얻습니다.
//!
//! ## 보안 정책
//!
//! - 프로바이더의 원본 에러 텍스트는 서버 로그에만 남기고,
//!   클라이언트에는 일반화된 401만 반환합니다.
//! - 아웃바운드 호출은 공유 커넥션 풀 하나로 수행되며
//!   (프로세스 시작 시 생성, 이후 읽기 전용), 설정된 타임아웃으로
//!   제한됩니다. 클라이언트가 요청을 중단하면 진행 중인 프로바이더
//!   호출도 함께 취소됩니다 (future drop).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::auth_config::{AuthStrategy, KeycloakConfig};
use crate::core::errors::AppError;
use crate::domain::entities::users::Role;
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::keycloak::{KeycloakTokenResponse, KeycloakUserInfo};
use crate::repositories::users::UserRepository;

use super::token_authority::{AuthSession, TokenAuthority};

/// Keycloak 위임 토큰 권한
pub struct KeycloakTokenAuthority {
    /// 프로세스 전역 공유 HTTP 클라이언트 (커넥션 풀)
    http: reqwest::Client,
    user_repo: Arc<UserRepository>,
}

impl KeycloakTokenAuthority {
    /// 환경 변수 설정으로 생성합니다.
    ///
    /// 필수 설정은 `auth_config::validate_at_startup()`이 이미 검증했다고
    /// 가정합니다. HTTP 클라이언트는 여기서 한 번만 생성됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigurationError` - HTTP 클라이언트 초기화 실패
    pub fn from_env(user_repo: Arc<UserRepository>) -> Result<Self, AppError> {
        let timeout = Duration::from_secs(KeycloakConfig::timeout_secs());

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| AppError::ConfigurationError(format!("Keycloak HTTP 클라이언트 초기화 실패: {}", e)))?;

        Ok(Self { http, user_repo })
    }

    fn invalid_credentials() -> AppError {
        AppError::AuthenticationError("잘못된 사용자명 또는 비밀번호입니다".to_string())
    }

    fn invalid_token() -> AppError {
        AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
    }

    /// password grant로 토큰 발급
    ///
    /// 프로바이더 거부(4xx)와 네트워크/타임아웃 실패를 구분하지 않고
    /// 동일한 실패로 수렴시킵니다. 세부 원인은 로그에만 남습니다.
    async fn request_token(&self, username: &str, password: &str) -> Result<KeycloakTokenResponse, AppError> {
        let params = [
            ("username", username),
            ("password", password),
            ("client_id", &KeycloakConfig::client_id()),
            ("client_secret", &KeycloakConfig::client_secret()),
            ("grant_type", "password"),
            ("scope", "email openid profile"),
        ];

        let response = self.http
            .post(KeycloakConfig::token_endpoint())
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                log::warn!("Keycloak 토큰 엔드포인트 호출 실패: {}", e);
                Self::invalid_credentials()
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::warn!("Keycloak 토큰 발급 거부 - 사용자: {}, 상태: {}, 응답: {}", username, status, body);
            return Err(Self::invalid_credentials());
        }

        response
            .json::<KeycloakTokenResponse>()
            .await
            .map_err(|e| {
                log::error!("Keycloak 토큰 응답 파싱 실패: {}", e);
                Self::invalid_credentials()
            })
    }

    /// userinfo 엔드포인트로 토큰 검증 및 사용자 정보 조회
    async fn fetch_userinfo(&self, token: &str) -> Result<KeycloakUserInfo, AppError> {
        let response = self.http
            .get(KeycloakConfig::userinfo_endpoint())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                log::warn!("Keycloak userinfo 호출 실패: {}", e);
                Self::invalid_token()
            })?;

        if !response.status().is_success() {
            log::debug!("Keycloak userinfo 거부 - 상태: {}", response.status());
            return Err(Self::invalid_token());
        }

        response
            .json::<KeycloakUserInfo>()
            .await
            .map_err(|e| {
                log::error!("Keycloak userinfo 응답 파싱 실패: {}", e);
                Self::invalid_token()
            })
    }

    /// userinfo 응답을 신원으로 변환
    ///
    /// 역할 집합 결정 순서:
    ///
    /// 1. userinfo의 realm 역할 중 플랫폼 역할로 해석되는 것
    /// 2. 로컬 사용자 저장소의 역할
    /// 3. 기본값 `[STUDENT]`
    async fn resolve_identity(&self, info: KeycloakUserInfo) -> Result<AuthenticatedUser, AppError> {
        if info.preferred_username.is_empty() {
            log::warn!("Keycloak userinfo에 preferred_username이 없습니다 (sub: {})", info.sub);
            return Err(Self::invalid_token());
        }

        let provider_roles: Vec<Role> = info
            .realm_access
            .as_ref()
            .map(|access| access.roles.iter().filter_map(|r| Role::parse(r)).collect())
            .unwrap_or_default();

        // 프로바이더가 역할을 주지 않으면 로컬 저장소에서 보강
        let (roles, local_email, local_name) = if provider_roles.is_empty() {
            match self.user_repo.find_by_username(&info.preferred_username).await {
                Ok(Some(user)) => (user.role_set(), Some(user.email), Some(user.display_name)),
                Ok(None) => (vec![Role::default()], None, None),
                Err(e) => {
                    log::error!("위임 인증 중 로컬 역할 조회 실패: {}", e);
                    (vec![Role::default()], None, None)
                }
            }
        } else {
            (provider_roles, None, None)
        };

        let email = if info.email.is_empty() {
            local_email.unwrap_or_default()
        } else {
            info.email
        };

        let display_name = if info.name.is_empty() {
            local_name.unwrap_or_else(|| info.preferred_username.clone())
        } else {
            info.name
        };

        Ok(AuthenticatedUser {
            username: info.preferred_username,
            email,
            display_name,
            roles,
        })
    }
}

#[async_trait]
impl TokenAuthority for KeycloakTokenAuthority {
    fn strategy(&self) -> AuthStrategy {
        AuthStrategy::Keycloak
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthSession, AppError> {
        // 자격 증명 검증과 토큰 발급이 프로바이더의 단일 호출로 수행됩니다
        let token_response = self.request_token(username, password).await?;

        // 발급 직후 신원 해석 (로그인 응답에 username/email/roles 필요)
        let info = self.fetch_userinfo(&token_response.access_token).await
            .map_err(|e| {
                log::error!("발급 직후 userinfo 조회 실패 - 사용자: {}, 에러: {}", username, e);
                Self::invalid_credentials()
            })?;

        let identity = self.resolve_identity(info).await
            .map_err(|_| Self::invalid_credentials())?;

        log::info!("Keycloak 로그인 성공: {}", identity.username);

        Ok(AuthSession {
            identity,
            access_token: token_response.access_token,
            expires_in: token_response.expires_in,
        })
    }

    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        // 매 요청 프로바이더 왕복 - 검증 결과는 캐시하지 않습니다
        let info = self.fetch_userinfo(token).await?;
        self.resolve_identity(info).await
    }
}
