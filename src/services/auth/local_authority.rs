//! 로컬 서명 토큰 권한 (local 전략)
//!
//! HMAC-SHA256 공유 비밀키로 JWT를 직접 서명하고 검증합니다.
//! 자격 증명은 로컬 사용자 저장소(MongoDB + bcrypt)로 검증합니다.
//!
//! 이 변형에는 폐기 목록이 없습니다. 만료가 토큰의 유일한 종료 수단이므로
//! 만료 시간은 짧게 유지해야 합니다.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::auth_config::{AuthStrategy, JwtConfig};
use crate::core::errors::AppError;
use crate::domain::entities::users::Role;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::users::UserRepository;

use super::token_authority::{AuthSession, TokenAuthority};

/// JWT 클레임 집합
///
/// 신원 전체(주체, 이메일, 표시 이름, 역할 집합)를 클레임에 담아
/// 검증 시 저장소 조회 없이 신원을 복원할 수 있게 합니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 주체 (username)
    pub sub: String,
    pub email: String,
    /// 표시 이름
    pub name: String,
    pub roles: Vec<Role>,
    /// 발급 시각 (unix timestamp)
    pub iat: i64,
    /// 만료 시각 (unix timestamp)
    pub exp: i64,
}

/// 서명/검증만 담당하는 순수 코덱
///
/// 저장소 의존성이 없으므로 단위 테스트가 쉽습니다.
/// 비밀키는 시작 시점 검증을 통과한 값으로 한 번 고정됩니다.
pub struct TokenCodec {
    secret: String,
    expiration_hours: i64,
}

impl TokenCodec {
    pub fn new(secret: String, expiration_hours: i64) -> Self {
        Self { secret, expiration_hours }
    }

    /// 신원에 대한 JWT 발급
    ///
    /// # Returns
    ///
    /// * `Ok((token, expires_in))` - 서명된 토큰과 유효 시간(초)
    pub fn issue(&self, identity: &AuthenticatedUser) -> Result<(String, i64), AppError> {
        let now = Utc::now();
        let expiration = now + Duration::hours(self.expiration_hours);

        let claims = TokenClaims {
            sub: identity.username.clone(),
            email: identity.email.clone(),
            name: identity.display_name.clone(),
            roles: identity.roles.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let header = Header::default();
        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());

        let token = encode(&header, &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))?;

        Ok((token, self.expiration_hours * 3600))
    }

    /// JWT 검증 및 신원 복원
    ///
    /// 서명과 만료를 로컬에서 검증합니다. 만료와 위조는 클라이언트에
    /// 구분되어 전달되지 않으며, 세부 원인은 디버그 로그로만 남습니다.
    pub fn validate(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());
        let validation = Validation::default();

        let claims = decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                log::debug!("토큰 검증 실패: {}", e);
                AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
            })?;

        if claims.sub.is_empty() {
            return Err(AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string()));
        }

        // 역할 집합은 비어있을 수 없습니다
        let roles = if claims.roles.is_empty() {
            vec![Role::default()]
        } else {
            claims.roles
        };

        Ok(AuthenticatedUser {
            username: claims.sub,
            email: claims.email,
            display_name: claims.name,
            roles,
        })
    }
}

/// 로컬 서명 토큰 권한
pub struct LocalTokenAuthority {
    codec: TokenCodec,
    user_repo: Arc<UserRepository>,
}

impl LocalTokenAuthority {
    pub fn new(codec: TokenCodec, user_repo: Arc<UserRepository>) -> Self {
        Self { codec, user_repo }
    }

    /// 환경 변수 설정으로 생성합니다.
    ///
    /// 비밀키는 `auth_config::validate_at_startup()`을 통과했다고 가정합니다.
    pub fn from_env(user_repo: Arc<UserRepository>) -> Self {
        Self::new(
            TokenCodec::new(JwtConfig::secret(), JwtConfig::expiration_hours()),
            user_repo,
        )
    }

    fn invalid_credentials() -> AppError {
        AppError::AuthenticationError("잘못된 사용자명 또는 비밀번호입니다".to_string())
    }
}

#[async_trait]
impl TokenAuthority for LocalTokenAuthority {
    fn strategy(&self) -> AuthStrategy {
        AuthStrategy::Local
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthSession, AppError> {
        // 존재하지 않는 사용자 / 비밀번호 불일치 / 저장소 오류는
        // 모두 동일한 실패로 수렴합니다. 원인은 로그에만 남깁니다.
        let user = match self.user_repo.find_by_username(username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                log::warn!("로그인 실패 - 존재하지 않는 사용자: {}", username);
                return Err(Self::invalid_credentials());
            }
            Err(e) => {
                log::error!("로그인 중 사용자 조회 실패: {}", e);
                return Err(Self::invalid_credentials());
            }
        };

        let password_ok = bcrypt::verify(password, &user.password_hash)
            .unwrap_or_else(|e| {
                log::error!("비밀번호 검증 오류 - 사용자: {}, 에러: {}", username, e);
                false
            });

        if !password_ok {
            log::warn!("로그인 실패 - 비밀번호 불일치: {}", username);
            return Err(Self::invalid_credentials());
        }

        if !user.is_active {
            log::warn!("로그인 실패 - 비활성화된 계정: {}", username);
            return Err(Self::invalid_credentials());
        }

        let identity = AuthenticatedUser {
            username: user.username.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            roles: user.role_set(),
        };

        let (access_token, expires_in) = self.codec.issue(&identity)?;

        Ok(AuthSession {
            identity,
            access_token,
            expires_in,
        })
    }

    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        // 자기완결형 검증: 서명 + 만료만 확인, 저장소 조회 없음
        self.codec.validate(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "0123456789abcdef0123456789abcdef"; // 256비트

    fn sample_identity() -> AuthenticatedUser {
        AuthenticatedUser {
            username: "teacher".to_string(),
            email: "teacher@example.com".to_string(),
            display_name: "김선생".to_string(),
            roles: vec![Role::Teacher],
        }
    }

    #[test]
    fn test_issue_then_validate_round_trip() {
        let codec = TokenCodec::new(TEST_SECRET.to_string(), 1);
        let identity = sample_identity();

        let (token, expires_in) = codec.issue(&identity).unwrap();
        assert!(!token.is_empty());
        assert_eq!(expires_in, 3600);

        let resolved = codec.validate(&token).unwrap();
        assert_eq!(resolved.username, identity.username);
        assert_eq!(resolved.email, identity.email);
        assert_eq!(resolved.roles, identity.roles);
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let codec = TokenCodec::new(TEST_SECRET.to_string(), 1);
        let (token, _) = codec.issue(&sample_identity()).unwrap();

        // 서명 마지막 문자를 변조
        let mut tampered = token.clone();
        let last = if tampered.ends_with('A') { 'B' } else { 'A' };
        tampered.pop();
        tampered.push(last);

        let result = codec.validate(&tampered);
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let codec_a = TokenCodec::new(TEST_SECRET.to_string(), 1);
        let codec_b = TokenCodec::new("ffffffffffffffffffffffffffffffff".to_string(), 1);

        let (token, _) = codec_b.issue(&sample_identity()).unwrap();

        let result = codec_a.validate(&token);
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // 만료 시간을 과거로 설정하여 발급 (기본 leeway 60초를 넘는 1시간 전)
        let expired_codec = TokenCodec::new(TEST_SECRET.to_string(), -1);
        let (token, _) = expired_codec.issue(&sample_identity()).unwrap();

        let codec = TokenCodec::new(TEST_SECRET.to_string(), 1);
        let result = codec.validate(&token);

        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let codec = TokenCodec::new(TEST_SECRET.to_string(), 1);

        assert!(codec.validate("not-a-jwt").is_err());
        assert!(codec.validate("").is_err());
        assert!(codec.validate("a.b.c").is_err());
    }

    #[test]
    fn test_empty_roles_default_to_student() {
        let codec = TokenCodec::new(TEST_SECRET.to_string(), 1);
        let identity = AuthenticatedUser {
            roles: vec![],
            ..sample_identity()
        };

        let (token, _) = codec.issue(&identity).unwrap();
        let resolved = codec.validate(&token).unwrap();

        assert_eq!(resolved.roles, vec![Role::Student]);
    }
}
