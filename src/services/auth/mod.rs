//! 인증 및 보안 서비스 모듈
//!
//! 토큰 발급/검증과 자격 증명 검증을 담당하는 서비스들을 제공합니다.
//!
//! # 구조
//!
//! ```text
//! TokenService (파사드, #[service])
//!      │
//!      ▼
//! TokenAuthorityHandle (시작 시 한 번 조립, 수동 등록)
//!      │
//!      ├─ LocalTokenAuthority    - HMAC-SHA256 로컬 서명/검증
//!      └─ KeycloakTokenAuthority - Keycloak 토큰/userinfo 위임
//! ```
//!
//! # Security
//!
//! - 서명 비밀키는 시작 시점에 256비트 이상인지 검증 (미달 시 기동 거부)
//! - 인증 실패 원인은 클라이언트에 세분화하지 않음 (계정 열거 방지)
//! - 위임 호출은 타임아웃으로 제한된 공유 커넥션 풀 사용
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let token_service = TokenService::instance();
//! let session = token_service.login("teacher", "teacher123").await?;
//! let identity = token_service.validate_token(&session.access_token).await?;
//! ```

pub mod token_service;
pub mod token_authority;
pub mod local_authority;
pub mod keycloak_authority;

pub use token_service::*;
pub use token_authority::*;
pub use local_authority::*;
pub use keycloak_authority::*;
