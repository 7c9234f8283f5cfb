//! # 외부 시스템 통합 모델
//!
//! 엔티티(영속 객체)도 DTO(API 계약)도 아닌, 인증 경계와 외부 시스템
//! 통합에 사용되는 내부 모델들입니다.
//!
//! - [`auth`] - 인증된 신원, 인증 모드, 역할 요구사항
//! - [`keycloak`] - Keycloak OIDC 엔드포인트 wire 모델

pub mod auth;
pub mod keycloak;

pub use auth::*;
pub use keycloak::*;
