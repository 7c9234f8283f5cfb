//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인의 횡단 관심사를 담당합니다.
//! Spring Boot의 Filter/Interceptor와 유사한 역할입니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - bearer 토큰 추출 및 검증 (전략에 따라 로컬 서명 검증 또는 Keycloak 위임)
//! - 해석된 신원을 request extension에 부착
//! - 선택적/강제 인증 모드 + 역할 정책 지원
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::middlewares::AuthMiddleware;
//! use crate::domain::entities::users::Role;
//!
//! // 교사/관리자 전용 스코프
//! web::scope("/api/videos/upload")
//!     .wrap(AuthMiddleware::required_with_roles(vec![Role::Teacher, Role::Admin]))
//!
//! // 영상 단위로 접근이 결정되는 스트리밍 스코프
//! web::scope("/api/videos/stream")
//!     .wrap(AuthMiddleware::optional())
//! ```

pub mod auth_middleware;
mod auth_inner;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;
