//! 인증 경계에서 사용하는 도메인 모델

pub mod authenticated_user;
pub mod authentication_request;

pub use authenticated_user::AuthenticatedUser;
pub use authentication_request::{AuthMode, RequiredRole};
