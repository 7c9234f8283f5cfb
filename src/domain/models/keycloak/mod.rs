//! Keycloak 연동 wire 모델

pub mod wire;

pub use wire::*;
