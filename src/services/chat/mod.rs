//! 채팅 서비스 모듈

pub mod chat_service;

pub use chat_service::{ChatService, CHAT_CHANNEL};
