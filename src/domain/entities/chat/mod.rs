//! 채팅 도메인 엔티티

pub mod chat_message;

pub use chat_message::ChatMessage;
