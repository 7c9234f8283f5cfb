//! 채팅 리포지토리 모듈

pub mod chat_repo;

pub use chat_repo::ChatMessageRepository;
