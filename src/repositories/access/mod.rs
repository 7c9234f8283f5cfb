//! 접근 로그 리포지토리 모듈

pub mod access_log_repo;

pub use access_log_repo::AccessLogRepository;
