//! 데이터 액세스 계층 모듈
//!
//! `#[repository]` 매크로를 사용하여 싱글톤으로 관리되는 리포지토리들을 제공합니다.
//! 각 리포지토리는 하나의 MongoDB 컬렉션을 담당합니다.
//!
//! | 리포지토리 | 컬렉션 |
//! |-----------|--------|
//! | [`users::UserRepository`] | `users` |
//! | [`videos::VideoRepository`] | `videos` |
//! | [`videos::VideoAccessRepository`] | `video_access` |
//! | [`chat::ChatMessageRepository`] | `chat_messages` |
//! | [`access::AccessLogRepository`] | `access_logs` |

pub mod users;
pub mod videos;
pub mod chat;
pub mod access;
