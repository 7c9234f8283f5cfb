//! # 핵심 도메인 엔티티
//!
//! MongoDB에 영속되는 비즈니스 핵심 객체들입니다.
//! Spring JPA의 `@Entity` 클래스와 동일한 역할을 수행합니다.
//!
//! | 엔티티 | 컬렉션 | 설명 |
//! |--------|--------|------|
//! | [`users::User`] | `users` | 계정 정보 (bcrypt 해시, 역할) |
//! | [`videos::Video`] | `videos` | 영상 메타데이터 (파일 경로 포함) |
//! | [`videos::VideoAccess`] | `video_access` | 학생별 시청 기록 |
//! | [`chat::ChatMessage`] | `chat_messages` | 채팅 메시지 로그 |
//! | [`access::AccessLog`] | `access_logs` | 로그인 감사 로그 |

pub mod users;
pub mod videos;
pub mod chat;
pub mod access;

pub use users::*;
pub use videos::*;
pub use chat::*;
pub use access::*;
