//! # 데이터 전송 객체 (DTO)
//!
//! API 경계에서 데이터를 전송하기 위한 객체들입니다.
//! Spring의 `@RequestBody`/`@ResponseBody`와 동일한 역할을 수행합니다.
//!
//! ## 설계 원칙
//!
//! - **API 계약**: 외부 시스템과의 명확한 인터페이스 정의
//! - **유효성 검증**: `validator` derive로 입력 데이터 검증
//! - **정보 은닉**: 비밀번호 해시, 디스크 경로 등 내부 필드는
//!   응답 DTO에 절대 포함하지 않음

pub mod auth;
pub mod videos;
pub mod chat;

pub use auth::*;
pub use videos::*;
pub use chat::*;
