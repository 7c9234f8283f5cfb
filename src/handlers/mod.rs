//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! Spring Framework의 Controller 레이어와 동일한 역할을 수행합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리       ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                       ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근                    ← Repository Layer
//! ├─────────────────────────────────────────────┤
//!   Entities/Models - 도메인 모델                  ← Domain Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - **`auth`**: 로그인, 회원가입, 토큰 검증, 프로필 조회
//! - **`videos`**: 업로드(multipart), 목록, 스트리밍(Range), 시청 기록
//! - **`chat`**: 메시지 전송/조회, SSE 실시간 스트림
//! - **`admin`**: 사용자 목록, 접근 로그 (ADMIN 전용)
//!
//! ## 공통 규칙
//!
//! - 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며,
//!   에러는 `ResponseError` 구현을 통해 자동으로 HTTP 응답이 됩니다.
//! - 인증이 필요한 핸들러는 [`AuthenticatedUser`] extractor로 신원을 받습니다.
//!   신원 부착은 라우트 스코프의 `AuthMiddleware`가 담당합니다.
//! - 입력 DTO는 `validator` 규칙을 통과해야 합니다.
//!
//! [`AuthenticatedUser`]: crate::domain::models::auth::AuthenticatedUser

pub mod auth;
pub mod videos;
pub mod chat;
pub mod admin;
