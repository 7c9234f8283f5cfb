//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! Spring Framework의 `@Configuration` 클래스와 유사한 역할을 수행하며,
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 서버, 저장소, 환경 관련 설정
//! - [`auth_config`] - 인증 전략, JWT, Keycloak 관련 설정
//!
//! ## 설계 원칙
//!
//! ### 1. 환경 분리 (Environment Separation)
//!
//! 개발, 테스트, 스테이징, 프로덕션 환경별로 다른 설정값을 제공합니다.
//!
//! ### 2. 보안 우선 (Security First)
//!
//! - 민감한 정보는 환경 변수로만 제공
//! - 선택된 인증 전략의 필수 설정은 시작 시점에 검증하며,
//!   누락 시 서버는 트래픽을 받지 않고 종료
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # 인증 전략 (local | keycloak)
//! export AUTH_STRATEGY="local"
//! export JWT_SECRET="$(openssl rand -base64 48)"
//!
//! # 저장소
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="lecture_platform_dev"
//! export REDIS_URL="redis://localhost:6379"
//! export VIDEO_UPLOAD_DIR="uploads/videos"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
