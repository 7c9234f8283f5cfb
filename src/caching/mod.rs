//! 캐싱 및 pub/sub 인프라 모듈
//!
//! Redis를 사용한 조회 캐싱과 채팅 메시지 fan-out 채널을 제공합니다.

pub mod redis;
