//! Redis 클라이언트 래퍼
//!
//! 캐싱(공개 영상 목록 등)과 채팅 메시지 fan-out을 위한
//! publish/subscribe 채널을 제공합니다.
//!
//! 사용자 신원(Identity)은 요청마다 새로 해석되며 절대 캐시하지 않습니다.
//! 캐시는 조회 빈도가 높고 약간의 지연이 허용되는 데이터에만 사용합니다.

use futures_util::Stream;
use redis::{AsyncCommands, Client, Msg};
use serde::{Serialize, de::DeserializeOwned};
use std::env;

#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)?;

        // 연결 테스트 - PING 명령으로 서버 가용성 확인
        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        println!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => {
                let deserialized = serde_json::from_str(&json)
                    .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Deserialization failed", e.to_string())))?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))?;
        conn.set(key, json).await
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: usize) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))?;
        conn.set_ex(key, json, seconds as u64).await
    }

    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(key).await
    }

    /// 패턴과 일치하는 모든 키를 조회합니다.
    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.keys(pattern).await
    }

    /// 여러 키를 한 번에 삭제합니다.
    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(keys).await
    }

    /// 지정된 채널에 메시지를 발행합니다.
    ///
    /// 구독자가 없어도 실패하지 않습니다. fan-out 자체는 Redis 브로커의
    /// 책임이며, 이 메서드는 발행 사실만 보장합니다.
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - 메시지를 수신한 구독자 수
    pub async fn publish(&self, channel: &str, payload: &str) -> Result<u64, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let receivers: u64 = conn.publish(channel, payload).await?;
        Ok(receivers)
    }

    /// 지정된 채널을 구독하고 수신 메시지 스트림을 반환합니다.
    ///
    /// 반환된 스트림은 전용 연결을 소유하며, 스트림이 drop되면
    /// 구독도 함께 해제됩니다 (SSE 클라이언트 연결 종료 시 자동 정리).
    pub async fn subscribe(&self, channel: &str) -> Result<impl Stream<Item = Msg> + use<>, redis::RedisError> {
        let mut pubsub = self.client.get_async_pubsub().await?;
        pubsub.subscribe(channel).await?;
        Ok(pubsub.into_on_message())
    }
}

impl Default for RedisClient {
    fn default() -> Self {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)
            .expect("Failed to create Redis client with default configuration");

        Self { client }
    }
}
