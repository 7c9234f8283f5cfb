//! 로그인 접근 로그 엔티티
//!
//! 성공한 로그인마다 한 건씩 기록됩니다. 기록 실패는 로그인 자체를
//! 실패시키지 않습니다 (감사 로그는 best-effort).

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessLog {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub username: String,
    pub access_time: DateTime,
    pub ip_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl AccessLog {
    pub fn new(
        user_id: ObjectId,
        username: String,
        ip_address: String,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            id: None,
            user_id,
            username,
            access_time: DateTime::now(),
            ip_address,
            user_agent,
        }
    }
}
