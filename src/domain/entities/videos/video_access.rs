//! 학생별 영상 접근 기록
//!
//! (영상, 학생) 쌍마다 한 건을 유지하며, 스트리밍 접근 시마다
//! `access_time`이 갱신됩니다 (upsert).

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoAccess {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub video_id: ObjectId,
    pub student_id: ObjectId,
    pub student_name: String,
    pub access_time: DateTime,
    /// 시청한 시간 (초)
    pub watched_duration: i64,
    pub completed: bool,
}
