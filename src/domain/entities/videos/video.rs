//! 영상 엔티티
//!
//! MongoDB `videos` 컬렉션에 저장됩니다. 실제 영상 파일은
//! 로컬 파일시스템(`StorageConfig::upload_dir()`)에 UUID 파일명으로 저장되고,
//! 엔티티는 그 경로(`file_path`)만 보관합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: String,
    /// 디스크 상의 저장 경로. 클라이언트에는 절대 노출하지 않습니다.
    pub file_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_path: Option<String>,
    pub teacher_id: ObjectId,
    pub teacher_name: String,
    /// 재생 시간 (초). 업로드 시점에는 0이며 후처리 파이프라인이 채웁니다.
    pub duration: i64,
    pub is_live: bool,
    pub is_public: bool,
    pub uploaded_at: DateTime,
}

impl Video {
    pub fn new(
        title: String,
        description: String,
        file_path: String,
        teacher_id: ObjectId,
        teacher_name: String,
        is_public: bool,
        is_live: bool,
    ) -> Self {
        Self {
            id: None,
            title,
            description,
            file_path,
            thumbnail_path: None,
            teacher_id,
            teacher_name,
            duration: 0,
            is_live,
            is_public,
            uploaded_at: DateTime::now(),
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}
