//! 학생별 영상 접근 기록 리포지토리
//!
//! (영상, 학생) 쌍마다 한 건을 유지하며 스트리밍 접근 시마다
//! upsert로 `access_time`을 갱신합니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId, DateTime}, options::IndexOptions, IndexModel};
use singleton_macro::repository;

use crate::{
    core::registry::Repository,
    db::Database,
    domain::entities::videos::VideoAccess,
};
use crate::core::errors::AppError;

#[repository(name = "videoaccess", collection = "video_access")]
pub struct VideoAccessRepository {
    /// MongoDB 데이터베이스 연결 (자동 주입)
    db: Arc<Database>,
}

impl VideoAccessRepository {
    /// 영상 접근 기록 upsert
    ///
    /// 최초 접근 시 새 기록을 생성하고, 이후 접근부터는
    /// `access_time`만 갱신합니다. 시청 진행률은 보존됩니다.
    pub async fn record_access(
        &self,
        video_id: &ObjectId,
        student_id: &ObjectId,
        student_name: &str,
    ) -> Result<(), AppError> {
        self.collection::<VideoAccess>()
            .update_one(
                doc! { "video_id": video_id, "student_id": student_id },
                doc! {
                    "$set": {
                        "access_time": DateTime::now(),
                        "student_name": student_name,
                    },
                    "$setOnInsert": {
                        "watched_duration": 0i64,
                        "completed": false,
                    },
                },
            )
            .upsert(true)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 특정 영상의 접근 기록 목록 (최근 접근 순)
    pub async fn find_by_video(&self, video_id: &ObjectId) -> Result<Vec<VideoAccess>, AppError> {
        let mut cursor = self.collection::<VideoAccess>()
            .find(doc! { "video_id": video_id })
            .sort(doc! { "access_time": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut accesses = Vec::new();
        while let Some(access) = cursor.try_next().await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
        {
            accesses.push(access);
        }

        Ok(accesses)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// (video_id, student_id) 유니크 인덱스가 upsert의 기준 키입니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<VideoAccess>();

        let pair_index = IndexModel::builder()
            .keys(doc! { "video_id": 1, "student_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("video_student_unique".to_string())
                .build())
            .build();

        collection
            .create_indexes([pair_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
