//! 로그인 접근 로그 리포지토리

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, IndexModel};
use singleton_macro::repository;

use crate::{
    core::registry::Repository,
    db::Database,
    domain::entities::access::AccessLog,
};
use crate::core::errors::AppError;

#[repository(name = "accesslog", collection = "access_logs")]
pub struct AccessLogRepository {
    /// MongoDB 데이터베이스 연결 (자동 주입)
    db: Arc<Database>,
}

impl AccessLogRepository {
    /// 접근 로그 저장
    pub async fn create(&self, log: AccessLog) -> Result<(), AppError> {
        self.collection::<AccessLog>()
            .insert_one(&log)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 최근 접근 로그 조회 (관리자 대시보드용)
    pub async fn find_recent(&self, limit: i64) -> Result<Vec<AccessLog>, AppError> {
        let mut cursor = self.collection::<AccessLog>()
            .find(doc! {})
            .sort(doc! { "access_time": -1 })
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut logs = Vec::new();
        while let Some(log) = cursor.try_next().await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
        {
            logs.push(log);
        }

        Ok(logs)
    }

    /// 데이터베이스 인덱스 생성
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<AccessLog>();

        let time_index = IndexModel::builder()
            .keys(doc! { "access_time": -1 })
            .options(IndexOptions::builder()
                .name("access_time_desc".to_string())
                .build())
            .build();

        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "access_time": -1 })
            .options(IndexOptions::builder()
                .name("user_access_history".to_string())
                .build())
            .build();

        collection
            .create_indexes([time_index, user_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
