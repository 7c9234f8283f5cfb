//! # 영상 리포지토리 구현
//!
//! 영상 메타데이터의 데이터 액세스 계층입니다.
//! MongoDB `videos` 컬렉션을 주 저장소로 사용하고,
//! 조회 빈도가 가장 높은 공개 영상 목록은 Redis로 단기 캐싱합니다.
//!
//! ## 캐싱 전략
//!
//! - **캐시 키**: `videos:public`
//! - **TTL**: 60초
//! - **무효화**: 영상 업로드 시 즉시 삭제
//!
//! 신원이나 권한 정보는 이 캐시에 포함되지 않습니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::videos::Video,
};
use crate::core::errors::AppError;

/// 공개 영상 목록 캐시 키
const PUBLIC_LIST_CACHE_KEY: &str = "videos:public";

/// 공개 영상 목록 캐시 TTL (초)
const PUBLIC_LIST_CACHE_TTL: usize = 60;

/// 영상 데이터 액세스 리포지토리
#[repository(name = "video", collection = "videos")]
pub struct VideoRepository {
    /// MongoDB 데이터베이스 연결 (자동 주입)
    db: Arc<Database>,

    /// Redis 캐시 클라이언트 (자동 주입)
    redis: Arc<RedisClient>,
}

impl VideoRepository {
    /// 새 영상 메타데이터 저장
    ///
    /// 공개 영상 목록 캐시를 무효화합니다.
    pub async fn create(&self, mut video: Video) -> Result<Video, AppError> {
        let result = self.collection::<Video>()
            .insert_one(&video)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        video.id = result.inserted_id.as_object_id();

        // 목록 캐시 무효화
        let _ = self.redis.del(PUBLIC_LIST_CACHE_KEY).await;

        Ok(video)
    }

    /// ID로 영상 조회
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Video>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 영상 ID 형식입니다".to_string()))?;

        self.collection::<Video>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 공개 영상 목록 조회 (캐시 우선)
    pub async fn find_public(&self) -> Result<Vec<Video>, AppError> {
        if let Ok(Some(cached)) = self.redis.get::<Vec<Video>>(PUBLIC_LIST_CACHE_KEY).await {
            return Ok(cached);
        }

        let mut cursor = self.collection::<Video>()
            .find(doc! { "is_public": true })
            .sort(doc! { "uploaded_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut videos = Vec::new();
        while let Some(video) = cursor.try_next().await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
        {
            videos.push(video);
        }

        let _ = self.redis
            .set_with_expiry(PUBLIC_LIST_CACHE_KEY, &videos, PUBLIC_LIST_CACHE_TTL)
            .await;

        Ok(videos)
    }

    /// 특정 교사가 업로드한 영상 목록
    pub async fn find_by_teacher(&self, teacher_id: &ObjectId) -> Result<Vec<Video>, AppError> {
        let mut cursor = self.collection::<Video>()
            .find(doc! { "teacher_id": teacher_id })
            .sort(doc! { "uploaded_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut videos = Vec::new();
        while let Some(video) = cursor.try_next().await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
        {
            videos.push(video);
        }

        Ok(videos)
    }

    /// 데이터베이스 인덱스 생성
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<Video>();

        let teacher_index = IndexModel::builder()
            .keys(doc! { "teacher_id": 1, "uploaded_at": -1 })
            .options(IndexOptions::builder()
                .name("teacher_uploads".to_string())
                .build())
            .build();

        let public_index = IndexModel::builder()
            .keys(doc! { "is_public": 1, "uploaded_at": -1 })
            .options(IndexOptions::builder()
                .name("public_listing".to_string())
                .build())
            .build();

        collection
            .create_indexes([teacher_index, public_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
