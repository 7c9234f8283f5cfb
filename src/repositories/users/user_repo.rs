//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층입니다. MongoDB `users` 컬렉션을
//! 사용하며, username/email 유니크 인덱스로 중복 가입을 차단합니다.
//!
//! 사용자 조회 결과는 의도적으로 캐시하지 않습니다. 신원(Identity)은
//! 요청마다 저장소에서 새로 해석되어야 하며, 계정 비활성화가
//! 즉시 반영되어야 하기 때문입니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId, DateTime}, options::IndexOptions, IndexModel};
use singleton_macro::repository;

use crate::{
    core::registry::Repository,
    db::Database,
    domain::entities::users::User,
};
use crate::core::errors::AppError;

/// 사용자 데이터 액세스 리포지토리
///
/// ## 인덱스
///
/// - `username` (unique) - 로그인/신원 해석 조회 최적화
/// - `email` (unique) - 중복 가입 차단
/// - `created_at` (desc) - 관리자 목록 정렬
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결 (자동 주입)
    db: Arc<Database>,
}

impl UserRepository {
    /// 사용자명으로 사용자 조회
    ///
    /// 사용자명은 시스템 전체에서 유니크하므로 최대 1개의 결과만 반환됩니다.
    /// 토큰 검증 경로에서 매 요청 호출되므로 유니크 인덱스를 사용합니다.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.collection::<User>()
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 이메일 주소로 사용자 조회
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection::<User>()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// ObjectId 16진수 문자열로 사용자 조회
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 유효하지 않은 ID 형식
    /// * `AppError::DatabaseError` - MongoDB 오류
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        self.collection::<User>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 사용자 생성
    ///
    /// username/email 중복을 먼저 확인한 후 저장합니다.
    /// 동시 가입 경쟁은 유니크 인덱스가 최종적으로 차단합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이미 사용 중인 사용자명 또는 이메일
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        if self.find_by_username(&user.username).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string()));
        }

        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        let result = self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        user.id = result.inserted_id.as_object_id();

        Ok(user)
    }

    /// 마지막 로그인 시각 갱신
    ///
    /// 로그인 경로의 부가 작업이므로 실패해도 호출자가 무시할 수 있도록
    /// 별도 메서드로 분리되어 있습니다.
    pub async fn touch_last_login(&self, username: &str) -> Result<(), AppError> {
        self.collection::<User>()
            .update_one(
                doc! { "username": username },
                doc! { "$set": { "last_login_at": DateTime::now() } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 전체 사용자 목록 (관리자 대시보드용)
    ///
    /// 최근 가입 순으로 정렬합니다.
    pub async fn find_all(&self, limit: i64) -> Result<Vec<User>, AppError> {
        let mut cursor = self.collection::<User>()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut users = Vec::new();
        while let Some(user) = cursor.try_next().await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
        {
            users.push(user);
        }

        Ok(users)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 애플리케이션 초기화 시점에 한 번 실행됩니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<User>();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        collection
            .create_indexes([username_index, email_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
