//! 사용자 관리 서비스
//!
//! 회원가입과 프로필 조회를 담당합니다. 비밀번호는 환경별 cost의
//! bcrypt로 해싱되어 저장되며, 평문은 어디에도 남지 않습니다.
//!
//! 회원가입은 항상 로컬 사용자 저장소에 기록됩니다. 위임(Keycloak)
//! 전략에서도 이 저장소가 역할 보강과 관리자 대시보드의 기준이 됩니다.

use std::sync::Arc;
use bcrypt::hash;
use singleton_macro::service;

use crate::{
    config::PasswordConfig,
    domain::{
        dto::auth::{RegisterRequest, UserResponse},
        entities::{access::AccessLog, users::User},
    },
    repositories::access::AccessLogRepository,
    repositories::users::UserRepository,
};
use crate::core::errors::AppError;

#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    accesslog_repo: Arc<AccessLogRepository>,
}

impl UserService {
    /// 새 사용자 등록
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 사용자명/이메일 중복
    /// * `AppError::InternalError` - 해싱 실패
    pub async fn register(&self, request: RegisterRequest) -> Result<UserResponse, AppError> {
        let bcrypt_cost = PasswordConfig::bcrypt_cost();

        let password_hash = hash(&request.password, bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        let user = User::new(
            request.username,
            request.email,
            request.display_name,
            password_hash,
            request.role,
        );

        let created = self.user_repo.create(user).await?;

        log::info!("새 사용자 등록: {} ({})", created.username, created.role);

        Ok(UserResponse::from(created))
    }

    /// 사용자명으로 프로필 조회
    ///
    /// 인증 컨텍스트의 주체(username)로 저장소에서 최신 정보를 읽습니다.
    pub async fn get_profile(&self, username: &str) -> Result<UserResponse, AppError> {
        let user = self.user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// 전체 사용자 목록 (관리자 전용)
    pub async fn list_users(&self, limit: i64) -> Result<Vec<UserResponse>, AppError> {
        let users = self.user_repo.find_all(limit).await?;

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// 로그인 성공 후처리: 접근 로그 기록 + 마지막 로그인 시각 갱신
    ///
    /// 감사 로그는 best-effort입니다. 실패는 경고 로그만 남기며
    /// 로그인 자체를 실패시키지 않습니다. 위임(Keycloak) 전략에서
    /// 로컬 계정이 없는 사용자는 기록을 생략합니다.
    pub async fn record_login(&self, username: &str, ip_address: String, user_agent: Option<String>) {
        let user = match self.user_repo.find_by_username(username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                log::debug!("접근 로그 생략 - 로컬 계정 없음: {}", username);
                return;
            }
            Err(e) => {
                log::warn!("접근 로그 중 사용자 조회 실패 - 사용자: {}, 에러: {}", username, e);
                return;
            }
        };

        let Some(user_id) = user.id else {
            return;
        };

        let log_entry = AccessLog::new(user_id, user.username.clone(), ip_address, user_agent);

        if let Err(e) = self.accesslog_repo.create(log_entry).await {
            log::warn!("접근 로그 기록 실패 - 사용자: {}, 에러: {}", username, e);
        }

        if let Err(e) = self.user_repo.touch_last_login(username).await {
            log::warn!("마지막 로그인 시각 갱신 실패 - 사용자: {}, 에러: {}", username, e);
        }
    }

    /// 최근 접근 로그 조회 (관리자 전용)
    pub async fn recent_access_logs(&self, limit: i64) -> Result<Vec<AccessLog>, AppError> {
        self.accesslog_repo.find_recent(limit).await
    }
}
