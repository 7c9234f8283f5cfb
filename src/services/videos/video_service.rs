//! 영상 서비스
//!
//! 업로드 메타데이터 영속화, 목록 조회, 스트리밍 접근 제어와
//! 학생별 접근 기록을 담당합니다.
//!
//! 실제 파일 쓰기는 multipart 스트림을 소유한 핸들러 계층에서 수행되고,
//! 이 서비스는 저장이 끝난 파일 경로를 받아 메타데이터를 관리합니다.

use std::path::PathBuf;
use std::sync::Arc;

use singleton_macro::service;

use crate::{
    domain::{
        dto::videos::{VideoAccessResponse, VideoResponse, VideoUploadMeta},
        entities::videos::Video,
    },
    domain::models::auth::AuthenticatedUser,
    repositories::users::UserRepository,
    repositories::videos::{VideoAccessRepository, VideoRepository},
};
use crate::core::errors::AppError;

#[service(name = "video")]
pub struct VideoService {
    video_repo: Arc<VideoRepository>,
    videoaccess_repo: Arc<VideoAccessRepository>,
    user_repo: Arc<UserRepository>,
}

impl VideoService {
    /// 업로드된 영상의 메타데이터 저장
    ///
    /// 파일은 이미 `stored_path`에 기록된 상태입니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 업로더 계정이 저장소에 없는 경우
    pub async fn register_upload(
        &self,
        meta: VideoUploadMeta,
        stored_path: String,
        uploader: &AuthenticatedUser,
    ) -> Result<VideoResponse, AppError> {
        let teacher = self.user_repo
            .find_by_username(&uploader.username)
            .await?
            .ok_or_else(|| AppError::NotFound("업로더 계정을 찾을 수 없습니다".to_string()))?;

        let teacher_id = teacher.id
            .ok_or_else(|| AppError::InternalError("업로더 계정에 ID가 없습니다".to_string()))?;

        let video = Video::new(
            meta.title,
            meta.description,
            stored_path,
            teacher_id,
            teacher.display_name,
            meta.is_public,
            meta.is_live,
        );

        let created = self.video_repo.create(video).await?;

        log::info!("영상 업로드 완료: {} (공개: {}, 업로더: {})",
            created.title, created.is_public, uploader.username);

        Ok(VideoResponse::from(created))
    }

    /// 공개 영상 목록
    pub async fn list_public(&self) -> Result<Vec<VideoResponse>, AppError> {
        let videos = self.video_repo.find_public().await?;

        Ok(videos.into_iter().map(VideoResponse::from).collect())
    }

    /// 호출자가 업로드한 영상 목록
    pub async fn list_my_videos(&self, caller: &AuthenticatedUser) -> Result<Vec<VideoResponse>, AppError> {
        let teacher = self.user_repo
            .find_by_username(&caller.username)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        let teacher_id = teacher.id
            .ok_or_else(|| AppError::InternalError("사용자 계정에 ID가 없습니다".to_string()))?;

        let videos = self.video_repo.find_by_teacher(&teacher_id).await?;

        Ok(videos.into_iter().map(VideoResponse::from).collect())
    }

    /// 영상 메타데이터 조회
    pub async fn get_video(&self, id: &str) -> Result<VideoResponse, AppError> {
        let video = self.video_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("영상을 찾을 수 없습니다".to_string()))?;

        Ok(VideoResponse::from(video))
    }

    /// 스트리밍을 위한 접근 제어 + 파일 경로 해석
    ///
    /// 접근 정책은 영상 단위로 결정됩니다:
    ///
    /// - 공개 영상: 누구나 스트리밍 가능
    /// - 비공개 영상: 인증된 신원 필수 (부재 시 401)
    ///
    /// 인증된 접근은 (영상, 학생) 기록을 upsert합니다.
    /// 기록 실패는 스트리밍을 막지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 영상 메타데이터 없음
    /// * `AppError::AuthenticationError` - 비공개 영상에 비인증 접근
    pub async fn resolve_stream(
        &self,
        id: &str,
        viewer: Option<&AuthenticatedUser>,
    ) -> Result<PathBuf, AppError> {
        let video = self.video_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("영상을 찾을 수 없습니다".to_string()))?;

        if !video.is_public && viewer.is_none() {
            return Err(AppError::AuthenticationError(
                "이 영상을 시청하려면 로그인이 필요합니다".to_string()
            ));
        }

        if let Some(viewer) = viewer {
            self.track_access(&video, viewer).await;
        }

        Ok(PathBuf::from(video.file_path))
    }

    /// 특정 영상의 학생별 접근 기록 (업로더/관리자 전용)
    ///
    /// # Errors
    ///
    /// * `AppError::AuthorizationError` - 업로더 본인도 관리자도 아닌 경우
    pub async fn list_viewers(
        &self,
        id: &str,
        caller: &AuthenticatedUser,
    ) -> Result<Vec<VideoAccessResponse>, AppError> {
        let video = self.video_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("영상을 찾을 수 없습니다".to_string()))?;

        if !caller.is_admin() {
            let caller_entity = self.user_repo
                .find_by_username(&caller.username)
                .await?
                .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

            if caller_entity.id != Some(video.teacher_id) {
                return Err(AppError::AuthorizationError(
                    "본인이 업로드한 영상의 기록만 조회할 수 있습니다".to_string()
                ));
            }
        }

        let video_id = video.id
            .ok_or_else(|| AppError::InternalError("영상 메타데이터에 ID가 없습니다".to_string()))?;

        let accesses = self.videoaccess_repo.find_by_video(&video_id).await?;

        Ok(accesses.into_iter().map(VideoAccessResponse::from).collect())
    }

    /// 시청 기록 upsert (best-effort)
    async fn track_access(&self, video: &Video, viewer: &AuthenticatedUser) {
        let Some(video_id) = video.id else {
            return;
        };

        let student = match self.user_repo.find_by_username(&viewer.username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                // 위임 전략에서 로컬 저장소에 없는 계정은 기록을 남기지 않습니다
                log::debug!("시청 기록 생략 - 로컬 계정 없음: {}", viewer.username);
                return;
            }
            Err(e) => {
                log::warn!("시청 기록 중 사용자 조회 실패: {}", e);
                return;
            }
        };

        let Some(student_id) = student.id else {
            return;
        };

        if let Err(e) = self.videoaccess_repo
            .record_access(&video_id, &student_id, &student.display_name)
            .await
        {
            log::warn!("시청 기록 저장 실패 - 영상: {}, 학생: {}, 에러: {}",
                video_id.to_hex(), viewer.username, e);
        }
    }
}
