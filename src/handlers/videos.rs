//! Video HTTP Handlers
//!
//! 영상 업로드(multipart), 목록 조회, 스트리밍, 시청 기록 엔드포인트를
//! 처리합니다. 파일은 로컬 파일시스템에 UUID 파일명으로 저장되고
//! 스트리밍은 Range 요청을 지원합니다 (`actix-files::NamedFile`).

use std::io::Write;
use std::path::PathBuf;

use actix_files::NamedFile;
use actix_multipart::{Field, Multipart};
use actix_web::http::header::{ContentDisposition, DispositionType};
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use futures_util::TryStreamExt;
use validator::Validate;

use crate::config::StorageConfig;
use crate::domain::dto::videos::VideoUploadMeta;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::videos::VideoService;
use crate::utils::file_name::generate_stored_name;
use crate::core::errors::AppError;

/// 텍스트 파트의 최대 허용 크기 (8KB)
const MAX_TEXT_FIELD_BYTES: usize = 8 * 1024;

/// 영상 업로드 핸들러
///
/// multipart 폼에서 `file` 파트와 메타데이터 텍스트 파트
/// (`title`, `description`, `is_public`, `is_live`)를 읽습니다.
/// 파일은 스트리밍으로 디스크에 기록되며 전체를 메모리에 올리지 않습니다.
///
/// # Endpoint
/// `POST /api/videos/upload` (TEACHER/ADMIN 전용)
#[post("")]
pub async fn upload_video(
    user: AuthenticatedUser,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let mut meta = VideoUploadMeta::default();
    let mut stored_file: Option<(PathBuf, String)> = None;

    while let Some(mut field) = payload.try_next().await
        .map_err(|e| AppError::ValidationError(format!("multipart 요청 파싱 실패: {}", e)))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "file" {
            if stored_file.is_some() {
                return Err(AppError::ValidationError("file 파트는 하나만 허용됩니다".to_string()));
            }

            let original_name = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .unwrap_or("")
                .to_string();

            let stored_name = generate_stored_name(&original_name);
            let path = PathBuf::from(StorageConfig::upload_dir()).join(&stored_name);

            let written = save_field_to_disk(&mut field, path.clone()).await?;

            if written == 0 {
                cleanup_file(&path).await;
                return Err(AppError::ValidationError("빈 파일은 업로드할 수 없습니다".to_string()));
            }

            stored_file = Some((path, stored_name));
        } else {
            let value = read_text_field(&mut field).await?;
            meta.apply_field(&field_name, value);
        }
    }

    let Some((path, _stored_name)) = stored_file else {
        return Err(AppError::ValidationError("file 파트가 필요합니다".to_string()));
    };

    if let Err(e) = meta.validate() {
        // 메타데이터가 잘못된 업로드는 디스크에 남기지 않습니다
        cleanup_file(&path).await;
        return Err(AppError::ValidationError(e.to_string()));
    }

    let video_service = VideoService::instance();
    let stored_path = path.to_string_lossy().to_string();

    let response = match video_service.register_upload(meta, stored_path, &user).await {
        Ok(response) => response,
        Err(e) => {
            cleanup_file(&path).await;
            return Err(e);
        }
    };

    Ok(HttpResponse::Created().json(response))
}

/// 공개 영상 목록 핸들러
///
/// 유일한 공개 목록 엔드포인트입니다. 인증이 필요 없습니다.
///
/// # Endpoint
/// `GET /api/videos/public`
#[get("/public")]
pub async fn public_videos() -> Result<HttpResponse, AppError> {
    let video_service = VideoService::instance();
    let videos = video_service.list_public().await?;

    Ok(HttpResponse::Ok().json(videos))
}

/// 내 업로드 목록 핸들러
///
/// # Endpoint
/// `GET /api/videos/my-videos` (TEACHER/ADMIN 전용)
#[get("")]
pub async fn my_videos(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let video_service = VideoService::instance();
    let videos = video_service.list_my_videos(&user).await?;

    Ok(HttpResponse::Ok().json(videos))
}

/// 영상 메타데이터 조회 핸들러
///
/// # Endpoint
/// `GET /api/videos/{id}` (인증 필요)
#[get("/{id}")]
pub async fn get_video(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let video_service = VideoService::instance();
    let video = video_service.get_video(&path).await?;

    Ok(HttpResponse::Ok().json(video))
}

/// 영상 스트리밍 핸들러
///
/// 선택적 인증 스코프에 등록됩니다: 유효한 토큰이 있으면 신원이
/// 부착되어 시청 기록이 남고, 없으면 공개 영상만 스트리밍됩니다.
/// Range 요청을 지원하므로 탐색(seek)이 가능합니다.
///
/// # Endpoint
/// `GET /api/videos/stream/{id}`
#[get("/{id}")]
pub async fn stream_video(
    req: HttpRequest,
    path: web::Path<String>,
    viewer: Option<AuthenticatedUser>,
) -> Result<HttpResponse, AppError> {
    let video_service = VideoService::instance();
    let file_path = video_service.resolve_stream(&path, viewer.as_ref()).await?;

    let file = NamedFile::open_async(&file_path)
        .await
        .map_err(|e| {
            log::error!("영상 파일 열기 실패 - 경로: {}, 에러: {}", file_path.display(), e);
            AppError::NotFound("영상 파일을 찾을 수 없습니다".to_string())
        })?;

    let response = file
        .set_content_disposition(ContentDisposition {
            disposition: DispositionType::Inline,
            parameters: vec![],
        })
        .into_response(&req);

    Ok(response)
}

/// 영상 시청 기록 조회 핸들러 (업로더/관리자 전용)
///
/// # Endpoint
/// `GET /api/videos/{id}/viewers`
#[get("/{id}/viewers")]
pub async fn video_viewers(
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let video_service = VideoService::instance();
    let viewers = video_service.list_viewers(&path, &user).await?;

    Ok(HttpResponse::Ok().json(viewers))
}

/// multipart 파일 파트를 디스크에 스트리밍으로 기록
///
/// 파일 I/O는 블로킹이므로 `web::block`으로 워커 풀 밖에서 수행합니다.
///
/// # Returns
///
/// * `Ok(u64)` - 기록된 바이트 수
async fn save_field_to_disk(field: &mut Field, path: PathBuf) -> Result<u64, AppError> {
    let mut file = {
        let path = path.clone();
        web::block(move || std::fs::File::create(path))
            .await
            .map_err(|e| AppError::InternalError(format!("블로킹 작업 실패: {}", e)))?
            .map_err(|e| AppError::InternalError(format!("업로드 파일 생성 실패: {}", e)))?
    };

    let mut written: u64 = 0;

    while let Some(chunk) = field.try_next().await
        .map_err(|e| AppError::ValidationError(format!("업로드 스트림 오류: {}", e)))?
    {
        written += chunk.len() as u64;

        file = web::block(move || file.write_all(&chunk).map(|_| file))
            .await
            .map_err(|e| AppError::InternalError(format!("블로킹 작업 실패: {}", e)))?
            .map_err(|e| AppError::InternalError(format!("업로드 파일 쓰기 실패: {}", e)))?;
    }

    Ok(written)
}

/// multipart 텍스트 파트를 문자열로 수집
async fn read_text_field(field: &mut Field) -> Result<String, AppError> {
    let mut data = Vec::new();

    while let Some(chunk) = field.try_next().await
        .map_err(|e| AppError::ValidationError(format!("업로드 스트림 오류: {}", e)))?
    {
        if data.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
            return Err(AppError::ValidationError("텍스트 필드가 너무 큽니다".to_string()));
        }
        data.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&data).into_owned())
}

/// 실패한 업로드의 파일 정리 (best-effort)
async fn cleanup_file(path: &PathBuf) {
    let path = path.clone();
    let result = web::block(move || std::fs::remove_file(&path)).await;

    if let Ok(Err(e)) = result {
        log::warn!("업로드 파일 정리 실패: {}", e);
    }
}
