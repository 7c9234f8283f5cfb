//! 영상 관련 응답 DTO

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::videos::{Video, VideoAccess};

/// 영상 메타데이터 응답
///
/// 디스크 저장 경로(`file_path`)는 의도적으로 제외합니다.
/// 클라이언트는 스트리밍 엔드포인트를 통해서만 파일에 접근합니다.
#[derive(Debug, Serialize)]
pub struct VideoResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_path: Option<String>,
    pub teacher_id: String,
    pub teacher_name: String,
    pub duration: i64,
    pub is_live: bool,
    pub is_public: bool,
    pub uploaded_at: DateTime<Utc>,
}

impl From<Video> for VideoResponse {
    fn from(video: Video) -> Self {
        Self {
            id: video.id_string().unwrap_or_default(),
            title: video.title,
            description: video.description,
            thumbnail_path: video.thumbnail_path,
            teacher_id: video.teacher_id.to_hex(),
            teacher_name: video.teacher_name,
            duration: video.duration,
            is_live: video.is_live,
            is_public: video.is_public,
            uploaded_at: video.uploaded_at.to_chrono(),
        }
    }
}

/// 학생별 시청 기록 응답 (교사 대시보드용)
#[derive(Debug, Serialize)]
pub struct VideoAccessResponse {
    pub student_id: String,
    pub student_name: String,
    pub access_time: DateTime<Utc>,
    pub watched_duration: i64,
    pub completed: bool,
}

impl From<VideoAccess> for VideoAccessResponse {
    fn from(access: VideoAccess) -> Self {
        Self {
            student_id: access.student_id.to_hex(),
            student_name: access.student_name,
            access_time: access.access_time.to_chrono(),
            watched_duration: access.watched_duration,
            completed: access.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_video_response_hides_file_path() {
        let video = Video::new(
            "1주차 강의".to_string(),
            "오리엔테이션".to_string(),
            "uploads/videos/abc.mp4".to_string(),
            ObjectId::new(),
            "김선생".to_string(),
            true,
            false,
        );

        let response = VideoResponse::from(video);
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("file_path"));
        assert!(!json.contains("uploads/videos"));
        assert!(json.contains("1주차 강의"));
    }
}
