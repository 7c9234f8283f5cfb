//! 영상 관련 요청 DTO

use serde::Deserialize;
use validator::Validate;

/// 영상 업로드 메타데이터
///
/// 업로드는 multipart 요청이므로 이 구조체는 JSON 본문이 아니라
/// 텍스트 파트(`title`, `description`, `is_public`, `is_live`)에서
/// 조립된 후 검증됩니다.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct VideoUploadMeta {
    #[validate(length(min = 1, max = 200, message = "제목을 입력해주세요"))]
    pub title: String,

    #[validate(length(max = 2000, message = "설명은 2000자를 넘을 수 없습니다"))]
    pub description: String,

    pub is_public: bool,

    pub is_live: bool,
}

impl VideoUploadMeta {
    /// multipart 텍스트 파트 하나를 반영합니다.
    ///
    /// 알 수 없는 파트 이름은 조용히 무시합니다 (프론트엔드 호환성).
    pub fn apply_field(&mut self, name: &str, value: String) {
        match name {
            "title" => self.title = value,
            "description" => self.description = value,
            "is_public" => self.is_public = value.trim().eq_ignore_ascii_case("true"),
            "is_live" => self.is_live = value.trim().eq_ignore_ascii_case("true"),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_field_parses_booleans() {
        let mut meta = VideoUploadMeta::default();
        meta.apply_field("title", "1주차 강의".to_string());
        meta.apply_field("is_public", "true".to_string());
        meta.apply_field("is_live", "FALSE".to_string());

        assert_eq!(meta.title, "1주차 강의");
        assert!(meta.is_public);
        assert!(!meta.is_live);
    }

    #[test]
    fn test_unknown_field_is_ignored() {
        let mut meta = VideoUploadMeta::default();
        meta.apply_field("unexpected", "value".to_string());

        assert!(meta.title.is_empty());
    }

    #[test]
    fn test_empty_title_fails_validation() {
        let meta = VideoUploadMeta::default();
        assert!(meta.validate().is_err());
    }
}
