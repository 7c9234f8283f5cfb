//! 업로드 파일명 생성 유틸리티
//!
//! 클라이언트가 보낸 파일명은 절대 디스크 경로에 쓰지 않습니다.
//! 확장자만 보존한 UUID 기반 파일명을 생성하여 경로 조작과
//! 이름 충돌을 동시에 차단합니다.

use uuid::Uuid;

/// 원본 파일명에서 확장자만 추출하여 UUID 기반 저장 파일명을 생성합니다.
///
/// 확장자는 영숫자만 허용하며, 없거나 이상한 경우 확장자 없이 저장합니다.
///
/// # Examples
///
/// ```rust,ignore
/// let stored = generate_stored_name("강의 1주차.mp4");
/// // "550e8400-e29b-41d4-a716-446655440000.mp4"
/// ```
pub fn generate_stored_name(original_name: &str) -> String {
    let id = Uuid::new_v4();

    match sanitized_extension(original_name) {
        Some(ext) => format!("{}.{}", id, ext),
        None => id.to_string(),
    }
}

/// 원본 파일명에서 안전한 확장자를 추출합니다.
fn sanitized_extension(original_name: &str) -> Option<String> {
    let ext = original_name.rsplit_once('.')?.1;

    if ext.is_empty() || ext.len() > 8 {
        return None;
    }

    if ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext.to_ascii_lowercase())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_preserved() {
        let name = generate_stored_name("lecture.mp4");
        assert!(name.ends_with(".mp4"));
    }

    #[test]
    fn test_extension_is_lowercased() {
        let name = generate_stored_name("LECTURE.MP4");
        assert!(name.ends_with(".mp4"));
    }

    #[test]
    fn test_original_name_is_never_reused() {
        let name = generate_stored_name("lecture.mp4");
        assert!(!name.contains("lecture"));
    }

    #[test]
    fn test_no_extension() {
        let name = generate_stored_name("lecture");
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_path_traversal_extension_is_dropped() {
        let name = generate_stored_name("evil.../../etc/passwd");
        assert!(!name.contains('/'));
        assert!(!name.contains(".."));
    }

    #[test]
    fn test_generated_names_are_unique() {
        let a = generate_stored_name("a.mp4");
        let b = generate_stored_name("a.mp4");
        assert_ne!(a, b);
    }
}
