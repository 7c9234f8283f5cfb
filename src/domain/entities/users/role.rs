//! 플랫폼 역할 정의
//!
//! 역할은 라우트 접근을 결정하는 거친 단위의 인가 태그입니다.
//! 학생은 시청, 교사는 업로드, 관리자는 전체 운영 기능에 접근합니다.

use serde::{Deserialize, Serialize};

/// 사용자 역할
///
/// 와이어 포맷은 대문자(`"STUDENT"`, `"TEACHER"`, `"ADMIN"`)를 사용합니다.
/// Keycloak realm 역할과 로컬 JWT 클레임 모두 동일한 표기를 따릅니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    /// 와이어 포맷 표기 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Teacher => "TEACHER",
            Role::Admin => "ADMIN",
        }
    }

    /// 문자열에서 역할을 파싱합니다 (대소문자 무시).
    ///
    /// Keycloak realm 역할 목록에는 `offline_access` 같은 시스템 역할이
    /// 섞여 있으므로, 알 수 없는 값은 에러가 아니라 `None`으로 처리합니다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "STUDENT" => Some(Role::Student),
            "TEACHER" => Some(Role::Teacher),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Role {
    /// 프로바이더가 역할을 제공하지 않을 때의 기본 역할
    fn default() -> Self {
        Role::Student
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Role::parse("teacher"), Some(Role::Teacher));
        assert_eq!(Role::parse("TEACHER"), Some(Role::Teacher));
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
    }

    #[test]
    fn test_unknown_role_is_none() {
        assert_eq!(Role::parse("offline_access"), None);
        assert_eq!(Role::parse("uma_authorization"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_wire_format_is_uppercase() {
        let json = serde_json::to_string(&Role::Student).unwrap();
        assert_eq!(json, "\"STUDENT\"");

        let parsed: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(parsed, Role::Admin);
    }

    #[test]
    fn test_default_role_is_student() {
        assert_eq!(Role::default(), Role::Student);
    }
}
