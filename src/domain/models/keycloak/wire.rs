//! Keycloak OIDC 엔드포인트의 wire 모델
//!
//! 위임 인증 전략이 주고받는 응답 형식입니다. 필요한 필드만 정의하고
//! 나머지는 무시합니다 (Keycloak 버전 간 호환성).

use serde::Deserialize;

/// 토큰 엔드포인트 응답 (password grant)
///
/// ```json
/// {
///   "access_token": "eyJhbGciOiJSUzI1NiIs...",
///   "expires_in": 300,
///   "token_type": "Bearer"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct KeycloakTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: String,
}

/// userinfo 엔드포인트 응답
///
/// 토큰 검증 시 매 요청마다 호출됩니다. realm 역할은 Keycloak 클라이언트
/// 설정에 따라 포함되지 않을 수 있으며, 그 경우 로컬 사용자 저장소의
/// 역할로 대체됩니다.
#[derive(Debug, Deserialize)]
pub struct KeycloakUserInfo {
    pub sub: String,
    pub preferred_username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub realm_access: Option<KeycloakRealmAccess>,
}

/// userinfo 응답의 realm 역할 목록
#[derive(Debug, Deserialize)]
pub struct KeycloakRealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_userinfo_with_realm_roles() {
        let json = r#"{
            "sub": "f3a1...",
            "preferred_username": "teacher",
            "email": "teacher@example.com",
            "name": "김선생",
            "realm_access": { "roles": ["TEACHER", "offline_access"] }
        }"#;

        let info: KeycloakUserInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.preferred_username, "teacher");
        assert_eq!(info.realm_access.unwrap().roles.len(), 2);
    }

    #[test]
    fn test_userinfo_without_roles() {
        // 역할 매핑이 비활성화된 클라이언트의 최소 응답
        let json = r#"{ "sub": "f3a1...", "preferred_username": "student1" }"#;

        let info: KeycloakUserInfo = serde_json::from_str(json).unwrap();
        assert!(info.realm_access.is_none());
        assert!(info.email.is_empty());
    }

    #[test]
    fn test_token_response_ignores_extra_fields() {
        let json = r#"{
            "access_token": "opaque-token",
            "expires_in": 300,
            "refresh_expires_in": 1800,
            "token_type": "Bearer",
            "not-before-policy": 0,
            "session_state": "abc",
            "scope": "email profile"
        }"#;

        let response: KeycloakTokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "opaque-token");
        assert_eq!(response.expires_in, 300);
    }
}
