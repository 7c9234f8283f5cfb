//! 사용자 엔티티
//!
//! MongoDB `users` 컬렉션에 저장되는 핵심 도메인 객체입니다.
//! username과 email은 유니크 인덱스로 보호됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::role::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub email: String,
    pub display_name: String,
    /// bcrypt 해시. 평문 비밀번호는 어디에도 저장하지 않습니다.
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새 사용자 생성 (팩토리 메서드)
    ///
    /// 역할이 지정되지 않으면 학생으로 생성합니다.
    pub fn new(
        username: String,
        email: String,
        display_name: String,
        password_hash: String,
        role: Option<Role>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username,
            email,
            display_name,
            password_hash,
            role: role.unwrap_or_default(),
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// ObjectId의 16진수 문자열 표현
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_teacher(&self) -> bool {
        matches!(self.role, Role::Teacher)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// 이 사용자의 역할 집합
    ///
    /// 저장소에는 단일 역할로 유지되지만, 인증 경계에서는
    /// 역할 집합(RoleSet)으로 취급됩니다.
    pub fn role_set(&self) -> Vec<Role> {
        vec![self.role]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults_to_student() {
        let user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "Alice".to_string(),
            "hashed".to_string(),
            None,
        );

        assert_eq!(user.role, Role::Student);
        assert!(user.is_active);
        assert!(user.id.is_none());
        assert!(user.last_login_at.is_none());
    }

    #[test]
    fn test_explicit_role_is_kept() {
        let user = User::new(
            "prof".to_string(),
            "prof@example.com".to_string(),
            "Professor".to_string(),
            "hashed".to_string(),
            Some(Role::Teacher),
        );

        assert!(user.is_teacher());
        assert_eq!(user.role_set(), vec![Role::Teacher]);
    }
}
