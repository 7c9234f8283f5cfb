//! 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 bearer 토큰을 검증하고
//! 해석된 신원을 요청 컨텍스트에 부착합니다.
//!
//! 라우트 → 필요 역할 집합의 정적 정책은 `routes` 모듈에서
//! 이 미들웨어의 생성자들로 선언됩니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::entities::users::Role;
use crate::domain::models::auth::{AuthMode, RequiredRole};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 인증 미들웨어
pub struct AuthMiddleware {
    /// 인증 모드 (Required/Optional)
    mode: AuthMode,
    /// 접근에 필요한 역할 (선택사항)
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    /// 새로운 인증 미들웨어 생성
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
        }
    }

    /// 역할 요구사항이 있는 인증 미들웨어 생성
    pub fn new_with_role(mode: AuthMode, required_role: RequiredRole) -> Self {
        Self {
            mode,
            required_role: Some(required_role),
        }
    }

    /// 필수 인증 미들웨어 생성 (역할 무관, 인증만 요구)
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 선택적 인증 미들웨어 생성
    ///
    /// 유효한 토큰이 있으면 신원을 부착하고, 없거나 잘못된 경우에도
    /// 요청을 중단하지 않습니다. 접근 허용 여부는 하위 핸들러가
    /// 리소스 단위로 결정합니다.
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    /// 특정 역할 요구 인증 미들웨어 생성
    pub fn required_with_role(role: Role) -> Self {
        Self::new_with_role(AuthMode::Required, RequiredRole::Single(role))
    }

    /// 복수 역할 중 하나 요구 인증 미들웨어 생성
    pub fn required_with_roles(roles: Vec<Role>) -> Self {
        Self::new_with_role(AuthMode::Required, RequiredRole::Any(roles))
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::models::auth::AuthenticatedUser;
    use super::*;

    #[test]
    fn test_required_role_single() {
        let required = RequiredRole::Single(Role::Admin);
        let admin_roles = vec![Role::Admin];
        let student_roles = vec![Role::Student];

        assert!(required.is_satisfied(&admin_roles));
        assert!(!required.is_satisfied(&student_roles));
    }

    #[test]
    fn test_required_role_any() {
        let required = RequiredRole::Any(vec![Role::Teacher, Role::Admin]);
        let teacher_roles = vec![Role::Teacher];
        let admin_roles = vec![Role::Admin];
        let student_roles = vec![Role::Student];

        assert!(required.is_satisfied(&teacher_roles));
        assert!(required.is_satisfied(&admin_roles));
        assert!(!required.is_satisfied(&student_roles));
    }

    #[test]
    fn test_authenticated_user_has_role() {
        let user = AuthenticatedUser {
            username: "teacher".to_string(),
            email: "teacher@example.com".to_string(),
            display_name: "김선생".to_string(),
            roles: vec![Role::Teacher],
        };

        assert!(user.has_role(Role::Teacher));
        assert!(!user.has_role(Role::Student));
        assert!(!user.is_admin());
    }

    #[test]
    fn test_authenticated_user_has_any_role() {
        let user = AuthenticatedUser {
            username: "student1".to_string(),
            email: "student1@example.com".to_string(),
            display_name: "학생1".to_string(),
            roles: vec![Role::Student],
        };

        assert!(user.has_any_role(&[Role::Student, Role::Teacher]));
        assert!(!user.has_any_role(&[Role::Teacher, Role::Admin]));
        assert!(!user.is_admin());
    }
}
