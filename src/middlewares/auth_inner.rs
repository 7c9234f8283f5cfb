//! AuthMiddleware 인증 로직의 핵심 기능
//!
//! 요청당 정확히 한 번 실행되는 상태 없는 gate입니다.
//! 요청 간 공유하는 가변 상태가 없으므로 락이 필요 없습니다.

use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;
use crate::core::AppError;
use crate::domain::models::auth::{AuthMode, AuthenticatedUser, RequiredRole};
use crate::services::auth::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub required_role: Option<RequiredRole>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();
        let required_role = self.required_role.clone();

        Box::pin(async move {
            let token_service = TokenService::instance();

            // Authorization 헤더에서 토큰 추출 + 검증 시도
            // 위임 전략에서는 여기서 프로바이더 왕복이 발생합니다.
            // 클라이언트가 연결을 끊으면 이 future가 drop되면서
            // 진행 중인 프로바이더 호출도 함께 취소됩니다.
            let auth_result = extract_identity_from_request(&req, &token_service).await;

            match (&mode, auth_result) {
                // Required 모드에서 인증 실패 → 401
                (AuthMode::Required, Err(err)) => {
                    log::warn!("인증 실패: {}", err);
                    let response = HttpResponse::Unauthorized()
                        .json(serde_json::json!({
                            "error": "authentication_required",
                            "message": "유효한 인증 토큰이 필요합니다",
                            "details": serde_json::Value::Null
                        }));
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response)
                        .map_into_right_body();
                    return Ok(res);
                },
                // Required 모드에서 인증 성공 → 역할 정책 검사
                (AuthMode::Required, Ok(user)) => {
                    if let Some(ref required) = required_role {
                        if !required.is_satisfied(&user.roles) {
                            log::warn!("권한 부족: 사용자 {} ({:?}), 필요 권한: {:?}",
                                user.username, user.roles, required);
                            let response = HttpResponse::Forbidden()
                                .json(serde_json::json!({
                                    "error": "insufficient_permissions",
                                    "message": "접근 권한이 부족합니다",
                                    "details": serde_json::Value::Null
                                }));
                            let (req, _) = req.into_parts();
                            let res = ServiceResponse::new(req, response)
                                .map_into_right_body();
                            return Ok(res);
                        }
                    }

                    // 신원을 Request Extensions에 부착
                    req.extensions_mut().insert(user.clone());
                    log::debug!("인증 성공: 사용자 {}", user.username);
                },
                // Optional 모드에서 인증 성공 → 신원만 부착
                (AuthMode::Optional, Ok(user)) => {
                    req.extensions_mut().insert(user.clone());
                    log::debug!("선택적 인증 성공: 사용자 {}", user.username);
                },
                // Optional 모드에서 인증 실패 → 신원 없이 진행
                // (헤더 부재/형식 오류/검증 실패 어느 것도 요청을 중단하지 않음)
                (AuthMode::Optional, Err(_)) => {
                    log::debug!("선택적 인증: 유효한 토큰 없음, 요청 진행");
                },
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 요청에서 bearer 토큰을 추출하고 신원을 해석
///
/// 헤더 부재와 형식 오류는 검증 실패와 동일하게 처리됩니다.
/// 이 함수는 에러를 반환할 뿐 요청을 중단하지 않으며,
/// 중단 여부는 호출자의 인증 모드가 결정합니다.
async fn extract_identity_from_request(
    req: &ServiceRequest,
    token_service: &TokenService,
) -> Result<AuthenticatedUser, AppError> {
    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = token_service.extract_bearer_token(auth_header)?;

    token_service.validate_token(token).await
}
