//! Authentication HTTP Handlers
//!
//! 로그인, 회원가입, 토큰 검증, 프로필 조회 엔드포인트를 처리합니다.
//! 토큰 발급/검증은 배포 설정에 따라 로컬 서명 또는 Keycloak 위임으로
//! 수행되며, 핸들러는 전략을 구분하지 않습니다.

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::domain::dto::auth::{LoginRequest, LoginResponse, RegisterRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::auth::TokenService;
use crate::services::users::UserService;
use crate::core::errors::AppError;

/// 로그인 핸들러
///
/// 자격 증명을 검증하고 bearer 토큰을 발급합니다.
/// 실패 원인(비밀번호 불일치/미존재 계정/프로바이더 장애)은
/// 클라이언트에 구분되어 전달되지 않습니다.
///
/// # Endpoint
/// `POST /api/auth/login`
#[post("/login")]
pub async fn login(
    req: HttpRequest,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let token_service = TokenService::instance();
    let user_service = UserService::instance();

    let session = token_service
        .login(&payload.username, &payload.password)
        .await?;

    log::info!("로그인 성공 - 사용자: {} (전략: {})",
        session.identity.username, token_service.strategy().as_str());

    // 접근 로그 + 마지막 로그인 시각은 best-effort
    let ip = req.connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();
    let user_agent = req.headers()
        .get(actix_web::http::header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    user_service.record_login(&session.identity.username, ip, user_agent).await;

    let response = LoginResponse::new(&session.identity, session.access_token.clone());

    Ok(HttpResponse::Ok().json(response))
}

/// 회원가입 핸들러
///
/// 로컬 사용자 저장소에 계정을 생성합니다. 역할 미지정 시 학생으로
/// 생성됩니다. 가입 후 토큰이 필요하면 로그인 엔드포인트를 사용합니다.
///
/// # Endpoint
/// `POST /api/auth/register`
#[post("/register")]
pub async fn register(
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user_service = UserService::instance();
    let created = user_service.register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(created))
}

/// 토큰 검증 엔드포인트
///
/// 클라이언트가 보유한 bearer 토큰의 유효성을 확인합니다.
/// 실패 시 이 엔드포인트만의 `{valid:false}` 형식으로 응답합니다.
///
/// # Endpoint
/// `GET /api/auth/validate`
#[get("/validate")]
pub async fn validate_token(
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let token_service = TokenService::instance();

    let identity = match resolve_bearer_identity(&req, &token_service).await {
        Ok(identity) => identity,
        Err(e) => {
            log::debug!("토큰 검증 엔드포인트 실패: {}", e);
            return Ok(HttpResponse::Unauthorized().json(json!({
                "valid": false,
                "message": "유효하지 않은 토큰입니다"
            })));
        }
    };

    Ok(HttpResponse::Ok().json(json!({
        "valid": true,
        "username": identity.username,
        "email": identity.email
    })))
}

/// 현재 인증된 사용자 정보 조회 엔드포인트
///
/// 인증 미들웨어를 거친 요청에서 저장소의 최신 프로필을 반환합니다.
///
/// # Endpoint
/// `GET /api/auth/me`
#[get("/me")]
pub async fn get_current_user(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user_service = UserService::instance();
    let profile = user_service.get_profile(&user.username).await?;

    Ok(HttpResponse::Ok().json(profile))
}

/// Authorization 헤더에서 토큰을 추출해 신원을 해석
async fn resolve_bearer_identity(
    req: &HttpRequest,
    token_service: &TokenService,
) -> Result<AuthenticatedUser, AppError> {
    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = token_service.extract_bearer_token(auth_header)?;

    token_service.validate_token(token).await
}
