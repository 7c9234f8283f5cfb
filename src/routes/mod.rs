//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//! 라우트 → 필요 역할 집합의 정적 정책이 이 모듈에 선언됩니다.
//!
//! # 접근 정책 요약
//!
//! | 라우트 | 정책 |
//! |--------|------|
//! | `POST /api/auth/login`, `/register`, `GET /api/auth/validate` | 공개 |
//! | `GET /api/auth/me` | 인증 필요 |
//! | `GET /api/videos/public` | 공개 |
//! | `POST /api/videos/upload`, `GET /api/videos/my-videos` | TEACHER 또는 ADMIN |
//! | `GET /api/videos/{id}`, `/{id}/viewers` | 인증 필요 (viewers는 업로더/관리자 검사 추가) |
//! | `GET /api/videos/stream/{id}` | 선택적 인증 (영상 단위로 결정) |
//! | `/api/chat/*` | 인증 필요 |
//! | `/api/admin/*` | ADMIN |
//! | `GET /health` | 공개 |

use crate::domain::entities::users::Role;
use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use chrono;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new().configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_auth_routes(cfg);
    configure_video_routes(cfg);
    configure_chat_routes(cfg);
    configure_admin_routes(cfg);
}

/// 인증 관련 라우트를 설정합니다
///
/// 로그인/가입/토큰 검증은 인증을 위한 엔드포인트이므로 공개입니다.
/// 프로필 조회만 인증을 요구합니다.
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    // Public routes
    cfg.service(
        web::scope("/api/auth")
            .service(handlers::auth::login)
            .service(handlers::auth::register)
            .service(handlers::auth::validate_token)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware::required())
                    .service(handlers::auth::get_current_user)
            )
    );
}

/// 영상 관련 라우트를 설정합니다
///
/// 업로드는 교사/관리자 전용이고, 공개 목록은 유일한 공개 라우트입니다.
/// 스트리밍은 선택적 인증으로 등록되어 신원 부재가 요청을 중단하지 않으며,
/// 접근 허용 여부는 영상의 공개 설정에 따라 핸들러에서 결정됩니다.
fn configure_video_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/videos")
            // Public listing
            .service(handlers::videos::public_videos)
            // Streaming (per-video authorization)
            .service(
                web::scope("/stream")
                    .wrap(AuthMiddleware::optional())
                    .service(handlers::videos::stream_video)
            )
            // Teacher/Admin routes
            .service(
                web::scope("/upload")
                    .wrap(AuthMiddleware::required_with_roles(vec![Role::Teacher, Role::Admin]))
                    .service(handlers::videos::upload_video)
            )
            .service(
                web::scope("/my-videos")
                    .wrap(AuthMiddleware::required_with_roles(vec![Role::Teacher, Role::Admin]))
                    .service(handlers::videos::my_videos)
            )
            // Authenticated metadata routes (catch-all은 마지막에)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware::required())
                    .service(handlers::videos::video_viewers)
                    .service(handlers::videos::get_video)
            )
    );
}

/// 채팅 관련 라우트를 설정합니다
///
/// 모든 채팅 엔드포인트는 인증이 필요합니다.
fn configure_chat_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/chat")
            .wrap(AuthMiddleware::required())
            .service(handlers::chat::send_message)
            .service(handlers::chat::get_unread)
            .service(handlers::chat::stream_messages)
            .service(handlers::chat::get_conversation)
            .service(handlers::chat::mark_read)
    );
}

/// 관리자 라우트를 설정합니다
fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin")
            .wrap(AuthMiddleware::required_with_role(Role::Admin))
            .service(handlers::admin::list_users)
            .service(handlers::admin::list_access_logs)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "lecture_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "dependency_injection": "Singleton Macro"
        }
    }))
}
