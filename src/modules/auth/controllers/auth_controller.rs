use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::auth::Session;
use crate::modules::auth::models::{CreateUserRequest, LoginRequest};
use crate::modules::auth::services::auth_service::AuthService;

/// Exchange credentials for a bearer token
/// POST /auth/login
pub async fn login(
    service: web::Data<Arc<AuthService>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = service.login(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Create a new account (admin only)
/// POST /auth/create-user
pub async fn create_user(
    service: web::Data<Arc<AuthService>>,
    session: Session,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    session.require_admin()?;

    let user = service.create_user(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Current account behind the presented token
/// GET /auth/me
pub async fn me(
    service: web::Data<Arc<AuthService>>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let user = service.current_user(&session.username).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Configure token-protected auth routes; login is registered separately
/// outside the auth middleware.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/create-user", web::post().to(create_user))
            .route("/me", web::get().to(me)),
    );
}
