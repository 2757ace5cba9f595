use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::auth::Session;
use crate::modules::profile::models::BusinessProfileInput;
use crate::modules::profile::repositories::ProfileRepository;

/// Fetch the business profile
/// GET /profile/business
pub async fn get_profile(
    repo: web::Data<Arc<ProfileRepository>>,
    _session: Session,
) -> Result<HttpResponse, AppError> {
    let profile = repo
        .get()
        .await?
        .ok_or_else(|| AppError::not_found("Business profile not configured"))?;

    Ok(HttpResponse::Ok().json(profile))
}

/// Create or replace the business profile
/// PUT /profile/business
pub async fn upsert_profile(
    repo: web::Data<Arc<ProfileRepository>>,
    _session: Session,
    request: web::Json<BusinessProfileInput>,
) -> Result<HttpResponse, AppError> {
    let input = request.into_inner();
    input.validate()?;

    let profile = repo.upsert(input).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Configure profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profile")
            .route("/business", web::get().to(get_profile))
            .route("/business", web::put().to(upsert_profile)),
    );
}
