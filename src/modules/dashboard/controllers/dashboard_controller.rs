use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::{Datelike, TimeZone, Utc};

use crate::core::error::AppError;
use crate::middleware::auth::Session;
use crate::modules::dashboard::repositories::StatsRepository;

/// Dashboard aggregates
/// GET /dashboard/stats
pub async fn get_stats(
    repo: web::Data<Arc<StatsRepository>>,
    _session: Session,
) -> Result<HttpResponse, AppError> {
    let now = Utc::now();
    let month_start = Utc
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::internal("Failed to compute month start"))?;

    let stats = repo.stats(month_start).await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// Configure dashboard routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/dashboard").route("/stats", web::get().to(get_stats)));
}
