use std::str::FromStr;
use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::middleware::auth::Session;
use crate::modules::invoices::models::{CreateInvoiceRequest, InvoiceStatus};
use crate::modules::invoices::services::invoice_service::InvoiceService;
use crate::modules::invoices::services::renderer::RenderMode;

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DocumentQuery {
    #[serde(default)]
    pub mode: Option<String>,
}

/// Create a new invoice
/// POST /invoices
pub async fn create_invoice(
    service: web::Data<Arc<InvoiceService>>,
    session: Session,
    request: web::Json<CreateInvoiceRequest>,
) -> Result<HttpResponse, AppError> {
    let invoice = service
        .create_invoice(request.into_inner(), &session.username)
        .await?;

    Ok(HttpResponse::Created().json(invoice))
}

/// List invoices, newest first
/// GET /invoices
pub async fn list_invoices(
    service: web::Data<Arc<InvoiceService>>,
    _session: Session,
) -> Result<HttpResponse, AppError> {
    let invoices = service.list_invoices().await?;
    Ok(HttpResponse::Ok().json(invoices))
}

/// Get invoice by ID
/// GET /invoices/{id}
pub async fn get_invoice(
    service: web::Data<Arc<InvoiceService>>,
    _session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let invoice = service.get_invoice(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(invoice))
}

/// Apply a lifecycle status change
/// PUT /invoices/{id}/status?status={status}
pub async fn update_status(
    service: web::Data<Arc<InvoiceService>>,
    _session: Session,
    path: web::Path<String>,
    query: web::Query<StatusQuery>,
) -> Result<HttpResponse, AppError> {
    let status = InvoiceStatus::from_str(&query.status).map_err(AppError::validation)?;

    let invoice = service.update_status(&path.into_inner(), status).await?;
    Ok(HttpResponse::Ok().json(invoice))
}

/// Render the invoice document as HTML
/// GET /invoices/{id}/document?mode=screen|print
pub async fn get_document(
    service: web::Data<Arc<InvoiceService>>,
    _session: Session,
    path: web::Path<String>,
    query: web::Query<DocumentQuery>,
) -> Result<HttpResponse, AppError> {
    let mode = match query.mode.as_deref() {
        None | Some("screen") => RenderMode::Screen,
        Some("print") => RenderMode::Print,
        Some(other) => {
            return Err(AppError::validation(format!(
                "Invalid render mode: {}",
                other
            )))
        }
    };

    let html = service.render_document(&path.into_inner(), mode).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

/// Download the invoice as PDF
/// GET /invoices/{id}/pdf
pub async fn get_pdf(
    service: web::Data<Arc<InvoiceService>>,
    _session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let invoice = service.get_invoice(&id).await?;
    let bytes = service.render_pdf(&id).await?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}.pdf\"", invoice.invoice_number),
        ))
        .body(bytes))
}

/// Configure invoice routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invoices")
            .route("", web::post().to(create_invoice))
            .route("", web::get().to(list_invoices))
            .route("/{id}", web::get().to(get_invoice))
            .route("/{id}/status", web::put().to(update_status))
            .route("/{id}/document", web::get().to(get_document))
            .route("/{id}/pdf", web::get().to(get_pdf)),
    );
}
