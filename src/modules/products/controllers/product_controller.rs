use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::middleware::auth::Session;
use crate::modules::products::models::{CreateProductRequest, UpdateProductRequest};
use crate::modules::products::repositories::ProductRepository;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// Create a new catalog product
/// POST /products
pub async fn create_product(
    repo: web::Data<Arc<ProductRepository>>,
    _session: Session,
    request: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let product = repo.create(request).await?;
    Ok(HttpResponse::Created().json(product))
}

/// List all products
/// GET /products
pub async fn list_products(
    repo: web::Data<Arc<ProductRepository>>,
    _session: Session,
) -> Result<HttpResponse, AppError> {
    let products = repo.list().await?;
    Ok(HttpResponse::Ok().json(products))
}

/// Autocomplete lookup used by the invoice editor
/// GET /products/search?q={query}
pub async fn search_products(
    repo: web::Data<Arc<ProductRepository>>,
    _session: Session,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let suggestions = repo.search(query.q.trim()).await?;
    Ok(HttpResponse::Ok().json(suggestions))
}

/// Update a product; price changes are recorded in the price history
/// PUT /products/{id}
pub async fn update_product(
    repo: web::Data<Arc<ProductRepository>>,
    session: Session,
    path: web::Path<String>,
    request: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let product = repo
        .update(&path.into_inner(), request, &session.username)
        .await?;
    Ok(HttpResponse::Ok().json(product))
}

/// Configure product routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::post().to(create_product))
            .route("", web::get().to(list_products))
            .route("/search", web::get().to(search_products))
            .route("/{id}", web::put().to(update_product)),
    );
}
