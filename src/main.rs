use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use billforge::config::Config;
use billforge::middleware::{BearerAuth, MetricsCollector, MetricsMiddleware, RateLimiter, RequestId};
use billforge::modules::auth::controllers::auth_controller;
use billforge::modules::auth::repositories::UserRepository;
use billforge::modules::auth::services::{AuthService, TokenService};
use billforge::modules::dashboard::repositories::StatsRepository;
use billforge::modules::invoices::repositories::InvoiceRepository;
use billforge::modules::invoices::services::InvoiceService;
use billforge::modules::products::repositories::ProductRepository;
use billforge::modules::profile::repositories::ProfileRepository;
use billforge::modules::{auth, dashboard, health, invoices, products, profile};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "billforge=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting billforge invoicing service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool and apply migrations
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    // Wire repositories and services
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let product_repo = Arc::new(ProductRepository::new(db_pool.clone()));
    let profile_repo = Arc::new(ProfileRepository::new(db_pool.clone()));
    let invoice_repo = Arc::new(InvoiceRepository::new(db_pool.clone()));
    let stats_repo = Arc::new(StatsRepository::new(db_pool.clone()));

    let token_service = Arc::new(TokenService::new(
        &config.auth.jwt_secret,
        config.auth.token_expiry_hours,
    ));
    let auth_service = Arc::new(AuthService::new(user_repo.clone(), token_service.clone()));
    let invoice_service = Arc::new(InvoiceService::new(
        invoice_repo.clone(),
        profile_repo.clone(),
    ));

    // Ensure an admin account exists
    auth_service
        .bootstrap_admin(&config.auth.bootstrap_admin_password)
        .await
        .expect("Failed to bootstrap admin user");

    let metrics = MetricsCollector::new();
    let metrics_data = Arc::new(metrics.clone());

    let bind_address = config.server.bind_address();
    let server_config = config.server.clone();
    let login_rate_limit = config.auth.login_rate_limit_per_minute;

    let server = HttpServer::new(move || {
        let cors = if server_config.allows_any_origin() {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
        } else {
            server_config
                .cors_origins
                .iter()
                .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
                .allow_any_method()
                .allow_any_header()
        };

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(metrics_data.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(product_repo.clone()))
            .app_data(web::Data::new(profile_repo.clone()))
            .app_data(web::Data::new(invoice_service.clone()))
            .app_data(web::Data::new(stats_repo.clone()))
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .wrap(cors)
            .wrap(MetricsMiddleware::new(metrics.clone()))
            .configure(health::configure)
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/auth/login")
                            .wrap(RateLimiter::new(login_rate_limit))
                            .route("", web::post().to(auth_controller::login)),
                    )
                    .service(
                        web::scope("")
                            .wrap(BearerAuth::new(
                                token_service.clone(),
                                auth_service.clone(),
                            ))
                            .configure(auth::configure)
                            .configure(products::configure)
                            .configure(invoices::configure)
                            .configure(profile::configure)
                            .configure(dashboard::configure),
                    ),
            )
    })
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}
