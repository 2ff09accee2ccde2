use std::sync::{Arc, Mutex};

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use bookline::config::AppConfig;
use bookline::db;
use bookline::handlers;
use bookline::services::clock::SystemClock;
use bookline::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        clock: Box::new(SystemClock),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/providers/:id/availability",
            get(handlers::availability::get_available_slots),
        )
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route(
            "/api/bookings/:id/status",
            put(handlers::bookings::update_booking_status),
        )
        .route(
            "/api/providers/:id/calendar",
            get(handlers::calendar::get_month_calendar),
        )
        .route(
            "/api/providers/:id/blocks",
            post(handlers::blocks::block_time),
        )
        .route(
            "/api/providers/:id/blocks/:block_id",
            delete(handlers::blocks::unblock_time),
        )
        .route("/api/providers/:id/stats", get(handlers::stats::get_stats))
        .route(
            "/api/providers/:id/services",
            get(handlers::services::list_services).post(handlers::services::create_service),
        )
        .route(
            "/api/providers/:id/services/:service_id",
            put(handlers::services::update_service),
        )
        .route(
            "/api/providers/:id/business-hours",
            get(handlers::business_hours::get_business_hours)
                .put(handlers::business_hours::replace_business_hours),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
