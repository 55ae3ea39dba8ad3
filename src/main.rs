mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod middleware;
mod models;
mod routes;
mod service;

use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, CONTENT_TYPE},
    HeaderName, HeaderValue, Method,
};
use config::Config;
use db::{seed::seed_demo_data, DBClient, VehicleExt};
use dotenv::dotenv;
use routes::create_router;
use service::{
    application_service::ApplicationService,
    driver_service::DriverService,
    ride_service::RideService,
    story_service::{storyteller_from_config, RideStoryteller},
    verification_service::VerificationService,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Clone)]
pub struct AppState {
    pub db_client: Arc<DBClient>,
    pub ride_service: RideService,
    pub application_service: ApplicationService,
    pub verification_service: VerificationService,
    pub driver_service: DriverService,
    pub storyteller: Arc<dyn RideStoryteller>,
}

impl AppState {
    pub fn new(env: &Config, db_client: Arc<DBClient>) -> Self {
        let storyteller = storyteller_from_config(env);

        AppState {
            ride_service: RideService::new(db_client.clone(), env.latency, env.incentive_rate),
            application_service: ApplicationService::new(db_client.clone()),
            verification_service: VerificationService::new(db_client.clone(), env.latency),
            driver_service: DriverService::new(db_client.clone()),
            storyteller,
            db_client,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = Config::init();

    tracing_subscriber::fmt()
        .with_max_level(config.log_level.parse::<LevelFilter>().unwrap_or(LevelFilter::DEBUG))
        .init();

    let db_client = Arc::new(DBClient::new());
    let seeded = if config.seed_demo_data {
        seed_demo_data(&db_client).await
    } else {
        db_client.replace_vehicle_registry(db::seed::default_vehicle_registry()).await
    };
    if let Err(err) = seeded {
        tracing::error!("🔥 Failed to load initial data: {}", err);
        std::process::exit(1);
    }

    let allowed_origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Skipping invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_headers([ACCEPT, CONTENT_TYPE, HeaderName::from_static(middleware::USER_ID_HEADER)])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE]);

    let app_state = AppState::new(&config, db_client);
    let app = create_router(Arc::new(app_state)).layer(cors);

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("🔥 Failed to bind port {}: {}", config.port, err);
            std::process::exit(1);
        }
    };

    tracing::info!("🚀 Server is running on http://localhost:{}", config.port);

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("Server stopped: {}", err);
    }
}
