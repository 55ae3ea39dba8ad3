use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        applications::applications_handler, auth::auth_handler, drivers::drivers_handler, rides::rides_handler,
        users::users_handler, vehicles::vehicles_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/applications", applications_handler())
        .nest("/users", users_handler().layer(middleware::from_fn(auth)))
        .nest("/drivers", drivers_handler().layer(middleware::from_fn(auth)))
        .nest("/rides", rides_handler().layer(middleware::from_fn(auth)))
        .nest("/vehicles", vehicles_handler().layer(middleware::from_fn(auth)))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
