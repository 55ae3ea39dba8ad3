use std::sync::Arc;

use axum::{
    extract::Path,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::VehicleExt,
    dtos::vehicledtos::{ClassifyResponseDto, VehicleTypeDto, VehicleTypesResponseDto},
    error::HttpError,
    middleware::role_check,
    models::{usermodel::UserRole, vehiclemodel::VehicleKind},
    service::error::ServiceError,
    AppState,
};

pub fn vehicles_handler() -> Router {
    Router::new()
        .route(
            "/types/:kind",
            get(list_vehicle_types).merge(post(add_vehicle_type).layer(middleware::from_fn(
                |state, req, next| role_check(state, req, next, vec![UserRole::Admin]),
            ))),
        )
        .route(
            "/types/:kind/:label",
            delete(remove_vehicle_type).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route("/classify/:label", get(classify_vehicle_type))
}

fn parse_kind(kind: &str) -> Result<VehicleKind, HttpError> {
    kind.parse::<VehicleKind>().map_err(HttpError::bad_request)
}

fn types_response(kind: VehicleKind, types: Vec<String>) -> VehicleTypesResponseDto {
    VehicleTypesResponseDto {
        status: "success".to_string(),
        kind,
        types,
    }
}

pub async fn list_vehicle_types(
    Path(kind): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let kind = parse_kind(&kind)?;
    let types = app_state
        .db_client
        .get_vehicle_types(kind)
        .await
        .map_err(ServiceError::from)?;

    Ok(Json(types_response(kind, types)))
}

pub async fn add_vehicle_type(
    Path(kind): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<VehicleTypeDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let kind = parse_kind(&kind)?;
    let types = app_state
        .db_client
        .add_vehicle_type(kind, body.label.trim())
        .await
        .map_err(ServiceError::from)?;

    tracing::info!("Vehicle type {} registered as {}", body.label.trim(), kind);
    Ok(Json(types_response(kind, types)))
}

pub async fn remove_vehicle_type(
    Path((kind, label)): Path<(String, String)>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let kind = parse_kind(&kind)?;
    let types = app_state
        .db_client
        .remove_vehicle_type(kind, &label)
        .await
        .map_err(ServiceError::from)?;

    Ok(Json(types_response(kind, types)))
}

pub async fn classify_vehicle_type(
    Path(label): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let kind = app_state
        .db_client
        .classify_vehicle_type(&label)
        .await
        .map_err(ServiceError::from)?;

    Ok(Json(ClassifyResponseDto {
        status: "success".to_string(),
        label: label.trim().to_string(),
        kind,
    }))
}
