use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::ridedtos::{InvoiceResponseDto, RequestRideDto, RideListResponseDto, RideResponseDto, StoryResponseDto},
    error::HttpError,
    middleware::{role_check, AuthUser},
    models::usermodel::UserRole,
    AppState,
};

pub fn rides_handler() -> Router {
    Router::new()
        .route(
            "/",
            post(request_ride).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Rider])
            })),
        )
        .route("/history", get(ride_history))
        .route(
            "/requests",
            get(open_requests).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Driver, UserRole::Admin])
            })),
        )
        .route("/:id", get(get_ride))
        .route(
            "/:id/match",
            put(match_driver).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Rider, UserRole::Driver, UserRole::Admin])
            })),
        )
        .route(
            "/:id/start",
            put(start_ride).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Driver, UserRole::Admin])
            })),
        )
        .route("/:id/complete", put(complete_ride))
        .route("/:id/cancel", put(cancel_ride))
        .route("/:id/invoice", get(ride_invoice))
        .route("/:id/story", get(ride_story))
}

pub async fn request_ride(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<RequestRideDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let ride = app_state
        .ride_service
        .request_ride(auth.user.id, body.pickup_location, body.dropoff_location, body.vehicle_type)
        .await?;

    Ok((StatusCode::CREATED, Json(RideResponseDto::success(ride))))
}

pub async fn ride_history(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, HttpError> {
    let rides = app_state.ride_service.ride_history(auth.user.id).await?;
    Ok(Json(RideListResponseDto::success(rides)))
}

pub async fn open_requests(Extension(app_state): Extension<Arc<AppState>>) -> Result<impl IntoResponse, HttpError> {
    let rides = app_state.ride_service.open_requests().await?;
    Ok(Json(RideListResponseDto::success(rides)))
}

pub async fn get_ride(
    Path(ride_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, HttpError> {
    let ride = app_state.ride_service.get_ride(ride_id, &auth.user).await?;
    Ok(Json(RideResponseDto::success(ride)))
}

pub async fn match_driver(
    Path(ride_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, HttpError> {
    let ride = app_state.ride_service.match_driver(ride_id, &auth.user).await?;
    Ok(Json(RideResponseDto::success(ride)))
}

pub async fn start_ride(
    Path(ride_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, HttpError> {
    let ride = app_state.ride_service.start_ride(ride_id, &auth.user).await?;
    Ok(Json(RideResponseDto::success(ride)))
}

pub async fn complete_ride(
    Path(ride_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, HttpError> {
    let ride = app_state.ride_service.complete_ride(ride_id, &auth.user).await?;
    Ok(Json(RideResponseDto::success(ride)))
}

pub async fn cancel_ride(
    Path(ride_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, HttpError> {
    let ride = app_state.ride_service.cancel_ride(ride_id, &auth.user).await?;
    Ok(Json(RideResponseDto::success(ride)))
}

pub async fn ride_invoice(
    Path(ride_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, HttpError> {
    let invoice = app_state.ride_service.ride_invoice(ride_id, &auth.user).await?;

    Ok(Json(InvoiceResponseDto {
        status: "success".to_string(),
        invoice,
    }))
}

pub async fn ride_story(
    Path(ride_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, HttpError> {
    let ride = app_state.ride_service.completed_ride(ride_id, &auth.user).await?;
    let story = app_state.storyteller.summarize(&ride).await;

    Ok(Json(StoryResponseDto {
        status: "success".to_string(),
        ride_id: ride.id.to_string(),
        story,
    }))
}
