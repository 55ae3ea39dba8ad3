use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::{
        driverdtos::{
            ApplicationListResponseDto, ApplicationQueryDto, ApplicationResponseDto, ApprovalResponseDto,
            DriverApplicationDto,
        },
        userdtos::FilterUserDto,
    },
    error::HttpError,
    middleware::{auth, role_check},
    models::usermodel::UserRole,
    AppState,
};

/// Submission is open to anyone; reviewing is admin only.
pub fn applications_handler() -> Router {
    Router::new()
        .route(
            "/",
            post(submit_application).merge(
                get(list_applications)
                    .layer(middleware::from_fn(|state, req, next| {
                        role_check(state, req, next, vec![UserRole::Admin])
                    }))
                    .layer(middleware::from_fn(auth)),
            ),
        )
        .route(
            "/:id/approve",
            put(approve_application)
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, vec![UserRole::Admin])
                }))
                .layer(middleware::from_fn(auth)),
        )
        .route(
            "/:id/reject",
            put(reject_application)
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, vec![UserRole::Admin])
                }))
                .layer(middleware::from_fn(auth)),
        )
}

pub async fn submit_application(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<DriverApplicationDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let application = app_state.application_service.submit_application(body.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponseDto {
            status: "success".to_string(),
            application,
        }),
    ))
}

pub async fn list_applications(
    Query(query): Query<ApplicationQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let applications = app_state.application_service.list_applications(query.status).await?;

    Ok(Json(ApplicationListResponseDto {
        status: "success".to_string(),
        results: applications.len(),
        applications,
    }))
}

pub async fn approve_application(
    Path(application_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let (application, driver) = app_state.application_service.approve(application_id).await?;

    Ok(Json(ApprovalResponseDto {
        status: "success".to_string(),
        application,
        driver: FilterUserDto::filter_user(&driver),
    }))
}

pub async fn reject_application(
    Path(application_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let application = app_state.application_service.reject(application_id).await?;

    Ok(Json(ApplicationResponseDto {
        status: "success".to_string(),
        application,
    }))
}
