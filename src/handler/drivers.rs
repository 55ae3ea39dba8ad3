use std::sync::Arc;

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    dtos::{
        driverdtos::{DriverSettingsDto, WithdrawResponseDto},
        userdtos::{FilterUserDto, UserListResponseDto, UserResponseDto},
    },
    error::HttpError,
    middleware::{role_check, AuthUser},
    models::usermodel::UserRole,
    AppState,
};

pub fn drivers_handler() -> Router {
    Router::new()
        .route(
            "/",
            get(get_drivers).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/me/withdraw",
            post(withdraw_funds).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Driver])
            })),
        )
        .route(
            "/me/settings",
            put(update_settings).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Driver])
            })),
        )
}

pub async fn get_drivers(Extension(app_state): Extension<Arc<AppState>>) -> Result<impl IntoResponse, HttpError> {
    let drivers = app_state.driver_service.get_drivers().await?;

    Ok(Json(UserListResponseDto {
        status: "success".to_string(),
        results: drivers.len(),
        users: FilterUserDto::filter_users(&drivers),
    }))
}

pub async fn withdraw_funds(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, HttpError> {
    let withdrawal = app_state.driver_service.withdraw_funds(auth.user.id).await?;

    Ok(Json(WithdrawResponseDto {
        status: "success".to_string(),
        message: format!("Withdrawal of ${:.2} initiated", withdrawal.amount),
        amount: withdrawal.amount,
        wallet_balance: withdrawal.driver.wallet_balance.unwrap_or_default(),
    }))
}

pub async fn update_settings(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<DriverSettingsDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let driver = app_state
        .driver_service
        .update_driver_settings(auth.user.id, body.service_radius_km, body.start_location)
        .await?;

    Ok(Json(UserResponseDto::success(&driver)))
}
