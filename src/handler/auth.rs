use std::sync::Arc;

use axum::{response::IntoResponse, routing::post, Extension, Json, Router};

use crate::{
    db::UserExt,
    dtos::userdtos::{LoginDto, UserResponseDto},
    error::HttpError,
    AppState,
};

pub fn auth_handler() -> Router {
    Router::new().route("/login", post(login))
}

/// Demo sign-in: picks the stored account for the requested role, or the one
/// with the given email when several share the role. No credentials are
/// checked; clients send the returned id back in the `x-user-id` header.
pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginDto>,
) -> Result<impl IntoResponse, HttpError> {
    let accounts = app_state
        .db_client
        .get_users_by_role(body.role)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = match &body.email {
        Some(email) => accounts
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim())),
        None => accounts.first(),
    }
    .ok_or_else(|| HttpError::not_found(format!("No {} account available", body.role.to_str())))?;

    tracing::info!("{} signed in as {}", user.email, body.role.to_str());

    Ok(Json(UserResponseDto::success(user)))
}
