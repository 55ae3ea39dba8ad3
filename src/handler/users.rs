use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::UserExt,
    dtos::userdtos::{FilterUserDto, UserListResponseDto, UserQueryDto, UserResponseDto, VerifyUserDto},
    error::{ErrorMessage, HttpError},
    middleware::{role_check, AuthUser},
    models::usermodel::UserRole,
    service::{error::ServiceError, verification_service::VerificationRequest},
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route(
            "/",
            get(get_users).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route("/me", get(get_me))
        .route(
            "/:id",
            get(get_user).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route("/:id/verification", put(verify_user))
}

pub async fn get_me(Extension(user): Extension<AuthUser>) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(UserResponseDto::success(&user.user)))
}

pub async fn get_users(
    Query(query): Query<UserQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let users = match query.role {
        Some(role) => app_state.db_client.get_users_by_role(role).await,
        None => app_state.db_client.get_users().await,
    }
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(UserListResponseDto {
        status: "success".to_string(),
        results: users.len(),
        users: FilterUserDto::filter_users(&users),
    }))
}

pub async fn get_user(
    Path(user_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .get_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::UserNotFound(user_id))?;

    Ok(Json(UserResponseDto::success(&user)))
}

pub async fn verify_user(
    Path(user_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<VerifyUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if auth.user.id != user_id && auth.user.role != UserRole::Admin {
        return Err(HttpError::forbidden(ErrorMessage::PermissionDenied.to_string()));
    }

    let request = VerificationRequest {
        documents: body.documents(),
        vehicle_type: body.vehicle_type.clone(),
        registration_name_matches: body.registration_name_matches,
    };

    let user = app_state.verification_service.verify_user(user_id, request).await?;

    Ok(Json(UserResponseDto::success(&user)))
}
