use std::sync::Arc;

use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::IntoResponse,
    Extension,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::UserExt,
    error::{ErrorMessage, HttpError},
    models::usermodel::{User, UserRole},
    AppState,
};

/// Header carrying the acting user's id. Login hands the id back to clients.
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthUser {
    pub user: User,
}

fn user_id_from_headers(headers: &HeaderMap) -> Result<Uuid, HttpError> {
    let raw = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::IdentityNotProvided.to_string()))?;

    Uuid::parse_str(raw).map_err(|_| HttpError::unauthorized(ErrorMessage::InvalidIdentity.to_string()))
}

pub async fn auth(
    Extension(app_state): Extension<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let user_id = user_id_from_headers(req.headers())?;

    let user = app_state
        .db_client
        .get_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::UserNoLongerExist.to_string()))?;

    req.extensions_mut().insert(AuthUser { user });

    Ok(next.run(req).await)
}

pub async fn role_check(
    Extension(_app_state): Extension<Arc<AppState>>,
    req: Request,
    next: Next,
    required_roles: Vec<UserRole>,
) -> Result<impl IntoResponse, HttpError> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::UserNotAuthenticated.to_string()))?;

    if !required_roles.contains(&user.user.role) {
        return Err(HttpError::new(
            ErrorMessage::PermissionDenied.to_string(),
            StatusCode::FORBIDDEN,
        ));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn missing_header_is_unauthorized() {
        let err = user_id_from_headers(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn malformed_header_is_unauthorized() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("not-a-uuid"));
        let err = user_id_from_headers(&headers).unwrap_err();
        assert_eq!(err.message, ErrorMessage::InvalidIdentity.to_string());
    }

    #[test]
    fn valid_header_parses() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_str(&id.to_string()).unwrap());
        assert_eq!(user_id_from_headers(&headers).unwrap(), id);
    }
}
