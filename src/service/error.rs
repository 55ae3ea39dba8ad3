use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    db::DbError,
    error::HttpError,
    models::{drivermodel::ApplicationStatus, ridemodel::RideStatus},
};

#[derive(Error, Debug, PartialEq)]
pub enum ServiceError {
    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("Driver {0} not found")]
    DriverNotFound(Uuid),

    #[error("Driver application {0} not found")]
    ApplicationNotFound(Uuid),

    #[error("Ride {0} not found")]
    RideNotFound(Uuid),

    #[error("Ride {ride_id} cannot move from {from} to {to}")]
    InvalidRideTransition {
        ride_id: Uuid,
        from: RideStatus,
        to: RideStatus,
    },

    #[error("Ride {0} is not completed yet")]
    RideNotCompleted(Uuid),

    #[error("Driver application {0} was already {1}")]
    ApplicationAlreadyDecided(Uuid, ApplicationStatus),

    #[error("User {0} must complete verification before booking a ride")]
    RiderNotVerified(Uuid),

    #[error("No vehicle type given and none registered for user {0}")]
    VehicleTypeMissing(Uuid),

    #[error("No driver is available to take the ride")]
    NoDriverAvailable,

    #[error("User {0} is not allowed to act on ride {1}")]
    UnauthorizedRideAccess(Uuid, Uuid),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(DbError),
}

impl From<DbError> for ServiceError {
    fn from(error: DbError) -> Self {
        match error {
            DbError::UniqueViolation { .. } => ServiceError::Conflict(error.to_string()),
            DbError::RowNotFound { table: "users", id } => ServiceError::UserNotFound(id),
            DbError::RowNotFound { table: "rides", id } => ServiceError::RideNotFound(id),
            DbError::RowNotFound { table: "driver_applications", id } => ServiceError::ApplicationNotFound(id),
            DbError::RowNotFound { .. } => ServiceError::Database(error),
        }
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::UserNotFound(_)
            | ServiceError::DriverNotFound(_)
            | ServiceError::ApplicationNotFound(_)
            | ServiceError::RideNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::InvalidRideTransition { .. }
            | ServiceError::RideNotCompleted(_)
            | ServiceError::ApplicationAlreadyDecided(_, _)
            | ServiceError::Conflict(_) => StatusCode::CONFLICT,

            ServiceError::RiderNotVerified(_)
            | ServiceError::VehicleTypeMissing(_)
            | ServiceError::NoDriverAvailable
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::UnauthorizedRideAccess(_, _) => StatusCode::FORBIDDEN,

            ServiceError::Database(DbError::RowNotFound { .. }) => StatusCode::NOT_FOUND,
            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        HttpError::new(error.to_string(), error.status_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_errors_map_to_conflict() {
        let error = ServiceError::InvalidRideTransition {
            ride_id: Uuid::nil(),
            from: RideStatus::Completed,
            to: RideStatus::Accepted,
        };
        assert_eq!(error.status_code(), StatusCode::CONFLICT);
        assert!(error.to_string().contains("completed to accepted"));

        let http: HttpError = ServiceError::ApplicationAlreadyDecided(Uuid::nil(), ApplicationStatus::Approved).into();
        assert_eq!(http.status, StatusCode::CONFLICT);
        assert!(http.message.contains("already approved"));
    }

    #[test]
    fn missing_rows_map_to_not_found() {
        let from_db: ServiceError = DbError::RowNotFound { table: "rides", id: Uuid::nil() }.into();
        assert_eq!(from_db, ServiceError::RideNotFound(Uuid::nil()));

        let unknown_table: ServiceError = DbError::RowNotFound { table: "invoices", id: Uuid::nil() }.into();
        assert_eq!(unknown_table.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ServiceError::RideNotFound(Uuid::nil()).status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unique_violations_become_conflicts() {
        let error: ServiceError = DbError::UniqueViolation {
            table: "car_types",
            value: "Sport".to_string(),
        }
        .into();
        assert!(matches!(error, ServiceError::Conflict(_)));
        assert_eq!(error.status_code(), StatusCode::CONFLICT);
    }
}
