// db.rs
pub mod driverdb;
pub mod ridedb;
pub mod seed;
pub mod userdb;
pub mod vehicledb;

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    drivermodel::DriverApplication,
    ridemodel::Ride,
    usermodel::User,
    vehiclemodel::VehicleRegistry,
};

pub use driverdb::DriverExt;
pub use ridedb::RideExt;
pub use userdb::UserExt;
pub use vehicledb::VehicleExt;

#[derive(Debug, Error, PartialEq)]
pub enum DbError {
    #[error("No {table} row with id {id}")]
    RowNotFound { table: &'static str, id: Uuid },

    #[error("{value:?} already exists in {table}")]
    UniqueViolation { table: &'static str, value: String },
}

/// A row type stored in one of the in-memory tables.
pub trait Row: Clone + Send + Sync {
    const TABLE: &'static str;

    fn row_id(&self) -> Uuid;
}

impl Row for User {
    const TABLE: &'static str = "users";

    fn row_id(&self) -> Uuid {
        self.id
    }
}

impl Row for DriverApplication {
    const TABLE: &'static str = "driver_applications";

    fn row_id(&self) -> Uuid {
        self.id
    }
}

impl Row for Ride {
    const TABLE: &'static str = "rides";

    fn row_id(&self) -> Uuid {
        self.id
    }
}

/// In-memory system of record. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct DBClient {
    users: Arc<RwLock<Vec<User>>>,
    applications: Arc<RwLock<Vec<DriverApplication>>>,
    rides: Arc<RwLock<Vec<Ride>>>,
    vehicles: Arc<RwLock<VehicleRegistry>>,
}

impl DBClient {
    pub fn new() -> Self {
        DBClient::default()
    }

    pub async fn table_sizes(&self) -> (usize, usize, usize) {
        (
            self.users.read().await.len(),
            self.applications.read().await.len(),
            self.rides.read().await.len(),
        )
    }
}

async fn find_row<T: Row>(table: &RwLock<Vec<T>>, id: Uuid) -> Option<T> {
    table.read().await.iter().find(|row| row.row_id() == id).cloned()
}

async fn insert_row<T: Row>(table: &RwLock<Vec<T>>, row: T) -> Result<T, DbError> {
    let mut rows = table.write().await;
    if rows.iter().any(|existing| existing.row_id() == row.row_id()) {
        return Err(DbError::UniqueViolation {
            table: T::TABLE,
            value: row.row_id().to_string(),
        });
    }
    rows.push(row.clone());
    Ok(row)
}

/// Applies `apply` to a copy of the row and writes it back only when the
/// closure succeeds. The write lock is held for the whole check-and-set.
async fn modify_row<T, F, E>(table: &RwLock<Vec<T>>, id: Uuid, apply: F) -> Result<T, E>
where
    T: Row,
    F: FnOnce(&mut T) -> Result<(), E>,
    E: From<DbError>,
{
    let mut rows = table.write().await;
    let row = rows
        .iter_mut()
        .find(|row| row.row_id() == id)
        .ok_or(DbError::RowNotFound { table: T::TABLE, id })?;

    let mut draft = row.clone();
    apply(&mut draft)?;
    *row = draft.clone();

    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::usermodel::UserRole;

    #[tokio::test]
    async fn failed_modification_leaves_row_untouched() {
        let table = RwLock::new(vec![User::new("Ben Carter", "ben@example.com", UserRole::Driver)]);
        let id = table.read().await[0].id;

        let result: Result<User, DbError> = modify_row(&table, id, |user| {
            user.name = "Changed".to_string();
            Err(DbError::RowNotFound { table: "users", id })
        })
        .await;

        assert!(result.is_err());
        assert_eq!(table.read().await[0].name, "Ben Carter");
    }

    #[tokio::test]
    async fn modifying_missing_row_reports_table() {
        let table: RwLock<Vec<User>> = RwLock::new(Vec::new());
        let id = Uuid::new_v4();

        let result: Result<User, DbError> = modify_row(&table, id, |_| Ok(())).await;
        assert_eq!(result.unwrap_err(), DbError::RowNotFound { table: "users", id });
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let table: RwLock<Vec<User>> = RwLock::new(Vec::new());
        let user = User::new("Alex Johnson", "alex@example.com", UserRole::Rider);

        insert_row(&table, user.clone()).await.unwrap();
        let err = insert_row(&table, user).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { table: "users", .. }));
    }
}
