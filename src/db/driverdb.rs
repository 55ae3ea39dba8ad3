// db/driverdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::{find_row, insert_row, modify_row, DBClient, DbError};
use crate::models::drivermodel::{ApplicationStatus, DriverApplication};

#[async_trait]
pub trait DriverExt {
    async fn get_application(&self, application_id: Uuid) -> Result<Option<DriverApplication>, DbError>;

    async fn get_applications(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<DriverApplication>, DbError>;

    async fn save_application(&self, application: DriverApplication) -> Result<DriverApplication, DbError>;

    async fn modify_application<F, E>(&self, application_id: Uuid, apply: F) -> Result<DriverApplication, E>
    where
        F: FnOnce(&mut DriverApplication) -> Result<(), E> + Send,
        E: From<DbError> + Send;
}

#[async_trait]
impl DriverExt for DBClient {
    async fn get_application(&self, application_id: Uuid) -> Result<Option<DriverApplication>, DbError> {
        Ok(find_row(&self.applications, application_id).await)
    }

    async fn get_applications(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<DriverApplication>, DbError> {
        let applications = self.applications.read().await;
        Ok(applications
            .iter()
            .filter(|app| status.map_or(true, |s| app.status == s))
            .cloned()
            .collect())
    }

    async fn save_application(&self, application: DriverApplication) -> Result<DriverApplication, DbError> {
        insert_row(&self.applications, application).await
    }

    async fn modify_application<F, E>(&self, application_id: Uuid, apply: F) -> Result<DriverApplication, E>
    where
        F: FnOnce(&mut DriverApplication) -> Result<(), E> + Send,
        E: From<DbError> + Send,
    {
        modify_row(&self.applications, application_id, apply).await
    }
}
