// service/application_service.rs
use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::{DBClient, DriverExt, UserExt},
    models::{
        drivermodel::{ApplicationStatus, DriverApplication},
        usermodel::{BankDetails, User},
    },
    service::error::ServiceError,
};

/// Everything an applicant hands in. Presence and format checks happen on
/// the request DTO before this is built.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub name: String,
    pub email: String,
    pub driving_license_doc: String,
    pub address_proof_doc: String,
    pub national_id_doc: String,
    pub tax_id_doc: String,
    pub gov_id: String,
    pub bank_details: BankDetails,
}

#[derive(Debug, Clone)]
pub struct ApplicationService {
    db_client: Arc<DBClient>,
}

impl ApplicationService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn submit_application(&self, details: NewApplication) -> Result<DriverApplication, ServiceError> {
        let application = DriverApplication {
            id: Uuid::new_v4(),
            name: details.name,
            email: details.email,
            status: ApplicationStatus::Pending,
            driving_license_doc: details.driving_license_doc,
            address_proof_doc: details.address_proof_doc,
            national_id_doc: details.national_id_doc,
            tax_id_doc: details.tax_id_doc,
            gov_id: details.gov_id,
            bank_details: details.bank_details,
            submitted_at: Utc::now(),
            decided_at: None,
        };

        let application = self.db_client.save_application(application).await?;
        info!("Driver application {} submitted by {}", application.id, application.email);

        Ok(application)
    }

    pub async fn list_applications(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<DriverApplication>, ServiceError> {
        Ok(self.db_client.get_applications(status).await?)
    }

    /// Moves a pending application to `status`. Decided applications are
    /// terminal, so a second decision fails without touching the stores.
    async fn settle(&self, application_id: Uuid, status: ApplicationStatus) -> Result<DriverApplication, ServiceError> {
        self.db_client
            .modify_application(application_id, |app| {
                if app.status.is_decided() {
                    return Err(ServiceError::ApplicationAlreadyDecided(app.id, app.status));
                }
                app.status = status;
                app.decided_at = Some(Utc::now());
                Ok(())
            })
            .await
    }

    /// Approves the application and creates the driver account it describes.
    pub async fn approve(&self, application_id: Uuid) -> Result<(DriverApplication, User), ServiceError> {
        let application = self.settle(application_id, ApplicationStatus::Approved).await?;
        let driver = self.db_client.save_user(application.to_driver()).await?;
        info!("Application {} approved, driver {} created", application.id, driver.id);

        Ok((application, driver))
    }

    pub async fn reject(&self, application_id: Uuid) -> Result<DriverApplication, ServiceError> {
        let application = self.settle(application_id, ApplicationStatus::Rejected).await?;
        info!("Application {} rejected", application.id);

        Ok(application)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::usermodel::UserRole;

    fn jane() -> NewApplication {
        NewApplication {
            name: "Jane Roe".to_string(),
            email: "jane@x.com".to_string(),
            driving_license_doc: "/uploads/jane_license.pdf".to_string(),
            address_proof_doc: "/uploads/jane_address.pdf".to_string(),
            national_id_doc: "/uploads/jane_national_id.pdf".to_string(),
            tax_id_doc: "/uploads/jane_tax_id.pdf".to_string(),
            gov_id: "GID123456".to_string(),
            bank_details: BankDetails {
                account_number: "001234567890".to_string(),
                ifsc: "BANK0001234".to_string(),
            },
        }
    }

    fn service() -> (ApplicationService, Arc<DBClient>) {
        let db = Arc::new(DBClient::new());
        (ApplicationService::new(db.clone()), db)
    }

    #[tokio::test]
    async fn approval_creates_exactly_one_matching_driver() {
        let (service, db) = service();
        let app = service.submit_application(jane()).await.unwrap();
        assert_eq!(app.status, ApplicationStatus::Pending);

        let (approved, driver) = service.approve(app.id).await.unwrap();
        assert_eq!(approved.status, ApplicationStatus::Approved);
        assert!(driver.verified);
        assert_eq!(driver.wallet_balance, Some(0.0));

        let drivers = db.get_users_by_role(UserRole::Driver).await.unwrap();
        let matching: Vec<_> = drivers
            .iter()
            .filter(|d| d.name == "Jane Roe" && d.email == "jane@x.com")
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].id, driver.id);

        let stored = db.get_application(app.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ApplicationStatus::Approved);
        assert!(stored.decided_at.is_some());
    }

    #[tokio::test]
    async fn decided_applications_are_terminal() {
        let (service, db) = service();
        let app = service.submit_application(jane()).await.unwrap();
        service.approve(app.id).await.unwrap();

        let again = service.approve(app.id).await.unwrap_err();
        assert_eq!(again, ServiceError::ApplicationAlreadyDecided(app.id, ApplicationStatus::Approved));

        let reject = service.reject(app.id).await.unwrap_err();
        assert_eq!(reject, ServiceError::ApplicationAlreadyDecided(app.id, ApplicationStatus::Approved));

        // no second driver was created
        assert_eq!(db.get_users_by_role(UserRole::Driver).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejection_only_flips_status() {
        let (service, db) = service();
        let app = service.submit_application(jane()).await.unwrap();

        let rejected = service.reject(app.id).await.unwrap();
        assert_eq!(rejected.status, ApplicationStatus::Rejected);
        assert!(db.get_users().await.unwrap().is_empty());

        let err = service.approve(app.id).await.unwrap_err();
        assert_eq!(err, ServiceError::ApplicationAlreadyDecided(app.id, ApplicationStatus::Rejected));
    }

    #[tokio::test]
    async fn unknown_application_is_not_found() {
        let (service, _) = service();
        let id = Uuid::new_v4();
        assert_eq!(service.approve(id).await.unwrap_err(), ServiceError::ApplicationNotFound(id));
    }

    #[tokio::test]
    async fn duplicate_submissions_are_accepted() {
        let (service, _) = service();
        service.submit_application(jane()).await.unwrap();
        service.submit_application(jane()).await.unwrap();

        let pending = service.list_applications(Some(ApplicationStatus::Pending)).await.unwrap();
        assert_eq!(pending.len(), 2);
    }
}
