// models/drivermodel.rs
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::usermodel::{BankDetails, User, UserRole, VerificationDocuments};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, ApplicationStatus::Pending)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DriverApplication {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub status: ApplicationStatus,

    pub driving_license_doc: String,
    pub address_proof_doc: String,
    pub national_id_doc: String,
    pub tax_id_doc: String,

    pub gov_id: String,
    pub bank_details: BankDetails,

    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
}

impl DriverApplication {
    /// Builds the verified driver account an approved application turns into.
    pub fn to_driver(&self) -> User {
        let mut driver = User::new(self.name.clone(), self.email.clone(), UserRole::Driver);
        driver.verified = true;
        driver.wallet_balance = Some(0.0);
        driver.documents = VerificationDocuments {
            national_id_doc: Some(self.national_id_doc.clone()),
            driving_license_doc: Some(self.driving_license_doc.clone()),
            tax_id_doc: Some(self.tax_id_doc.clone()),
            address_proof_doc: Some(self.address_proof_doc.clone()),
            ..Default::default()
        };
        driver.gov_id = Some(self.gov_id.clone());
        driver.bank_details = Some(self.bank_details.clone());
        driver.service_radius_km = None;
        driver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn application() -> DriverApplication {
        DriverApplication {
            id: Uuid::new_v4(),
            name: "Jane Roe".to_string(),
            email: "jane@x.com".to_string(),
            status: ApplicationStatus::Pending,
            driving_license_doc: "/uploads/jane_license.pdf".to_string(),
            address_proof_doc: "/uploads/jane_address.pdf".to_string(),
            national_id_doc: "/uploads/jane_id.pdf".to_string(),
            tax_id_doc: "/uploads/jane_tax.pdf".to_string(),
            gov_id: "GID000111".to_string(),
            bank_details: BankDetails {
                account_number: "001234567890".to_string(),
                ifsc: "BANK0001234".to_string(),
            },
            submitted_at: Utc::now(),
            decided_at: None,
        }
    }

    #[test]
    fn approved_driver_carries_application_identity() {
        let app = application();
        let driver = app.to_driver();

        assert_eq!(driver.name, app.name);
        assert_eq!(driver.email, app.email);
        assert_eq!(driver.role, UserRole::Driver);
        assert!(driver.verified);
        assert_eq!(driver.wallet_balance, Some(0.0));
        assert_eq!(driver.gov_id.as_deref(), Some("GID000111"));
        assert_eq!(driver.documents.tax_id_doc.as_deref(), Some("/uploads/jane_tax.pdf"));
        assert!(driver.documents.vehicle_registration_doc.is_none());
        assert_ne!(driver.id, app.id);
    }

    #[test]
    fn pending_is_the_only_undecided_status() {
        assert!(!ApplicationStatus::Pending.is_decided());
        assert!(ApplicationStatus::Approved.is_decided());
        assert!(ApplicationStatus::Rejected.is_decided());
    }
}
