// models/usermodel.rs
use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Rider,
    Driver,
    Admin,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Rider => "rider",
            UserRole::Driver => "driver",
            UserRole::Admin => "admin",
        }
    }
}

/// References to uploaded KYC documents. The service never reads the
/// files, it only keeps the paths the uploader handed back.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct VerificationDocuments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_id_doc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driving_license_doc: Option<String>,

    // rider only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_registration_doc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noc_doc: Option<String>,

    // driver only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id_doc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_proof_doc: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BankDetails {
    pub account_number: String,
    pub ifsc: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub verified: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_balance: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,

    pub documents: VerificationDocuments,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gov_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_details: Option<BankDetails>,

    // Driver operating parameters. A missing radius means the driver takes
    // rides from anywhere.
    pub service_radius_km: Option<f64>,
    pub radius_set_at: Option<DateTime<Utc>>,
    pub start_location: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            role,
            verified: false,
            wallet_balance: match role {
                UserRole::Driver => Some(0.0),
                _ => None,
            },
            vehicle_type: None,
            documents: VerificationDocuments::default(),
            gov_id: None,
            bank_details: None,
            service_radius_km: None,
            radius_set_at: None,
            start_location: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_driver(&self) -> bool {
        self.role == UserRole::Driver
    }

    pub fn can_book_rides(&self) -> bool {
        self.role == UserRole::Rider && self.verified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_driver_starts_with_empty_wallet() {
        let driver = User::new("Ben Carter", "ben@example.com", UserRole::Driver);
        assert_eq!(driver.wallet_balance, Some(0.0));
        assert!(!driver.verified);

        let rider = User::new("Alex Johnson", "alex@example.com", UserRole::Rider);
        assert_eq!(rider.wallet_balance, None);
    }

    #[test]
    fn only_verified_riders_can_book() {
        let mut rider = User::new("Alex Johnson", "alex@example.com", UserRole::Rider);
        assert!(!rider.can_book_rides());

        rider.verified = true;
        assert!(rider.can_book_rides());

        let mut admin = User::new("Admin", "admin@saferide.com", UserRole::Admin);
        admin.verified = true;
        assert!(!admin.can_book_rides());
    }

    #[test]
    fn role_serializes_snake_case() {
        let json = serde_json::to_string(&UserRole::Driver).unwrap();
        assert_eq!(json, "\"driver\"");
        assert_eq!(UserRole::Rider.to_str(), "rider");
    }
}
