use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usermodel::{User, UserRole, VerificationDocuments};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginDto {
    pub role: UserRole,
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    pub documents: VerificationDocuments,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_radius_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_set_at: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            name: user.name.to_owned(),
            email: user.email.to_owned(),
            role: user.role.to_str().to_string(),
            verified: user.verified,
            wallet_balance: user.wallet_balance,
            vehicle_type: user.vehicle_type.clone(),
            documents: user.documents.clone(),
            service_radius_km: user.service_radius_km,
            start_location: user.start_location.clone(),
            radius_set_at: user.radius_set_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }

    pub fn filter_users(users: &[User]) -> Vec<FilterUserDto> {
        users.iter().map(FilterUserDto::filter_user).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

impl UserResponseDto {
    pub fn success(user: &User) -> Self {
        UserResponseDto {
            status: "success".to_string(),
            data: UserData {
                user: FilterUserDto::filter_user(user),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserListResponseDto {
    pub status: String,
    pub users: Vec<FilterUserDto>,
    pub results: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserQueryDto {
    pub role: Option<UserRole>,
}

fn default_name_matches() -> bool {
    true
}

/// Rider KYC submission. Document presence is checked by the verification
/// service so the missing ones can be reported together.
#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct VerifyUserDto {
    #[validate(length(min = 1, message = "National ID document cannot be empty"))]
    pub national_id_doc: Option<String>,

    #[validate(length(min = 1, message = "Driving licence document cannot be empty"))]
    pub driving_license_doc: Option<String>,

    #[validate(length(min = 1, message = "Vehicle registration document cannot be empty"))]
    pub vehicle_registration_doc: Option<String>,

    pub noc_doc: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Vehicle type must be between 1 and 50 characters"))]
    pub vehicle_type: Option<String>,

    #[serde(default = "default_name_matches")]
    pub registration_name_matches: bool,
}

impl VerifyUserDto {
    pub fn documents(&self) -> VerificationDocuments {
        VerificationDocuments {
            national_id_doc: self.national_id_doc.clone(),
            driving_license_doc: self.driving_license_doc.clone(),
            vehicle_registration_doc: self.vehicle_registration_doc.clone(),
            noc_doc: self.noc_doc.clone(),
            ..Default::default()
        }
    }
}
