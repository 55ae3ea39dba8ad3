use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
    dtos::userdtos::FilterUserDto,
    models::{
        drivermodel::{ApplicationStatus, DriverApplication},
        usermodel::BankDetails,
    },
    service::application_service::NewApplication,
};

fn validate_account_number(account_number: &str) -> Result<(), ValidationError> {
    if account_number.len() < 6 || account_number.len() > 18 {
        return Err(ValidationError::new("Account number must be 6 to 18 digits"));
    }
    if !account_number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("Account number must contain only digits"));
    }
    Ok(())
}

fn validate_ifsc(ifsc: &str) -> Result<(), ValidationError> {
    if ifsc.len() != 11 || !ifsc.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::new("IFSC must be 11 letters or digits"));
    }
    Ok(())
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct DriverApplicationDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Driving licence document is required"))]
    pub driving_license_doc: String,

    #[validate(length(min = 1, message = "Address proof document is required"))]
    pub address_proof_doc: String,

    #[validate(length(min = 1, message = "National ID document is required"))]
    pub national_id_doc: String,

    #[validate(length(min = 1, message = "Tax ID document is required"))]
    pub tax_id_doc: String,

    #[validate(length(min = 1, max = 32, message = "Government ID is required"))]
    pub gov_id: String,

    #[validate(custom = "validate_account_number")]
    pub account_number: String,

    #[validate(custom = "validate_ifsc")]
    pub ifsc: String,
}

impl From<DriverApplicationDto> for NewApplication {
    fn from(dto: DriverApplicationDto) -> Self {
        NewApplication {
            name: dto.name.trim().to_string(),
            email: dto.email.trim().to_string(),
            driving_license_doc: dto.driving_license_doc,
            address_proof_doc: dto.address_proof_doc,
            national_id_doc: dto.national_id_doc,
            tax_id_doc: dto.tax_id_doc,
            gov_id: dto.gov_id,
            bank_details: BankDetails {
                account_number: dto.account_number,
                ifsc: dto.ifsc.to_ascii_uppercase(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationQueryDto {
    pub status: Option<ApplicationStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApplicationResponseDto {
    pub status: String,
    pub application: DriverApplication,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApplicationListResponseDto {
    pub status: String,
    pub applications: Vec<DriverApplication>,
    pub results: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApprovalResponseDto {
    pub status: String,
    pub application: DriverApplication,
    pub driver: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WithdrawResponseDto {
    pub status: String,
    pub message: String,
    pub amount: f64,
    pub wallet_balance: f64,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct DriverSettingsDto {
    #[validate(range(min = 0.1, max = 500.0, message = "Service radius must be between 0.1 and 500 km"))]
    pub service_radius_km: Option<f64>,

    #[validate(length(min = 1, message = "Start location cannot be empty"))]
    pub start_location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> DriverApplicationDto {
        DriverApplicationDto {
            name: "Jane Roe".to_string(),
            email: "jane@x.com".to_string(),
            driving_license_doc: "license.pdf".to_string(),
            address_proof_doc: "address.pdf".to_string(),
            national_id_doc: "national_id.pdf".to_string(),
            tax_id_doc: "tax_id.pdf".to_string(),
            gov_id: "GID123456".to_string(),
            account_number: "001234567890".to_string(),
            ifsc: "bank0001234".to_string(),
        }
    }

    #[test]
    fn complete_application_validates() {
        assert!(dto().validate().is_ok());

        let application: NewApplication = dto().into();
        assert_eq!(application.bank_details.ifsc, "BANK0001234");
    }

    #[test]
    fn bad_bank_details_are_rejected() {
        let mut bad = dto();
        bad.account_number = "12ab".to_string();
        assert!(bad.validate().is_err());

        let mut bad = dto();
        bad.ifsc = "SHORT".to_string();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn invalid_email_is_rejected() {
        let mut bad = dto();
        bad.email = "not-an-email".to_string();
        assert!(bad.validate().is_err());
    }
}
