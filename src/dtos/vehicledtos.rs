use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::vehiclemodel::VehicleKind;

fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.trim().is_empty() {
        return Err(ValidationError::new("Vehicle type cannot be blank"));
    }
    Ok(())
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct VehicleTypeDto {
    #[validate(
        length(min = 1, max = 50, message = "Vehicle type must be between 1 and 50 characters"),
        custom = "validate_label"
    )]
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VehicleTypesResponseDto {
    pub status: String,
    pub kind: VehicleKind,
    pub types: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResponseDto {
    pub status: String,
    pub label: String,
    pub kind: Option<VehicleKind>,
}
