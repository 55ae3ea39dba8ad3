use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::ridemodel::{Ride, RideInvoice};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RequestRideDto {
    #[validate(length(min = 1, message = "Pickup location is required"))]
    pub pickup_location: String,

    #[validate(length(min = 1, message = "Dropoff location is required"))]
    pub dropoff_location: String,

    /// Falls back to the vehicle registered during verification.
    pub vehicle_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RideData {
    pub ride: Ride,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RideResponseDto {
    pub status: String,
    pub data: RideData,
}

impl RideResponseDto {
    pub fn success(ride: Ride) -> Self {
        RideResponseDto {
            status: "success".to_string(),
            data: RideData { ride },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RideListResponseDto {
    pub status: String,
    pub rides: Vec<Ride>,
    pub results: usize,
}

impl RideListResponseDto {
    pub fn success(rides: Vec<Ride>) -> Self {
        RideListResponseDto {
            status: "success".to_string(),
            results: rides.len(),
            rides,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InvoiceResponseDto {
    pub status: String,
    pub invoice: RideInvoice,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoryResponseDto {
    pub status: String,
    pub ride_id: String,
    pub story: String,
}
