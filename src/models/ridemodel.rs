// models/ridemodel.rs
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    Requested,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

impl RideStatus {
    pub fn to_str(&self) -> &str {
        match self {
            RideStatus::Requested => "requested",
            RideStatus::Accepted => "accepted",
            RideStatus::InProgress => "in_progress",
            RideStatus::Completed => "completed",
            RideStatus::Cancelled => "cancelled",
        }
    }

    pub fn can_transition_to(&self, to: RideStatus) -> bool {
        matches!(
            (self, to),
            (RideStatus::Requested, RideStatus::Accepted)
                | (RideStatus::Requested, RideStatus::Cancelled)
                | (RideStatus::Accepted, RideStatus::InProgress)
                | (RideStatus::Accepted, RideStatus::Completed)
                | (RideStatus::InProgress, RideStatus::Completed)
        )
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Ride {
    pub id: Uuid,
    pub rider_id: Uuid,
    pub rider_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,

    pub pickup_location: String,
    pub dropoff_location: String,
    pub vehicle_type: String,
    pub status: RideStatus,
    pub fare: f64,

    /// Driver bonus, only set once the ride completes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incentive: Option<f64>,

    pub requested_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Ride {
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.rider_id == user_id || self.driver_id == Some(user_id)
    }

    pub fn invoice(&self) -> RideInvoice {
        let incentive = self.incentive.unwrap_or(0.0);
        RideInvoice {
            ride_id: self.id,
            rider_name: self.rider_name.clone(),
            driver_name: self.driver_name.clone(),
            pickup_location: self.pickup_location.clone(),
            dropoff_location: self.dropoff_location.clone(),
            date: self.completed_at.unwrap_or(self.requested_at),
            base_fare: self.fare,
            incentive,
            total: self.fare + incentive,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RideInvoice {
    pub ride_id: Uuid,
    pub rider_name: String,
    pub driver_name: Option<String>,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub date: DateTime<Utc>,
    pub base_fare: f64,
    pub incentive: f64,
    pub total: f64,
}
