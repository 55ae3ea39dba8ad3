// service/ride_service.rs
use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::info;
use uuid::Uuid;

use crate::{
    config::LatencyProfile,
    db::{DBClient, RideExt, UserExt},
    models::{
        ridemodel::{Ride, RideInvoice, RideStatus},
        usermodel::{User, UserRole},
    },
    service::error::ServiceError,
};

/// Fares are whole currency units drawn from `MIN_FARE..MAX_FARE`.
pub const MIN_FARE: u32 = 20;
pub const MAX_FARE: u32 = 50;

fn random_fare() -> f64 {
    f64::from(rand::rng().random_range(MIN_FARE..MAX_FARE))
}

fn transition(ride: &mut Ride, to: RideStatus) -> Result<(), ServiceError> {
    if !ride.status.can_transition_to(to) {
        return Err(ServiceError::InvalidRideTransition {
            ride_id: ride.id,
            from: ride.status,
            to,
        });
    }
    ride.status = to;
    Ok(())
}

/// Admins see everything, participants see their own rides and drivers can
/// look at any ride still waiting for a driver.
pub fn can_view(ride: &Ride, actor: &User) -> bool {
    actor.role == UserRole::Admin
        || ride.involves(actor.id)
        || (actor.is_driver() && ride.status == RideStatus::Requested)
}

/// Any driver may try to take a ride; the state check decides whether it is
/// still open. Riders may only match their own rides.
fn can_match(ride: &Ride, actor: &User) -> bool {
    actor.role == UserRole::Admin || actor.is_driver() || ride.rider_id == actor.id
}

fn ensure(allowed: bool, ride: &Ride, actor: &User) -> Result<(), ServiceError> {
    if allowed {
        Ok(())
    } else {
        Err(ServiceError::UnauthorizedRideAccess(actor.id, ride.id))
    }
}

#[derive(Debug, Clone)]
pub struct RideService {
    db_client: Arc<DBClient>,
    latency: LatencyProfile,
    incentive_rate: f64,
}

impl RideService {
    pub fn new(db_client: Arc<DBClient>, latency: LatencyProfile, incentive_rate: f64) -> Self {
        Self {
            db_client,
            latency,
            incentive_rate,
        }
    }

    pub async fn request_ride(
        &self,
        rider_id: Uuid,
        pickup_location: String,
        dropoff_location: String,
        vehicle_type: Option<String>,
    ) -> Result<Ride, ServiceError> {
        tokio::time::sleep(self.latency.ride_request).await;

        let rider = self
            .db_client
            .get_user(rider_id)
            .await?
            .ok_or(ServiceError::UserNotFound(rider_id))?;

        if rider.role != UserRole::Rider {
            return Err(ServiceError::Validation(format!(
                "Only riders can request rides, user {} is a {}",
                rider.id,
                rider.role.to_str()
            )));
        }
        if !rider.can_book_rides() {
            return Err(ServiceError::RiderNotVerified(rider.id));
        }

        let vehicle_type = vehicle_type
            .filter(|v| !v.trim().is_empty())
            .or_else(|| rider.vehicle_type.clone())
            .ok_or(ServiceError::VehicleTypeMissing(rider.id))?;

        let ride = Ride {
            id: Uuid::new_v4(),
            rider_id: rider.id,
            rider_name: rider.name.clone(),
            driver_id: None,
            driver_name: None,
            pickup_location,
            dropoff_location,
            vehicle_type,
            status: RideStatus::Requested,
            fare: random_fare(),
            incentive: None,
            requested_at: Utc::now(),
            completed_at: None,
            cancelled_at: None,
        };

        let ride = self.db_client.save_ride(ride).await?;
        info!("Ride {} requested by {} (fare {:.2})", ride.id, rider.id, ride.fare);

        Ok(ride)
    }

    /// Assigns a driver to a requested ride. A driver calling this takes the
    /// ride themselves; riders and admins get the first registered driver.
    pub async fn match_driver(&self, ride_id: Uuid, actor: &User) -> Result<Ride, ServiceError> {
        tokio::time::sleep(self.latency.driver_match).await;

        let driver = if actor.is_driver() {
            actor.clone()
        } else {
            self.db_client
                .get_users_by_role(UserRole::Driver)
                .await?
                .into_iter()
                .next()
                .ok_or(ServiceError::NoDriverAvailable)?
        };

        let ride = self
            .db_client
            .modify_ride(ride_id, |ride| {
                ensure(can_match(ride, actor), ride, actor)?;
                transition(ride, RideStatus::Accepted)?;
                ride.driver_id = Some(driver.id);
                ride.driver_name = Some(driver.name.clone());
                Ok::<(), ServiceError>(())
            })
            .await?;

        info!("Ride {} accepted by driver {}", ride.id, driver.id);
        Ok(ride)
    }

    pub async fn start_ride(&self, ride_id: Uuid, actor: &User) -> Result<Ride, ServiceError> {
        tokio::time::sleep(self.latency.ride_start).await;

        let ride = self
            .db_client
            .modify_ride(ride_id, |ride| {
                let allowed = actor.role == UserRole::Admin || ride.driver_id == Some(actor.id);
                ensure(allowed, ride, actor)?;
                transition(ride, RideStatus::InProgress)
            })
            .await?;

        info!("Ride {} in progress", ride.id);
        Ok(ride)
    }

    pub async fn complete_ride(&self, ride_id: Uuid, actor: &User) -> Result<Ride, ServiceError> {
        tokio::time::sleep(self.latency.ride_complete).await;

        let incentive_rate = self.incentive_rate;
        let ride = self
            .db_client
            .modify_ride(ride_id, |ride| {
                let allowed = actor.role == UserRole::Admin || ride.involves(actor.id);
                ensure(allowed, ride, actor)?;
                transition(ride, RideStatus::Completed)?;
                ride.incentive = Some(ride.fare * incentive_rate);
                ride.completed_at = Some(Utc::now());
                Ok::<(), ServiceError>(())
            })
            .await?;

        info!(
            "Ride {} completed, fare {:.2}, incentive {:.2}",
            ride.id,
            ride.fare,
            ride.incentive.unwrap_or_default()
        );
        Ok(ride)
    }

    pub async fn cancel_ride(&self, ride_id: Uuid, actor: &User) -> Result<Ride, ServiceError> {
        let ride = self
            .db_client
            .modify_ride(ride_id, |ride| {
                let allowed = actor.role == UserRole::Admin || ride.rider_id == actor.id;
                ensure(allowed, ride, actor)?;
                transition(ride, RideStatus::Cancelled)?;
                ride.cancelled_at = Some(Utc::now());
                Ok::<(), ServiceError>(())
            })
            .await?;

        info!("Ride {} cancelled by {}", ride.id, actor.id);
        Ok(ride)
    }

    pub async fn get_ride(&self, ride_id: Uuid, actor: &User) -> Result<Ride, ServiceError> {
        let ride = self
            .db_client
            .get_ride(ride_id)
            .await?
            .ok_or(ServiceError::RideNotFound(ride_id))?;

        ensure(can_view(&ride, actor), &ride, actor)?;
        Ok(ride)
    }

    pub async fn ride_history(&self, participant_id: Uuid) -> Result<Vec<Ride>, ServiceError> {
        Ok(self.db_client.get_rides_for_participant(participant_id).await?)
    }

    /// Rides still waiting for a driver, oldest first.
    pub async fn open_requests(&self) -> Result<Vec<Ride>, ServiceError> {
        let mut rides: Vec<Ride> = self
            .db_client
            .get_rides()
            .await?
            .into_iter()
            .filter(|ride| ride.status == RideStatus::Requested)
            .collect();
        rides.sort_by(|a, b| a.requested_at.cmp(&b.requested_at));
        Ok(rides)
    }

    /// A finished ride, for trip summaries.
    pub async fn completed_ride(&self, ride_id: Uuid, actor: &User) -> Result<Ride, ServiceError> {
        let ride = self.get_ride(ride_id, actor).await?;
        if ride.status != RideStatus::Completed {
            return Err(ServiceError::RideNotCompleted(ride.id));
        }
        Ok(ride)
    }

    pub async fn ride_invoice(&self, ride_id: Uuid, actor: &User) -> Result<RideInvoice, ServiceError> {
        Ok(self.get_ride(ride_id, actor).await?.invoice())
    }
}
