// db/seed.rs
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use super::{DBClient, DbError, DriverExt, RideExt, UserExt, VehicleExt};
use crate::models::{
    drivermodel::{ApplicationStatus, DriverApplication},
    ridemodel::{Ride, RideStatus},
    usermodel::{BankDetails, User, UserRole, VerificationDocuments},
    vehiclemodel::VehicleRegistry,
};

pub fn default_vehicle_registry() -> VehicleRegistry {
    VehicleRegistry {
        car_types: ["Sedan", "SUV", "Hatchback", "Supercar"].map(String::from).to_vec(),
        bike_types: ["Standard", "Cruiser", "Sport", "Superbike"].map(String::from).to_vec(),
    }
}

fn uploads(owner: &str, doc: &str) -> Option<String> {
    Some(format!("/uploads/{}_{}.pdf", owner, doc))
}

fn verified_rider(name: &str, email: &str, vehicle_type: &str, owner: &str) -> User {
    let mut rider = User::new(name, email, UserRole::Rider);
    rider.verified = true;
    rider.vehicle_type = Some(vehicle_type.to_string());
    rider.documents = VerificationDocuments {
        national_id_doc: uploads(owner, "national_id"),
        driving_license_doc: uploads(owner, "license"),
        vehicle_registration_doc: uploads(owner, "vehicle_reg"),
        ..Default::default()
    };
    rider
}

fn driver(name: &str, email: &str, balance: f64) -> User {
    let mut driver = User::new(name, email, UserRole::Driver);
    driver.verified = true;
    driver.wallet_balance = Some(balance);
    driver
}

fn application(name: &str, email: &str, owner: &str, gov_id: &str, account: &str, ifsc: &str) -> DriverApplication {
    DriverApplication {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        status: ApplicationStatus::Pending,
        driving_license_doc: format!("/uploads/{}_license.pdf", owner),
        address_proof_doc: format!("/uploads/{}_address.pdf", owner),
        national_id_doc: format!("/uploads/{}_national_id.pdf", owner),
        tax_id_doc: format!("/uploads/{}_tax_id.pdf", owner),
        gov_id: gov_id.to_string(),
        bank_details: BankDetails {
            account_number: account.to_string(),
            ifsc: ifsc.to_string(),
        },
        submitted_at: Utc::now(),
        decided_at: None,
    }
}

/// Loads the demo accounts, applications and ride history.
pub async fn seed_demo_data(db: &DBClient) -> Result<(), DbError> {
    db.replace_vehicle_registry(default_vehicle_registry()).await?;

    let alex = db.save_user(User::new("Alex Johnson", "alex@example.com", UserRole::Rider)).await?;
    db.save_user(verified_rider("Casey Becker", "casey@example.com", "SUV", "casey")).await?;
    db.save_user(verified_rider("Dana Scully", "dana@example.com", "Sedan", "dana")).await?;

    let mut admin = User::new("Admin", "admin@saferide.com", UserRole::Admin);
    admin.verified = true;
    db.save_user(admin).await?;

    let mut ben = driver("Ben Carter", "ben@example.com", 150.75);
    ben.documents = VerificationDocuments {
        driving_license_doc: uploads("ben", "license"),
        address_proof_doc: uploads("ben", "address"),
        national_id_doc: uploads("ben", "national_id"),
        tax_id_doc: uploads("ben", "tax_id"),
        ..Default::default()
    };
    let ben = db.save_user(ben).await?;
    let ethan = db.save_user(driver("Ethan Hunt", "ethan@example.com", 340.50)).await?;
    db.save_user(driver("Frank Martin", "frank@example.com", 88.20)).await?;

    db.save_application(application(
        "Charlie Day", "charlie@example.com", "charlie", "GID789012", "001234567890", "BANK0001234",
    ))
    .await?;
    db.save_application(application(
        "Diana Prince", "diana@example.com", "diana", "GID210987", "987654321000", "BANK0005678",
    ))
    .await?;

    let history = [
        (&ben, "123 Oak St, Cityville", "789 Pine Ave, Townburg", "Sedan", 45.50, 5.00, (2023, 10, 26, 22, 30)),
        (&ethan, "456 Maple Dr, Cityville", "101 Birch Rd, Suburbia", "Standard", 22.00, 2.50, (2023, 10, 24, 23, 0)),
    ];

    for (assigned, pickup, dropoff, vehicle_type, fare, incentive, (y, mo, d, h, mi)) in history {
        let requested_at = Utc
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .single()
            .unwrap_or_else(Utc::now);

        db.save_ride(Ride {
            id: Uuid::new_v4(),
            rider_id: alex.id,
            rider_name: alex.name.clone(),
            driver_id: Some(assigned.id),
            driver_name: Some(assigned.name.clone()),
            pickup_location: pickup.to_string(),
            dropoff_location: dropoff.to_string(),
            vehicle_type: vehicle_type.to_string(),
            status: RideStatus::Completed,
            fare,
            incentive: Some(incentive),
            requested_at,
            completed_at: Some(requested_at),
            cancelled_at: None,
        })
        .await?;
    }

    let (users, applications, rides) = db.table_sizes().await;
    tracing::info!(
        "Seeded demo data: {} users, {} applications, {} rides",
        users,
        applications,
        rides
    );

    Ok(())
}

#[cfg(test)]
pub fn sample_application(name: &str, email: &str) -> DriverApplication {
    application(name, email, "sample", "GID000111", "001234567890", "BANK0001234")
}

#[cfg(test)]
pub fn sample_ride(rider_id: Uuid, driver_id: Option<Uuid>) -> Ride {
    Ride {
        id: Uuid::new_v4(),
        rider_id,
        rider_name: "Alex Johnson".to_string(),
        driver_id,
        driver_name: driver_id.map(|_| "Ben Carter".to_string()),
        pickup_location: "123 Oak St, Cityville".to_string(),
        dropoff_location: "789 Pine Ave, Townburg".to_string(),
        vehicle_type: "Sedan".to_string(),
        status: RideStatus::Requested,
        fare: 30.0,
        incentive: None,
        requested_at: Utc::now(),
        completed_at: None,
        cancelled_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_demo_accounts() {
        let db = DBClient::new();
        seed_demo_data(&db).await.unwrap();

        let drivers = db.get_users_by_role(UserRole::Driver).await.unwrap();
        assert_eq!(drivers.len(), 3);
        assert_eq!(drivers[0].wallet_balance, Some(150.75));

        let riders = db.get_users_by_role(UserRole::Rider).await.unwrap();
        assert_eq!(riders.len(), 3);
        assert!(!riders[0].verified);

        let pending = db.get_applications(Some(ApplicationStatus::Pending)).await.unwrap();
        assert_eq!(pending.len(), 2);

        let history = db.get_rides_for_participant(riders[0].id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|r| r.status == RideStatus::Completed));

        assert_eq!(db.get_vehicle_types(crate::models::vehiclemodel::VehicleKind::Bike).await.unwrap().len(), 4);
    }
}
