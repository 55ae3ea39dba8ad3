// service/driver_service.rs
use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::{DBClient, UserExt},
    models::usermodel::{User, UserRole},
    service::error::ServiceError,
};

#[derive(Debug, Clone)]
pub struct Withdrawal {
    pub amount: f64,
    pub driver: User,
}

#[derive(Debug, Clone)]
pub struct DriverService {
    db_client: Arc<DBClient>,
}

impl DriverService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn get_drivers(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.db_client.get_users_by_role(UserRole::Driver).await?)
    }

    /// Pays out the whole wallet. The balance drops to zero whatever it was,
    /// an empty wallet withdraws nothing and still succeeds.
    pub async fn withdraw_funds(&self, driver_id: Uuid) -> Result<Withdrawal, ServiceError> {
        let mut amount = 0.0;

        let driver = self
            .db_client
            .modify_user(driver_id, |user| {
                if !user.is_driver() {
                    return Err(ServiceError::DriverNotFound(driver_id));
                }
                amount = user.wallet_balance.unwrap_or(0.0);
                user.wallet_balance = Some(0.0);
                Ok(())
            })
            .await
            .map_err(|e| match e {
                ServiceError::UserNotFound(id) => ServiceError::DriverNotFound(id),
                other => other,
            })?;

        info!("Driver {} withdrew {:.2}", driver.id, amount);
        Ok(Withdrawal { amount, driver })
    }

    /// Sets how far from `start_location` the driver is willing to pick up.
    /// Passing no radius clears the restriction.
    pub async fn update_driver_settings(
        &self,
        driver_id: Uuid,
        service_radius_km: Option<f64>,
        start_location: Option<String>,
    ) -> Result<User, ServiceError> {
        let start_location = start_location.filter(|l| !l.trim().is_empty());

        if let Some(radius) = service_radius_km {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(ServiceError::Validation(
                    "Service radius must be a positive number of kilometres".to_string(),
                ));
            }
            if start_location.is_none() {
                return Err(ServiceError::Validation(
                    "A start location is required when setting a service radius".to_string(),
                ));
            }
        }

        let driver = self
            .db_client
            .modify_user(driver_id, |user| {
                if !user.is_driver() {
                    return Err(ServiceError::DriverNotFound(driver_id));
                }
                user.service_radius_km = service_radius_km;
                user.radius_set_at = service_radius_km.map(|_| Utc::now());
                if start_location.is_some() {
                    user.start_location = start_location;
                }
                Ok(())
            })
            .await
            .map_err(|e| match e {
                ServiceError::UserNotFound(id) => ServiceError::DriverNotFound(id),
                other => other,
            })?;

        info!(
            "Driver {} settings updated: radius {:?} km from {:?}",
            driver.id, driver.service_radius_km, driver.start_location
        );
        Ok(driver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup(balance: f64) -> (DriverService, Arc<DBClient>, User) {
        let db = Arc::new(DBClient::new());
        let mut driver = User::new("Ben Carter", "ben@example.com", UserRole::Driver);
        driver.verified = true;
        driver.wallet_balance = Some(balance);
        let driver = db.save_user(driver).await.unwrap();
        (DriverService::new(db.clone()), db, driver)
    }

    #[tokio::test]
    async fn withdraw_empties_wallet() {
        let (service, db, driver) = setup(150.75).await;

        let withdrawal = service.withdraw_funds(driver.id).await.unwrap();
        assert_eq!(withdrawal.amount, 150.75);
        assert_eq!(withdrawal.driver.wallet_balance, Some(0.0));

        let stored = db.get_user(driver.id).await.unwrap().unwrap();
        assert_eq!(stored.wallet_balance, Some(0.0));

        let again = service.withdraw_funds(driver.id).await.unwrap();
        assert_eq!(again.amount, 0.0);
    }

    #[tokio::test]
    async fn withdraw_requires_a_driver() {
        let (service, db, _) = setup(10.0).await;
        let rider = db
            .save_user(User::new("Alex Johnson", "alex@example.com", UserRole::Rider))
            .await
            .unwrap();

        let err = service.withdraw_funds(rider.id).await.unwrap_err();
        assert_eq!(err, ServiceError::DriverNotFound(rider.id));
        assert_eq!(db.get_user(rider.id).await.unwrap().unwrap().wallet_balance, None);

        let ghost = Uuid::new_v4();
        assert_eq!(service.withdraw_funds(ghost).await.unwrap_err(), ServiceError::DriverNotFound(ghost));
    }

    #[tokio::test]
    async fn radius_needs_a_start_location() {
        let (service, _, driver) = setup(0.0).await;

        let err = service
            .update_driver_settings(driver.id, Some(10.0), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = service
            .update_driver_settings(driver.id, Some(0.0), Some("Cityville".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn settings_are_stamped_and_clearable() {
        let (service, _, driver) = setup(0.0).await;

        let updated = service
            .update_driver_settings(driver.id, Some(10.0), Some("Cityville".to_string()))
            .await
            .unwrap();
        assert_eq!(updated.service_radius_km, Some(10.0));
        assert_eq!(updated.start_location.as_deref(), Some("Cityville"));
        assert!(updated.radius_set_at.is_some());

        let cleared = service.update_driver_settings(driver.id, None, None).await.unwrap();
        assert_eq!(cleared.service_radius_km, None);
        assert!(cleared.radius_set_at.is_none());
        assert_eq!(cleared.start_location.as_deref(), Some("Cityville"));
    }

    #[tokio::test]
    async fn lists_only_drivers() {
        let (service, db, driver) = setup(0.0).await;
        db.save_user(User::new("Alex Johnson", "alex@example.com", UserRole::Rider))
            .await
            .unwrap();

        let drivers = service.get_drivers().await.unwrap();
        assert_eq!(drivers.len(), 1);
        assert_eq!(drivers[0].id, driver.id);
    }
}
