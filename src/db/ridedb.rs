// db/ridedb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::{find_row, insert_row, modify_row, DBClient, DbError};
use crate::models::ridemodel::Ride;

#[async_trait]
pub trait RideExt {
    async fn get_ride(&self, ride_id: Uuid) -> Result<Option<Ride>, DbError>;

    async fn get_rides(&self) -> Result<Vec<Ride>, DbError>;

    /// Rides the user took part in as rider or driver, newest first.
    async fn get_rides_for_participant(&self, user_id: Uuid) -> Result<Vec<Ride>, DbError>;

    async fn save_ride(&self, ride: Ride) -> Result<Ride, DbError>;

    async fn modify_ride<F, E>(&self, ride_id: Uuid, apply: F) -> Result<Ride, E>
    where
        F: FnOnce(&mut Ride) -> Result<(), E> + Send,
        E: From<DbError> + Send;
}

#[async_trait]
impl RideExt for DBClient {
    async fn get_ride(&self, ride_id: Uuid) -> Result<Option<Ride>, DbError> {
        Ok(find_row(&self.rides, ride_id).await)
    }

    async fn get_rides(&self) -> Result<Vec<Ride>, DbError> {
        Ok(self.rides.read().await.clone())
    }

    async fn get_rides_for_participant(&self, user_id: Uuid) -> Result<Vec<Ride>, DbError> {
        let mut rides: Vec<Ride> = self
            .rides
            .read()
            .await
            .iter()
            .filter(|ride| ride.involves(user_id))
            .cloned()
            .collect();

        rides.sort_by(|a, b| b.requested_at.cmp(&a.requested_at));
        Ok(rides)
    }

    async fn save_ride(&self, ride: Ride) -> Result<Ride, DbError> {
        insert_row(&self.rides, ride).await
    }

    async fn modify_ride<F, E>(&self, ride_id: Uuid, apply: F) -> Result<Ride, E>
    where
        F: FnOnce(&mut Ride) -> Result<(), E> + Send,
        E: From<DbError> + Send,
    {
        modify_row(&self.rides, ride_id, apply).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::db::seed::sample_ride;

    #[tokio::test]
    async fn history_is_newest_first_and_filtered() {
        let db = DBClient::new();
        let rider = Uuid::new_v4();
        let driver = Uuid::new_v4();

        let mut older = sample_ride(rider, Some(driver));
        older.requested_at = Utc::now() - Duration::days(2);
        let newer = sample_ride(rider, None);
        let unrelated = sample_ride(Uuid::new_v4(), None);

        db.save_ride(older.clone()).await.unwrap();
        db.save_ride(newer.clone()).await.unwrap();
        db.save_ride(unrelated).await.unwrap();

        let history = db.get_rides_for_participant(rider).await.unwrap();
        assert_eq!(history.iter().map(|r| r.id).collect::<Vec<_>>(), vec![newer.id, older.id]);

        let driver_history = db.get_rides_for_participant(driver).await.unwrap();
        assert_eq!(driver_history.len(), 1);
        assert_eq!(driver_history[0].id, older.id);
    }
}
