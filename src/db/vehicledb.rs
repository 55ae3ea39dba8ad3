// db/vehicledb.rs
use async_trait::async_trait;

use super::{DBClient, DbError};
use crate::models::vehiclemodel::{VehicleKind, VehicleRegistry};

#[async_trait]
pub trait VehicleExt {
    async fn get_vehicle_types(&self, kind: VehicleKind) -> Result<Vec<String>, DbError>;

    /// Labels are trimmed before every lookup or write.
    ///
    /// Adding a label that is already listed under `kind` is a no-op. A label
    /// listed under the other kind is refused so the sets stay disjoint.
    async fn add_vehicle_type(&self, kind: VehicleKind, label: &str) -> Result<Vec<String>, DbError>;

    async fn remove_vehicle_type(&self, kind: VehicleKind, label: &str) -> Result<Vec<String>, DbError>;

    async fn classify_vehicle_type(&self, label: &str) -> Result<Option<VehicleKind>, DbError>;

    async fn replace_vehicle_registry(&self, registry: VehicleRegistry) -> Result<(), DbError>;
}

#[async_trait]
impl VehicleExt for DBClient {
    async fn get_vehicle_types(&self, kind: VehicleKind) -> Result<Vec<String>, DbError> {
        Ok(self.vehicles.read().await.labels(kind).clone())
    }

    async fn add_vehicle_type(&self, kind: VehicleKind, label: &str) -> Result<Vec<String>, DbError> {
        let label = label.trim();
        let mut registry = self.vehicles.write().await;

        if registry.labels(kind.other()).iter().any(|t| t == label) {
            return Err(DbError::UniqueViolation {
                table: match kind.other() {
                    VehicleKind::Car => "car_types",
                    VehicleKind::Bike => "bike_types",
                },
                value: label.to_string(),
            });
        }

        let labels = registry.labels_mut(kind);
        if !labels.iter().any(|t| t == label) {
            labels.push(label.to_string());
        }

        Ok(labels.clone())
    }

    async fn remove_vehicle_type(&self, kind: VehicleKind, label: &str) -> Result<Vec<String>, DbError> {
        let label = label.trim();
        let mut registry = self.vehicles.write().await;
        let labels = registry.labels_mut(kind);
        labels.retain(|t| t != label);
        Ok(labels.clone())
    }

    async fn classify_vehicle_type(&self, label: &str) -> Result<Option<VehicleKind>, DbError> {
        Ok(self.vehicles.read().await.classify(label.trim()))
    }

    async fn replace_vehicle_registry(&self, registry: VehicleRegistry) -> Result<(), DbError> {
        *self.vehicles.write().await = registry;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn adding_twice_keeps_one_entry() {
        let db = DBClient::new();
        db.add_vehicle_type(VehicleKind::Car, "Sedan").await.unwrap();
        let cars = db.add_vehicle_type(VehicleKind::Car, "Sedan").await.unwrap();

        assert_eq!(cars, vec!["Sedan".to_string()]);
    }

    #[tokio::test]
    async fn removing_missing_label_is_a_noop() {
        let db = DBClient::new();
        db.add_vehicle_type(VehicleKind::Bike, "Cruiser").await.unwrap();

        let bikes = db.remove_vehicle_type(VehicleKind::Bike, "Scooter").await.unwrap();
        assert_eq!(bikes, vec!["Cruiser".to_string()]);

        let bikes = db.remove_vehicle_type(VehicleKind::Bike, "Cruiser").await.unwrap();
        assert!(bikes.is_empty());
    }

    #[tokio::test]
    async fn label_cannot_be_both_car_and_bike() {
        let db = DBClient::new();
        db.add_vehicle_type(VehicleKind::Car, "Sport").await.unwrap();

        let err = db.add_vehicle_type(VehicleKind::Bike, "Sport").await.unwrap_err();
        assert_eq!(
            err,
            DbError::UniqueViolation { table: "car_types", value: "Sport".to_string() }
        );
        assert_eq!(db.classify_vehicle_type("Sport").await.unwrap(), Some(VehicleKind::Car));
    }

    #[tokio::test]
    async fn labels_are_trimmed_on_every_call() {
        let db = DBClient::new();
        let bikes = db.add_vehicle_type(VehicleKind::Bike, " Scooter ").await.unwrap();
        assert_eq!(bikes, vec!["Scooter".to_string()]);

        assert_eq!(db.classify_vehicle_type("Scooter  ").await.unwrap(), Some(VehicleKind::Bike));

        let bikes = db.remove_vehicle_type(VehicleKind::Bike, "  Scooter").await.unwrap();
        assert!(bikes.is_empty());
    }
}
