// service/verification_service.rs
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::{
    config::LatencyProfile,
    db::{DBClient, UserExt},
    models::usermodel::{User, VerificationDocuments},
    service::error::ServiceError,
};

/// What a rider submits to get verified.
#[derive(Debug, Clone, Default)]
pub struct VerificationRequest {
    pub documents: VerificationDocuments,
    pub vehicle_type: Option<String>,
    /// False when the vehicle is registered to someone else, in which case a
    /// no-objection certificate from the owner is required.
    pub registration_name_matches: bool,
}

fn present(doc: &Option<String>) -> bool {
    doc.as_deref().map(|d| !d.trim().is_empty()).unwrap_or(false)
}

fn missing_documents(request: &VerificationRequest) -> Vec<&'static str> {
    let docs = &request.documents;
    let mut missing = Vec::new();

    if !present(&docs.national_id_doc) {
        missing.push("national_id_doc");
    }
    if !present(&docs.driving_license_doc) {
        missing.push("driving_license_doc");
    }
    if !present(&docs.vehicle_registration_doc) {
        missing.push("vehicle_registration_doc");
    }
    if !request.registration_name_matches && !present(&docs.noc_doc) {
        missing.push("noc_doc");
    }

    missing
}

#[derive(Debug, Clone)]
pub struct VerificationService {
    db_client: Arc<DBClient>,
    latency: LatencyProfile,
}

impl VerificationService {
    pub fn new(db_client: Arc<DBClient>, latency: LatencyProfile) -> Self {
        Self { db_client, latency }
    }

    /// Stores the submitted documents and marks the user verified. There is no
    /// review step, a complete submission is accepted as is.
    pub async fn verify_user(&self, user_id: Uuid, request: VerificationRequest) -> Result<User, ServiceError> {
        tokio::time::sleep(self.latency.verification).await;

        let missing = missing_documents(&request);
        if !missing.is_empty() {
            return Err(ServiceError::Validation(format!(
                "Missing verification documents: {}",
                missing.join(", ")
            )));
        }

        let VerificationRequest {
            documents,
            vehicle_type,
            ..
        } = request;

        let user = self
            .db_client
            .modify_user(user_id, |user| {
                user.verified = true;
                user.documents = VerificationDocuments {
                    tax_id_doc: user.documents.tax_id_doc.take(),
                    address_proof_doc: user.documents.address_proof_doc.take(),
                    ..documents
                };
                if let Some(vehicle_type) = vehicle_type.filter(|v| !v.trim().is_empty()) {
                    user.vehicle_type = Some(vehicle_type);
                }
                Ok::<(), ServiceError>(())
            })
            .await?;

        info!("User {} verified", user.id);
        Ok(user)
    }
}
