// service/story_service.rs
use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{config::Config, models::ridemodel::Ride};

pub const MISSING_KEY_MESSAGE: &str = "Gemini API key is not configured. Cannot generate story.";
pub const GENERATION_FAILED_MESSAGE: &str = "Could not generate a story for this ride. Please try again later.";

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Turns a ride into a short narrative for the rider. Implementations never
/// fail outward: errors degrade to a fixed message.
#[async_trait]
pub trait RideStoryteller: Debug + Send + Sync {
    async fn summarize(&self, ride: &Ride) -> String;
}

/// Used when no generator is configured.
#[derive(Debug, Clone)]
pub struct FallbackStoryteller {
    message: String,
}

impl FallbackStoryteller {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FallbackStoryteller {
    fn default() -> Self {
        Self::new(MISSING_KEY_MESSAGE)
    }
}

#[async_trait]
impl RideStoryteller for FallbackStoryteller {
    async fn summarize(&self, _ride: &Ride) -> String {
        self.message.clone()
    }
}

#[derive(Error, Debug)]
pub enum StoryError {
    #[error("Request to Gemini failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gemini returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Gemini response contained no text")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()
            .map(|p| p.text.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

pub fn story_prompt(ride: &Ride) -> String {
    let driver = ride.driver_name.as_deref().unwrap_or("Their driver");
    format!(
        "Write a short, playful story of no more than 100 words about {} getting home safely. \
         Rather than driving under the influence, {} made the responsible call and booked a SafeRide \
         driver. {} picked them up at \"{}\" and dropped them off at \"{}\" in a {}. \
         End by celebrating that smart choice.",
        ride.rider_name, ride.rider_name, driver, ride.pickup_location, ride.dropoff_location, ride.vehicle_type
    )
}

#[derive(Debug, Clone)]
pub struct GeminiStoryteller {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiStoryteller {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
        }
    }

    async fn generate(&self, prompt: String) -> Result<String, StoryError> {
        let url = format!("{}/{}:generateContent", GEMINI_BASE_URL, self.model);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoryError::Status(response.status()));
        }

        let payload: GenerateResponse = response.json().await?;
        payload.first_text().ok_or(StoryError::EmptyResponse)
    }
}

#[async_trait]
impl RideStoryteller for GeminiStoryteller {
    async fn summarize(&self, ride: &Ride) -> String {
        match self.generate(story_prompt(ride)).await {
            Ok(story) => {
                debug!("Generated story for ride {}", ride.id);
                story
            }
            Err(e) => {
                warn!("Story generation for ride {} failed: {}", ride.id, e);
                GENERATION_FAILED_MESSAGE.to_string()
            }
        }
    }
}

pub fn storyteller_from_config(config: &Config) -> Arc<dyn RideStoryteller> {
    match &config.gemini_api_key {
        Some(key) => Arc::new(GeminiStoryteller::new(key.clone(), config.gemini_model.clone())),
        None => {
            warn!("GEMINI_API_KEY not set, ride stories are disabled");
            Arc::new(FallbackStoryteller::default())
        }
    }
}
