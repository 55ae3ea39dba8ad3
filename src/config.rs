// config.rs
use std::{str::FromStr, time::Duration};

/// Artificial delays applied before each workflow step so clients see the
/// same pacing the hosted demo had.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LatencyProfile {
    pub ride_request: Duration,
    pub driver_match: Duration,
    pub ride_start: Duration,
    pub ride_complete: Duration,
    pub verification: Duration,
}

impl LatencyProfile {
    pub fn none() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub log_level: String,
    pub cors_origins: Vec<String>,
    pub seed_demo_data: bool,
    pub incentive_rate: f64,
    pub latency: LatencyProfile,
    // Ride story generation; stories fall back to a static message when unset.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8000,
            log_level: "debug".to_string(),
            cors_origins: vec!["http://localhost:5173".to_string()],
            seed_demo_data: true,
            incentive_rate: 0.1,
            latency: LatencyProfile::none(),
            gemini_api_key: None,
            gemini_model: "gemini-2.5-flash".to_string(),
        }
    }
}

impl Config {
    pub fn init() -> Config {
        let defaults = Config::default();

        let cors_origins = std::env::var("CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_origins);

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        Config {
            port: env_or("PORT", defaults.port),
            log_level: env_or("LOG_LEVEL", defaults.log_level),
            cors_origins,
            seed_demo_data: env_or("SEED_DEMO_DATA", defaults.seed_demo_data),
            incentive_rate: env_or("INCENTIVE_RATE", defaults.incentive_rate),
            latency: LatencyProfile {
                ride_request: millis_or("RIDE_REQUEST_DELAY_MS", 1000),
                driver_match: millis_or("DRIVER_MATCH_DELAY_MS", 3000),
                ride_start: millis_or("RIDE_START_DELAY_MS", 3000),
                ride_complete: millis_or("RIDE_COMPLETE_DELAY_MS", 5000),
                verification: millis_or("VERIFICATION_DELAY_MS", 1000),
            },
            gemini_api_key,
            gemini_model: env_or("GEMINI_MODEL", defaults.gemini_model),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparsable value for {}: {:?}", key, raw);
            default
        }),
        Err(_) => default,
    }
}

fn millis_or(key: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_or(key, default_ms))
}
