pub mod application_service;
pub mod driver_service;
pub mod error;
pub mod ride_service;
pub mod story_service;
pub mod verification_service;
