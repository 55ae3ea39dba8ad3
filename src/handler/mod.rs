pub mod applications;
pub mod auth;
pub mod drivers;
pub mod rides;
pub mod users;
pub mod vehicles;
