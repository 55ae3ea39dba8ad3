pub mod drivermodel;
pub mod ridemodel;
pub mod usermodel;
pub mod vehiclemodel;
