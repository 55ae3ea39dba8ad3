pub mod driverdtos;
pub mod ridedtos;
pub mod userdtos;
pub mod vehicledtos;
