// models/vehiclemodel.rs
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Car,
    Bike,
}

impl VehicleKind {
    pub fn to_str(&self) -> &str {
        match self {
            VehicleKind::Car => "car",
            VehicleKind::Bike => "bike",
        }
    }

    pub fn other(&self) -> VehicleKind {
        match self {
            VehicleKind::Car => VehicleKind::Bike,
            VehicleKind::Bike => VehicleKind::Car,
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for VehicleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "car" | "cars" => Ok(VehicleKind::Car),
            "bike" | "bikes" => Ok(VehicleKind::Bike),
            other => Err(format!("Unknown vehicle kind: {}", other)),
        }
    }
}

/// Free-text vehicle labels grouped into two disjoint sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleRegistry {
    pub car_types: Vec<String>,
    pub bike_types: Vec<String>,
}

impl VehicleRegistry {
    pub fn labels(&self, kind: VehicleKind) -> &Vec<String> {
        match kind {
            VehicleKind::Car => &self.car_types,
            VehicleKind::Bike => &self.bike_types,
        }
    }

    pub fn labels_mut(&mut self, kind: VehicleKind) -> &mut Vec<String> {
        match kind {
            VehicleKind::Car => &mut self.car_types,
            VehicleKind::Bike => &mut self.bike_types,
        }
    }

    pub fn classify(&self, label: &str) -> Option<VehicleKind> {
        if self.car_types.iter().any(|t| t == label) {
            Some(VehicleKind::Car)
        } else if self.bike_types.iter().any(|t| t == label) {
            Some(VehicleKind::Bike)
        } else {
            None
        }
    }
}
