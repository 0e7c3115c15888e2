use crate::error::VehicleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Size of a vehicle, and the largest vehicle a spot can hold.
///
/// Variants are declared smallest first so the derived ordering is the
/// capacity ordering: `Bike < Car < Truck`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Bike,
    Car,
    Truck,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Bike, SizeClass::Car, SizeClass::Truck];

    /// Whether a vehicle of this size may use a spot of `capacity`.
    #[must_use]
    pub fn fits_in(self, capacity: SizeClass) -> bool {
        self <= capacity
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SizeClass::Bike => "BIKE",
            SizeClass::Car => "CAR",
            SizeClass::Truck => "TRUCK",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SizeClass {
    type Err = VehicleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bike" => Ok(SizeClass::Bike),
            "car" => Ok(SizeClass::Car),
            "truck" => Ok(SizeClass::Truck),
            _ => Err(VehicleError::UnknownSizeClass {
                name: s.to_string(),
            }),
        }
    }
}

/// A physical vehicle. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Vehicle {
    plate: String,
    size: SizeClass,
}

impl Vehicle {
    pub fn new(plate: impl Into<String>, size: SizeClass) -> Result<Self, VehicleError> {
        let plate = plate.into().trim().to_string();
        if plate.is_empty() {
            return Err(VehicleError::EmptyPlate);
        }
        Ok(Self { plate, size })
    }

    #[must_use]
    pub fn plate(&self) -> &str {
        &self.plate
    }

    #[must_use]
    pub fn size(&self) -> SizeClass {
        self.size
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.size, self.plate)
    }
}
