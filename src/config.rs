//! Lot topology and billing configuration.

use crate::clock::Clock;
use crate::error::ConfigError;
use crate::lot::{check_floor_numbers, ParkingLot};
use crate::model::{ParkingFloor, ParkingSpot, SizeClass};
use crate::payment::{PaymentProcessor, DEFAULT_RATE_PER_HOUR};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A run of consecutive spots sharing one capacity class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotRun {
    pub class: SizeClass,
    pub count: u32,
    /// Id of the first spot; continues from the previous run when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorConfig {
    pub number: u32,
    pub spots: Vec<SpotRun>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotConfig {
    #[serde(default = "default_rate")]
    pub rate_per_hour: u64,
    pub floors: Vec<FloorConfig>,
}

fn default_rate() -> u64 {
    DEFAULT_RATE_PER_HOUR
}

impl Default for LotConfig {
    /// One floor with five car spots followed by five bike spots.
    fn default() -> Self {
        Self {
            rate_per_hour: DEFAULT_RATE_PER_HOUR,
            floors: vec![FloorConfig {
                number: 1,
                spots: vec![
                    SpotRun {
                        class: SizeClass::Car,
                        count: 5,
                        first_id: None,
                    },
                    SpotRun {
                        class: SizeClass::Bike,
                        count: 5,
                        first_id: None,
                    },
                ],
            }],
        }
    }
}

/// Reads and validates a lot configuration from a JSON file.
///
/// # Example
///
/// ```no_run
/// use parklot::config::load_config;
///
/// let config = load_config("lot.json")?;
/// let lot = config.build_lot()?;
/// println!("{} spots", lot.capacity());
/// # Ok::<(), parklot::error::ConfigError>(())
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LotConfig, ConfigError> {
    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::FileRead {
        path: path.as_ref().to_path_buf(),
        source,
    })?;
    let config: LotConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl LotConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_floors().map(|_| ())
    }

    /// Expands the spot runs into floors, in declaration order.
    pub fn build_floors(&self) -> Result<Vec<ParkingFloor>, ConfigError> {
        if self.floors.is_empty() {
            return Err(ConfigError::NoFloors);
        }

        let floors = self
            .floors
            .iter()
            .map(FloorConfig::build)
            .collect::<Result<Vec<_>, _>>()?;
        check_floor_numbers(&floors)?;
        Ok(floors)
    }

    #[must_use]
    pub fn processor(&self) -> PaymentProcessor {
        PaymentProcessor::new(self.rate_per_hour)
    }

    pub fn build_lot(&self) -> Result<ParkingLot, ConfigError> {
        self.build_floors().and_then(ParkingLot::new)
    }

    pub fn build_lot_with_clock<C: Clock>(&self, clock: C) -> Result<ParkingLot<C>, ConfigError> {
        self.build_floors()
            .and_then(|floors| ParkingLot::with_clock(floors, clock))
    }
}

impl FloorConfig {
    fn build(&self) -> Result<ParkingFloor, ConfigError> {
        let overflow = || ConfigError::SpotIdOverflow { floor: self.number };
        let mut spots = Vec::new();
        // `None` once the previous run ended at u32::MAX.
        let mut next_id = Some(1);

        for run in &self.spots {
            if run.count == 0 {
                return Err(ConfigError::EmptyRun { floor: self.number });
            }
            let start = run.first_id.or(next_id).ok_or_else(overflow)?;
            let last = start.checked_add(run.count - 1).ok_or_else(overflow)?;
            spots.extend((start..=last).map(|id| ParkingSpot::new(id, run.class)));
            next_id = last.checked_add(1);
        }

        ParkingFloor::new(self.number, spots)
    }
}
