use super::{ParkingSpot, SizeClass, Vehicle};
use crate::error::ConfigError;
use std::collections::HashSet;
use std::fmt;

/// An ordered row of spots scanned first-fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingFloor {
    number: u32,
    spots: Vec<ParkingSpot>,
}

impl ParkingFloor {
    /// Builds a floor, rejecting spot ids that appear more than once.
    pub fn new(number: u32, spots: Vec<ParkingSpot>) -> Result<Self, ConfigError> {
        let mut ids = HashSet::with_capacity(spots.len());
        if let Some(spot) = spots.iter().find(|spot| !ids.insert(spot.id())) {
            return Err(ConfigError::DuplicateSpot {
                floor: number,
                spot: spot.id(),
            });
        }
        Ok(Self { number, spots })
    }

    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn spots(&self) -> &[ParkingSpot] {
        &self.spots
    }

    /// First free spot in stored order that fits `vehicle`.
    ///
    /// No attempt is made to find the tightest fit: a bike takes a truck
    /// spot if that is the first free one.
    #[must_use]
    pub fn find_available_spot(&self, vehicle: &Vehicle) -> Option<&ParkingSpot> {
        self.available_index(vehicle).map(|index| &self.spots[index])
    }

    pub(crate) fn available_index(&self, vehicle: &Vehicle) -> Option<usize> {
        self.spots.iter().position(|spot| spot.accepts(vehicle))
    }

    pub(crate) fn spot_mut(&mut self, index: usize) -> Option<&mut ParkingSpot> {
        self.spots.get_mut(index)
    }

    #[must_use]
    pub fn free_spots(&self) -> usize {
        self.spots.iter().filter(|s| !s.is_occupied()).count()
    }

    /// Free spots that a vehicle of `class` could use.
    #[must_use]
    pub fn free_spots_for(&self, class: SizeClass) -> usize {
        self.spots
            .iter()
            .filter(|s| !s.is_occupied() && class.fits_in(s.capacity()))
            .count()
    }
}

impl fmt::Display for ParkingFloor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Floor {}: ", self.number)?;
        for (i, spot) in self.spots.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{spot}")?;
        }
        Ok(())
    }
}
