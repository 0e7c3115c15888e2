use super::{SizeClass, Vehicle};
use std::fmt;

/// A single parking spot holding at most one vehicle.
///
/// Occupancy is derived from the stored vehicle, so a spot can never be
/// marked occupied without a vehicle or the other way round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingSpot {
    id: u32,
    capacity: SizeClass,
    vehicle: Option<Vehicle>,
}

impl ParkingSpot {
    #[must_use]
    pub fn new(id: u32, capacity: SizeClass) -> Self {
        Self {
            id,
            capacity,
            vehicle: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn capacity(&self) -> SizeClass {
        self.capacity
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.vehicle.is_some()
    }

    #[must_use]
    pub fn vehicle(&self) -> Option<&Vehicle> {
        self.vehicle.as_ref()
    }

    /// Whether `vehicle` could be placed here right now.
    #[must_use]
    pub fn accepts(&self, vehicle: &Vehicle) -> bool {
        !self.is_occupied() && vehicle.size().fits_in(self.capacity)
    }

    /// Places `vehicle` in the spot.
    ///
    /// Hands the vehicle back untouched if the spot is taken or too small.
    pub fn try_occupy(&mut self, vehicle: Vehicle) -> Result<(), Vehicle> {
        if !self.accepts(&vehicle) {
            return Err(vehicle);
        }
        self.vehicle = Some(vehicle);
        Ok(())
    }

    /// Empties the spot. Releasing a free spot is a no-op.
    pub fn release(&mut self) -> Option<Vehicle> {
        self.vehicle.take()
    }
}

impl fmt::Display for ParkingSpot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_occupied() { "Occupied" } else { "Free" };
        write!(f, "Spot {} [{}] - {}", self.id, self.capacity, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vehicle(size: SizeClass) -> Vehicle {
        Vehicle::new("XYZ789", size).unwrap()
    }

    #[test]
    fn class_matrix() {
        let mut accepted = Vec::new();
        for capacity in SizeClass::ALL {
            for size in SizeClass::ALL {
                let mut spot = ParkingSpot::new(1, capacity);
                let ok = spot.try_occupy(vehicle(size)).is_ok();
                assert_eq!(spot.is_occupied(), ok);
                assert_eq!(spot.vehicle().is_some(), spot.is_occupied());
                if ok {
                    accepted.push((size, capacity));
                }
            }
        }
        assert_eq!(
            accepted,
            vec![
                (SizeClass::Bike, SizeClass::Bike),
                (SizeClass::Bike, SizeClass::Car),
                (SizeClass::Car, SizeClass::Car),
                (SizeClass::Bike, SizeClass::Truck),
                (SizeClass::Car, SizeClass::Truck),
                (SizeClass::Truck, SizeClass::Truck),
            ]
        );
    }

    #[test]
    fn occupied_spot_rejects_and_returns_vehicle() {
        let mut spot = ParkingSpot::new(3, SizeClass::Truck);
        spot.try_occupy(vehicle(SizeClass::Car)).unwrap();

        let other = Vehicle::new("OTHER1", SizeClass::Bike).unwrap();
        let rejected = spot.try_occupy(other.clone()).unwrap_err();
        assert_eq!(rejected, other);
        assert_eq!(spot.vehicle().map(Vehicle::plate), Some("XYZ789"));
    }

    #[test]
    fn release_is_idempotent() {
        let mut spot = ParkingSpot::new(1, SizeClass::Car);
        spot.try_occupy(vehicle(SizeClass::Car)).unwrap();

        assert!(spot.release().is_some());
        assert!(spot.release().is_none());
        assert!(!spot.is_occupied());
        assert!(spot.vehicle().is_none());
    }

    #[test]
    fn display() {
        let mut spot = ParkingSpot::new(4, SizeClass::Bike);
        assert_eq!(spot.to_string(), "Spot 4 [BIKE] - Free");
        spot.try_occupy(vehicle(SizeClass::Bike)).unwrap();
        assert_eq!(spot.to_string(), "Spot 4 [BIKE] - Occupied");
    }
}
