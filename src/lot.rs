//! Spot allocation and ticket bookkeeping across floors.

use crate::clock::{Clock, SystemClock};
use crate::error::{ConfigError, ParkError, PaymentError};
use crate::model::{ParkingFloor, SizeClass, SpotLocation, Ticket, TicketId, Vehicle};
use crate::payment::{PaymentProcessor, Receipt};
use crate::status::{FloorStatus, LotStatus, SpotStatus};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// A parking lot owning its floors and the table of active tickets.
///
/// Every active ticket points at exactly one occupied spot, and every
/// occupied spot is pointed at by exactly one active ticket.
#[derive(Debug)]
pub struct ParkingLot<C: Clock = SystemClock> {
    floors: Vec<ParkingFloor>,
    tickets: HashMap<TicketId, Ticket>,
    plates: HashMap<String, TicketId>,
    clock: C,
}

/// Fails on the first floor number that was already used by an earlier floor.
pub(crate) fn check_floor_numbers(floors: &[ParkingFloor]) -> Result<(), ConfigError> {
    let mut numbers = HashSet::with_capacity(floors.len());
    match floors.iter().find(|floor| !numbers.insert(floor.number())) {
        Some(floor) => Err(ConfigError::DuplicateFloor {
            number: floor.number(),
        }),
        None => Ok(()),
    }
}

impl ParkingLot<SystemClock> {
    pub fn new(floors: Vec<ParkingFloor>) -> Result<Self, ConfigError> {
        Self::with_clock(floors, SystemClock)
    }
}

impl<C: Clock> ParkingLot<C> {
    /// Builds an empty lot reading time from `clock`.
    ///
    /// Floor numbers must be distinct so that a ticket's floor and spot
    /// identify one spot.
    pub fn with_clock(floors: Vec<ParkingFloor>, clock: C) -> Result<Self, ConfigError> {
        check_floor_numbers(&floors)?;
        Ok(Self {
            floors,
            tickets: HashMap::new(),
            plates: HashMap::new(),
            clock,
        })
    }

    #[must_use]
    pub fn floors(&self) -> &[ParkingFloor] {
        &self.floors
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Parks `vehicle` in the first compatible free spot, scanning floors
    /// in order.
    pub fn park(&mut self, vehicle: Vehicle) -> Result<TicketId, ParkError> {
        if self.plates.contains_key(vehicle.plate()) {
            warn!(plate = vehicle.plate(), "vehicle already parked");
            return Err(ParkError::AlreadyParked {
                plate: vehicle.plate().to_string(),
            });
        }

        let class = vehicle.size();
        let Some((floor_index, spot_index)) = self.find_spot(&vehicle) else {
            warn!(plate = vehicle.plate(), %class, "no available spot");
            return Err(ParkError::LotFull { class });
        };

        let floor = &mut self.floors[floor_index];
        let floor_number = floor.number();
        let Some(spot) = floor.spot_mut(spot_index) else {
            return Err(ParkError::LotFull { class });
        };
        let spot_id = spot.id();
        // The scan above already checked the spot, so this only fails if the
        // floor changed in between, which `&mut self` rules out.
        if spot.try_occupy(vehicle.clone()).is_err() {
            return Err(ParkError::LotFull { class });
        }

        let id = TicketId::generate();
        let ticket = Ticket {
            id,
            vehicle,
            location: SpotLocation {
                floor_index,
                spot_index,
                floor: floor_number,
                spot: spot_id,
            },
            entered_at: self.clock.now(),
        };
        info!(
            ticket = %id,
            vehicle = %ticket.vehicle,
            location = %ticket.location,
            "vehicle parked"
        );
        self.plates.insert(ticket.vehicle.plate().to_string(), id);
        self.tickets.insert(id, ticket);
        Ok(id)
    }

    /// Convenience wrapper building the vehicle from its parts.
    pub fn park_vehicle(
        &mut self,
        plate: impl Into<String>,
        class: SizeClass,
    ) -> Result<TicketId, ParkError> {
        let vehicle = Vehicle::new(plate, class)?;
        self.park(vehicle)
    }

    /// Retires `ticket` and frees its spot, returning the retired ticket.
    pub fn remove(&mut self, ticket: TicketId) -> Result<Ticket, ParkError> {
        let Some(retired) = self.tickets.remove(&ticket) else {
            warn!(%ticket, "invalid ticket");
            return Err(ParkError::InvalidTicket { ticket });
        };
        self.plates.remove(retired.vehicle.plate());

        let SpotLocation {
            floor_index,
            spot_index,
            ..
        } = retired.location;
        if let Some(spot) = self
            .floors
            .get_mut(floor_index)
            .and_then(|floor| floor.spot_mut(spot_index))
        {
            spot.release();
        }

        info!(
            %ticket,
            vehicle = %retired.vehicle,
            location = %retired.location,
            "vehicle removed"
        );
        Ok(retired)
    }

    /// Computes the fee for an active ticket up to the clock's current time.
    ///
    /// The ticket stays active; call [`ParkingLot::remove`] to release the spot.
    pub fn bill(
        &self,
        ticket: TicketId,
        processor: &PaymentProcessor,
    ) -> Result<Receipt, PaymentError> {
        let Some(active) = self.tickets.get(&ticket) else {
            warn!(%ticket, "billing requested for invalid ticket");
            return Err(PaymentError::InvalidTicket { ticket });
        };
        processor.process_payment(ticket, active.entered_at, self.clock.now())
    }

    #[must_use]
    pub fn ticket(&self, ticket: TicketId) -> Option<&Ticket> {
        self.tickets.get(&ticket)
    }

    #[must_use]
    pub fn ticket_for_plate(&self, plate: &str) -> Option<&Ticket> {
        self.plates.get(plate).and_then(|id| self.tickets.get(id))
    }

    pub fn active_tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.values()
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.tickets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.floors.iter().map(|f| f.spots().len()).sum()
    }

    #[must_use]
    pub fn free_spots(&self) -> usize {
        self.floors.iter().map(ParkingFloor::free_spots).sum()
    }

    #[must_use]
    pub fn free_spots_for(&self, class: SizeClass) -> usize {
        self.floors.iter().map(|f| f.free_spots_for(class)).sum()
    }

    /// Snapshot of every spot for reporting.
    #[must_use]
    pub fn status(&self) -> LotStatus {
        let floors = self
            .floors
            .iter()
            .map(|floor| FloorStatus {
                number: floor.number(),
                spots: floor
                    .spots()
                    .iter()
                    .map(|spot| SpotStatus {
                        id: spot.id(),
                        capacity: spot.capacity(),
                        occupied: spot.is_occupied(),
                        plate: spot.vehicle().map(|v| v.plate().to_string()),
                    })
                    .collect(),
            })
            .collect();

        LotStatus {
            floors,
            active_tickets: self.active_count(),
            free_spots: self.free_spots(),
        }
    }

    fn find_spot(&self, vehicle: &Vehicle) -> Option<(usize, usize)> {
        self.floors
            .iter()
            .enumerate()
            .find_map(|(floor_index, floor)| {
                let found = floor.available_index(vehicle);
                debug!(
                    floor = floor.number(),
                    plate = vehicle.plate(),
                    found = found.is_some(),
                    "scanned floor"
                );
                found.map(|spot_index| (floor_index, spot_index))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ManualClock, Timestamp};
    use crate::error::VehicleError;
    use crate::model::ParkingSpot;
    use pretty_assertions::assert_eq;

    fn floor(number: u32, classes: &[SizeClass]) -> ParkingFloor {
        let spots = classes
            .iter()
            .zip(1..)
            .map(|(class, id)| ParkingSpot::new(id, *class))
            .collect();
        ParkingFloor::new(number, spots).unwrap()
    }

    fn lot(floors: &[&[SizeClass]]) -> ParkingLot<ManualClock> {
        let floors = floors
            .iter()
            .zip(1..)
            .map(|(classes, number)| floor(number, classes))
            .collect();
        ParkingLot::with_clock(floors, ManualClock::starting_at(Timestamp::from_secs(0))).unwrap()
    }

    fn car(plate: &str) -> Vehicle {
        Vehicle::new(plate, SizeClass::Car).unwrap()
    }

    /// Occupied spots, active tickets and the plate index all agree.
    fn assert_consistent<C: Clock>(lot: &ParkingLot<C>) {
        let spots: Vec<&ParkingSpot> = lot.floors().iter().flat_map(ParkingFloor::spots).collect();
        for spot in &spots {
            assert_eq!(spot.is_occupied(), spot.vehicle().is_some());
        }
        let occupied = spots.iter().filter(|s| s.is_occupied()).count();
        assert_eq!(occupied, lot.active_count());

        for ticket in lot.active_tickets() {
            let location = ticket.location;
            let spot = &lot.floors()[location.floor_index].spots()[location.spot_index];
            assert_eq!(spot.vehicle(), Some(&ticket.vehicle));
            assert_eq!(
                lot.ticket_for_plate(ticket.vehicle.plate()).map(|t| t.id),
                Some(ticket.id)
            );
        }
    }

    #[test]
    fn rejects_repeated_floor_number() {
        let floors = vec![
            floor(1, &[SizeClass::Car]),
            floor(2, &[SizeClass::Car]),
            floor(1, &[SizeClass::Truck]),
        ];
        assert!(matches!(
            ParkingLot::new(floors),
            Err(ConfigError::DuplicateFloor { number: 1 })
        ));
    }

    #[test]
    fn fills_floors_in_order() {
        let mut lot = lot(&[&[SizeClass::Car], &[SizeClass::Car]]);
        assert_consistent(&lot);

        let first = lot.park(car("A1")).unwrap();
        assert_consistent(&lot);
        let second = lot.park(car("B2")).unwrap();
        assert_consistent(&lot);

        assert_eq!(lot.ticket(first).unwrap().location.floor, 1);
        assert_eq!(lot.ticket(second).unwrap().location.floor, 2);
    }

    #[test]
    fn lot_full_then_space_after_removal() {
        let mut lot = lot(&[&[SizeClass::Car, SizeClass::Car]]);

        let first = lot.park(car("A1")).unwrap();
        let second = lot.park(car("B2")).unwrap();
        assert_ne!(first, second);
        assert_consistent(&lot);

        assert_eq!(
            lot.park(car("C3")),
            Err(ParkError::LotFull {
                class: SizeClass::Car
            })
        );
        assert_eq!(lot.active_count(), 2);
        assert!(lot.ticket_for_plate("C3").is_none());
        assert_consistent(&lot);

        lot.remove(first).unwrap();
        assert_consistent(&lot);
        let third = lot.park(car("C3")).unwrap();
        assert_eq!(lot.ticket(third).unwrap().location.spot, 1);
        assert_consistent(&lot);
    }

    #[test]
    fn incompatible_vehicle_leaves_lot_empty() {
        let mut lot = lot(&[&[SizeClass::Bike]]);

        assert_eq!(
            lot.park(car("A1")),
            Err(ParkError::LotFull {
                class: SizeClass::Car
            })
        );
        assert!(lot.is_empty());
        assert_eq!(lot.free_spots(), 1);
        assert_consistent(&lot);
    }

    #[test]
    fn remove_twice_fails_second_time() {
        let mut lot = lot(&[&[SizeClass::Car]]);
        let id = lot.park(car("A1")).unwrap();

        let retired = lot.remove(id).unwrap();
        assert_eq!(retired.vehicle.plate(), "A1");
        assert_consistent(&lot);

        assert_eq!(
            lot.remove(id),
            Err(ParkError::InvalidTicket { ticket: id })
        );
        assert_eq!(lot.free_spots(), 1);
        assert_consistent(&lot);
    }

    #[test]
    fn rejects_plate_already_parked() {
        let mut lot = lot(&[&[SizeClass::Car, SizeClass::Car]]);
        let id = lot.park(car("A1")).unwrap();

        assert_eq!(
            lot.park(car("A1")),
            Err(ParkError::AlreadyParked {
                plate: "A1".to_string()
            })
        );
        assert_eq!(lot.active_count(), 1);
        assert_eq!(lot.free_spots(), 1);
        assert_eq!(lot.ticket_for_plate("A1").map(|t| t.id), Some(id));
        assert_consistent(&lot);
    }

    #[test]
    fn plate_can_park_again_after_removal() {
        let mut lot = lot(&[&[SizeClass::Car]]);
        let first = lot.park(car("A1")).unwrap();
        lot.remove(first).unwrap();

        assert!(lot.ticket_for_plate("A1").is_none());
        let second = lot.park(car("A1")).unwrap();
        assert_ne!(first, second);
        assert!(lot.ticket(first).is_none());
        assert_consistent(&lot);
    }

    #[test]
    fn bill_uses_recorded_entry_time() {
        let mut lot = lot(&[&[SizeClass::Car]]);
        lot.clock().set(Timestamp::from_secs(1_000));
        let id = lot.park(car("A1")).unwrap();
        assert_eq!(lot.ticket(id).unwrap().entered_at, Timestamp::from_secs(1_000));

        lot.clock().advance(2 * 3600 + 10);
        let receipt = lot.bill(id, &PaymentProcessor::new(10)).unwrap();
        assert_eq!(receipt.billed_hours, 2);
        assert_eq!(receipt.amount, 20);

        // Billing alone keeps the spot taken.
        assert_eq!(lot.active_count(), 1);
        assert_eq!(lot.free_spots(), 0);
        assert_consistent(&lot);
    }

    #[test]
    fn bill_unknown_ticket() {
        let lot = lot(&[&[SizeClass::Car]]);
        let id = TicketId::generate();
        assert_eq!(
            lot.bill(id, &PaymentProcessor::default()),
            Err(PaymentError::InvalidTicket { ticket: id })
        );
        assert_consistent(&lot);
    }

    #[test]
    fn park_vehicle_validates_plate() {
        let mut lot = lot(&[&[SizeClass::Truck]]);
        assert_eq!(
            lot.park_vehicle("", SizeClass::Bike),
            Err(ParkError::InvalidVehicle(VehicleError::EmptyPlate))
        );
        assert_consistent(&lot);

        let id = lot.park_vehicle("BIKE1", SizeClass::Bike).unwrap();
        assert_eq!(lot.ticket(id).unwrap().vehicle.size(), SizeClass::Bike);
        assert_consistent(&lot);
    }

    #[test]
    fn status_reports_every_spot() {
        let mut lot = lot(&[&[SizeClass::Car, SizeClass::Bike]]);
        lot.park(car("A1")).unwrap();

        let status = lot.status();
        assert_eq!(status.active_tickets, 1);
        assert_eq!(status.free_spots, 1);
        assert_eq!(status.total_spots(), 2);
        assert_eq!(
            status.floors[0].spots,
            vec![
                SpotStatus {
                    id: 1,
                    capacity: SizeClass::Car,
                    occupied: true,
                    plate: Some("A1".to_string()),
                },
                SpotStatus {
                    id: 2,
                    capacity: SizeClass::Bike,
                    occupied: false,
                    plate: None,
                },
            ]
        );
        assert_eq!(lot.capacity(), 2);
        assert_eq!(lot.free_spots_for(SizeClass::Car), 0);
        assert_eq!(lot.free_spots_for(SizeClass::Bike), 1);
    }
}
