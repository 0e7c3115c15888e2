pub mod floor;
pub mod spot;
pub mod ticket;
pub mod vehicle;

pub use floor::ParkingFloor;
pub use spot::ParkingSpot;
pub use ticket::{SpotLocation, Ticket, TicketId};
pub use vehicle::{SizeClass, Vehicle};
