//! # parklot
//!
//! Parking lot allocation and billing.
//!
//! ## Features
//!
//! - Bike, car and truck spots spread over ordered floors
//! - First-fit allocation: a vehicle takes the first free spot it fits in
//! - Unique tickets per parking session, one active session per plate
//! - Hourly billing with a one hour minimum
//! - Lot topology from JSON, status export to CSV and JSON
//!
//! ## Example
//!
//! ```
//! use parklot::clock::{ManualClock, Timestamp};
//! use parklot::config::LotConfig;
//! use parklot::model::SizeClass;
//!
//! let clock = ManualClock::starting_at(Timestamp::from_secs(0));
//! let config = LotConfig::default();
//! let mut lot = config.build_lot_with_clock(clock.clone())?;
//!
//! let ticket = lot.park_vehicle("ABC123", SizeClass::Car)?;
//! clock.advance(2 * 3600);
//! let receipt = lot.bill(ticket, &config.processor())?;
//! assert_eq!(receipt.amount, 20);
//! lot.remove(ticket)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod lot;
pub mod model;
pub mod payment;
pub mod status;

pub use lot::ParkingLot;
pub use payment::{PaymentProcessor, Receipt};
