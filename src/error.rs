//! Error types for the parking lot.

use std::path::PathBuf;
use thiserror::Error;

use crate::clock::Timestamp;
use crate::model::{SizeClass, TicketId};

/// Errors raised while constructing a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VehicleError {
    /// The license plate is empty or only whitespace.
    #[error("license plate must not be empty")]
    EmptyPlate,

    /// A size class name is not one of bike, car or truck.
    #[error("unknown size class '{name}'")]
    UnknownSizeClass { name: String },
}

/// Errors that can occur when parking or removing a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParkError {
    /// No floor has a free spot that fits the vehicle.
    #[error("no available spot for a {class} vehicle")]
    LotFull { class: SizeClass },

    /// The plate already holds an active ticket.
    #[error("vehicle '{plate}' is already parked")]
    AlreadyParked { plate: String },

    /// The ticket is not active in this lot.
    #[error("invalid ticket {ticket}")]
    InvalidTicket { ticket: TicketId },

    /// The vehicle could not be constructed.
    #[error(transparent)]
    InvalidVehicle(#[from] VehicleError),
}

/// Errors that can occur when computing a fee.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// The ticket is not active in this lot.
    #[error("invalid ticket {ticket}")]
    InvalidTicket { ticket: TicketId },

    /// The parked duration is negative (exit before entry).
    #[error("parked duration must not be negative, got {seconds}s")]
    NegativeDuration { seconds: i64 },

    /// The stay between entry and exit does not fit into seconds.
    #[error("elapsed time from {entry} to {now} is out of range")]
    ElapsedOutOfRange { entry: Timestamp, now: Timestamp },

    /// The fee does not fit into the currency type.
    #[error("fee for {hours}h at rate {rate} overflows")]
    FeeOverflow { hours: u64, rate: u64 },
}

/// Errors that can occur when building a lot, from a configuration file or
/// directly from floors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration is not valid JSON for a lot.
    #[error("invalid lot configuration: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// The lot has no floors.
    #[error("lot must have at least one floor")]
    NoFloors,

    /// Two floors share the same number.
    #[error("floor {number} is defined more than once")]
    DuplicateFloor { number: u32 },

    /// Two spots on one floor share the same id.
    #[error("spot {spot} is defined more than once on floor {floor}")]
    DuplicateSpot { floor: u32, spot: u32 },

    /// A spot run declares zero spots.
    #[error("spot run on floor {floor} has no spots")]
    EmptyRun { floor: u32 },

    /// A spot run extends past the largest spot id.
    #[error("spot ids on floor {floor} run past {max}", max = u32::MAX)]
    SpotIdOverflow { floor: u32 },
}

/// Errors that can occur when exporting data.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write data: {message}")]
    WriteError { message: String },

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messages_name_the_offending_value() {
        let err = ParkError::LotFull {
            class: SizeClass::Truck,
        };
        assert_eq!(err.to_string(), "no available spot for a TRUCK vehicle");

        let err = ConfigError::DuplicateSpot { floor: 2, spot: 7 };
        assert_eq!(
            err.to_string(),
            "spot 7 is defined more than once on floor 2"
        );

        let err = PaymentError::ElapsedOutOfRange {
            entry: Timestamp::from_secs(-1),
            now: Timestamp::from_secs(i64::MAX),
        };
        assert_eq!(
            err.to_string(),
            format!("elapsed time from -1s to {}s is out of range", i64::MAX)
        );
    }
}
