use super::Vehicle;
use crate::clock::Timestamp;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const TICKET_PREFIX: &str = "T-";

/// Identifier of an active parking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TicketId(Uuid);

impl TicketId {
    #[must_use]
    pub fn generate() -> Self {
        TicketId(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        TicketId(uuid)
    }

    #[must_use]
    pub const fn value(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TICKET_PREFIX}{}", self.0)
    }
}

impl FromStr for TicketId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix(TICKET_PREFIX).unwrap_or(s);
        Uuid::parse_str(raw).map(TicketId)
    }
}

impl Serialize for TicketId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Position of a spot inside a lot.
///
/// Indices address the lot's storage; `floor` and `spot` are the
/// human-facing numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SpotLocation {
    #[serde(skip)]
    pub(crate) floor_index: usize,
    #[serde(skip)]
    pub(crate) spot_index: usize,
    pub floor: u32,
    pub spot: u32,
}

impl fmt::Display for SpotLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "floor {} spot {}", self.floor, self.spot)
    }
}

/// Record linking a parked vehicle to its spot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub id: TicketId,
    pub vehicle: Vehicle,
    pub location: SpotLocation,
    pub entered_at: Timestamp,
}
