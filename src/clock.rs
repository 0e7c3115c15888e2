//! Injectable time source.

use serde::Serialize;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Whole seconds since the Unix epoch.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Timestamp(secs)
    }

    #[must_use]
    pub const fn secs(self) -> i64 {
        self.0
    }

    /// Signed seconds elapsed from `earlier` to `self`, or `None` if the
    /// difference does not fit in an `i64`.
    #[must_use]
    pub fn seconds_since(self, earlier: Timestamp) -> Option<i64> {
        self.0.checked_sub(earlier.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time. A clock set before the epoch reads as negative seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    fn from_system_time(at: SystemTime) -> Timestamp {
        let secs = match at.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
            Err(before) => {
                i64::try_from(before.duration().as_secs()).map_or(i64::MIN, |secs| -secs)
            }
        };
        Timestamp(secs)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Self::from_system_time(SystemTime::now())
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same reading, so a test can keep a handle while the
/// lot owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    #[must_use]
    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            now: Rc::new(Cell::new(start.0)),
        }
    }

    pub fn set(&self, at: Timestamp) {
        self.now.set(at.0);
    }

    pub fn advance(&self, secs: i64) {
        self.now.set(self.now.get().saturating_add(secs));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.now.get())
    }
}
