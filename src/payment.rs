//! Hourly fee calculation.

use crate::clock::Timestamp;
use crate::error::PaymentError;
use crate::model::TicketId;
use serde::Serialize;
use tracing::info;

const SECONDS_PER_HOUR: i64 = 3600;

pub const DEFAULT_RATE_PER_HOUR: u64 = 10;

/// Outcome of a processed payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub ticket: TicketId,
    pub parked_seconds: i64,
    pub billed_hours: u64,
    pub amount: u64,
}

/// Stateless fee calculator billing whole hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentProcessor {
    rate_per_hour: u64,
}

impl Default for PaymentProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_RATE_PER_HOUR)
    }
}

impl PaymentProcessor {
    #[must_use]
    pub const fn new(rate_per_hour: u64) -> Self {
        Self { rate_per_hour }
    }

    #[must_use]
    pub const fn rate_per_hour(&self) -> u64 {
        self.rate_per_hour
    }

    /// Hours billed for a stay: whole hours rounded down, never less than one.
    pub fn billed_hours(parked_seconds: i64) -> Result<u64, PaymentError> {
        if parked_seconds < 0 {
            return Err(PaymentError::NegativeDuration {
                seconds: parked_seconds,
            });
        }
        // Non-negative, so the conversion cannot fail.
        let hours = u64::try_from(parked_seconds / SECONDS_PER_HOUR).unwrap_or(0);
        Ok(hours.max(1))
    }

    pub fn calculate_fee(&self, parked_seconds: i64) -> Result<u64, PaymentError> {
        self.fee_for_hours(Self::billed_hours(parked_seconds)?)
    }

    fn fee_for_hours(&self, hours: u64) -> Result<u64, PaymentError> {
        hours
            .checked_mul(self.rate_per_hour)
            .ok_or(PaymentError::FeeOverflow {
                hours,
                rate: self.rate_per_hour,
            })
    }

    /// Bills the stay from `entry` to `now`.
    ///
    /// Only computes the fee; releasing the spot is up to the caller.
    pub fn process_payment(
        &self,
        ticket: TicketId,
        entry: Timestamp,
        now: Timestamp,
    ) -> Result<Receipt, PaymentError> {
        let parked_seconds = now
            .seconds_since(entry)
            .ok_or(PaymentError::ElapsedOutOfRange { entry, now })?;
        let billed_hours = Self::billed_hours(parked_seconds)?;
        let amount = self.fee_for_hours(billed_hours)?;

        info!(%ticket, parked_seconds, billed_hours, amount, "payment processed");

        Ok(Receipt {
            ticket,
            parked_seconds,
            billed_hours,
            amount,
        })
    }
}
