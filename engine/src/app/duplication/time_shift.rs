//! Time shift transformer
//!
//! Moves timestamps by the offset between the original and the new course
//! start. Absent timestamps stay absent. Ordering between fields is the
//! caller's concern.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

/// A timestamp could not be moved without leaving chrono's range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("shifting {timestamp} by {offset_seconds}s leaves the representable range")]
pub struct ShiftOverflow {
    pub timestamp: DateTime<Utc>,
    pub offset_seconds: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeShift {
    offset: Duration,
}

impl TimeShift {
    pub fn new(offset: Duration) -> Self {
        Self { offset }
    }

    /// The shift that moves `from` onto `to`
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self::new(to.signed_duration_since(from))
    }

    pub fn offset(&self) -> Duration {
        self.offset
    }

    pub fn shift(&self, timestamp: DateTime<Utc>) -> Result<DateTime<Utc>, ShiftOverflow> {
        timestamp
            .checked_add_signed(self.offset)
            .ok_or(ShiftOverflow {
                timestamp,
                offset_seconds: self.offset.num_seconds(),
            })
    }

    pub fn shift_opt(
        &self,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<Option<DateTime<Utc>>, ShiftOverflow> {
        timestamp.map(|t| self.shift(t)).transpose()
    }
}
