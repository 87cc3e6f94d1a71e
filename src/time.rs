//! Simulated calendar.
//!
//! The simulation moves in whole months. `Calendar::advance` is the only way
//! time moves forward, and it always moves exactly one month, rolling the
//! year over after December. Game logic never looks at wall-clock time, which
//! keeps every run reproducible and fully testable.

use serde::{Deserialize, Serialize};

pub const MONTHS_PER_YEAR: u8 = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    /// 1..=12
    pub month: u8,
    /// Starts at 1.
    pub year: u32,
}

impl Calendar {
    pub fn new(month: u8, year: u32) -> Self {
        Self { month, year }
    }

    /// Advance by exactly one month. Month 13 normalizes to month 1 of the
    /// next year.
    pub fn advance(&mut self) {
        self.month += 1;
        if self.month > MONTHS_PER_YEAR {
            self.month = 1;
            self.year += 1;
        }
    }

    /// Total months since month 1 of year 1 (0-based).
    pub fn months_elapsed(&self) -> u32 {
        self.year.saturating_sub(1) * MONTHS_PER_YEAR as u32 + (self.month as u32).saturating_sub(1)
    }

    pub fn is_valid(&self) -> bool {
        (1..=MONTHS_PER_YEAR).contains(&self.month) && self.year >= 1
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self { month: 1, year: 1 }
    }
}
