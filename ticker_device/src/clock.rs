//! Wall-clock time and the daily fetch window.
//!
//! The clock is only used to decide whether the current hour allows a fetch.
//! It is best effort: an unsynchronized host clock simply shifts the window.

use chrono::{FixedOffset, Timelike, Utc};

/// Source of the local hour and minute.
pub trait Clock {
    /// Current local `(hour, minute)`, hour in `0..24`.
    fn hour_minute(&self) -> (u32, u32);
}

/// UTC shifted by a fixed offset.
#[derive(Debug, Clone, Copy)]
pub struct OffsetClock {
    offset: FixedOffset,
}

impl OffsetClock {
    /// Clock `offset` away from UTC.
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for OffsetClock {
    fn hour_minute(&self) -> (u32, u32) {
        let now = Utc::now().with_timezone(&self.offset);
        (now.hour(), now.minute())
    }
}

/// Hours of the day during which scheduled fetches may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    start_hour: u32,
    end_hour: u32,
}

impl FetchWindow {
    /// Window from `start_hour` (inclusive) to `end_hour` (exclusive). A start
    /// after the end wraps past midnight.
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    /// First hour inside the window.
    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    /// First hour after the window.
    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    /// Whether `hour` falls inside the window.
    pub fn contains(&self, hour: u32) -> bool {
        if self.start_hour <= self.end_hour {
            self.start_hour <= hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

impl Default for FetchWindow {
    fn default() -> Self {
        Self::new(9, 21)
    }
}
