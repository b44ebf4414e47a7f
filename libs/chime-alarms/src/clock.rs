//! Wall-clock abstraction
//!
//! The scheduler only needs the current minute and weekday. Production code
//! uses [`SystemClock`]; tests substitute a programmable implementation.

use crate::types::{TimeOfDay, WallInstant};
use chrono::{Datelike, Local};

/// Source of minute-resolution wall-clock readings
pub trait Clock: Send + Sync {
    /// Current time truncated to the minute, plus the current weekday
    fn now(&self) -> WallInstant;
}

/// System clock in local time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> WallInstant {
        let now = Local::now();
        WallInstant {
            time: TimeOfDay::from(now.time()),
            day: now.weekday(),
        }
    }
}
