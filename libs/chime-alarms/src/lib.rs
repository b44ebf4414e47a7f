//! Chime Alarms - alarm registry and reconciliation scheduler
//!
//! Core library for the Chime alarm clock:
//! - Alarm entity with a bounded snooze state machine (5 minutes a pop,
//!   three pops maximum)
//! - Registry owning the shared alarm collection behind one coarse lock
//! - Minute-resolution reconciliation loop with cooperative shutdown
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  Scheduler  │────▶│   Registry   │────▶│  Notifier   │
//! │  (60s tick) │     │ (Mutex<Vec>) │     │ (events out)│
//! └─────────────┘     └──────────────┘     └─────────────┘
//!        │                   ▲
//!        ▼                   │
//! ┌─────────────┐     ┌──────────────┐
//! │    Clock    │     │  CLI shell   │
//! │ (wall time) │     │ (commands in)│
//! └─────────────┘     └──────────────┘
//! ```

mod alarm;
mod clock;
mod error;
mod notify;
mod registry;
mod scheduler;
mod types;

// Re-export public API
pub use alarm::{Alarm, SnoozeOutcome, SnoozeState, MAX_SNOOZES, SNOOZE_MINUTES};
pub use clock::{Clock, SystemClock};
pub use error::{AlarmError, Result};
pub use notify::{AlarmEvent, LogNotifier, Notifier};
pub use registry::{AlarmRegistry, AlarmSnapshot};
pub use scheduler::{AlarmScheduler, SchedulerStatus, DEFAULT_TICK_SECS};
pub use types::{parse_time, parse_weekday, weekday_name, AlarmId, TimeOfDay, WallInstant};

// The weekday type used throughout the API
pub use chrono::Weekday;
