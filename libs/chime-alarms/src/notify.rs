//! Notification channel between the alarm core and its environment
//!
//! The core reports lifecycle events through a [`Notifier`]; the CLI plugs
//! in a console sink, tests a recording sink. Events carry the data, the
//! `Display` impl renders the human-readable message.

use crate::alarm::MAX_SNOOZES;
use crate::types::{weekday_name, AlarmId, TimeOfDay};
use chrono::Weekday;
use std::fmt;
use tracing::info;

/// Lifecycle events emitted by the registry and scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmEvent {
    /// A new alarm was registered
    Registered {
        id: AlarmId,
        time: TimeOfDay,
        day: Weekday,
    },
    /// An armed alarm matched the current minute and was retired
    Fired {
        id: AlarmId,
        time: TimeOfDay,
        day: Weekday,
    },
    /// Trigger time pushed forward five minutes
    Snoozed {
        id: AlarmId,
        until: TimeOfDay,
        count: u8,
    },
    /// Snooze requested past the limit; nothing changed
    SnoozeLimitReached { id: AlarmId },
    /// Alarm removed from the registry
    Removed { id: AlarmId },
    /// Operation referenced an id the registry does not hold
    NotFound { id: AlarmId },
}

impl fmt::Display for AlarmEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlarmEvent::Registered { id, time, day } => {
                write!(f, "Alarm set for {} on {} (ID: {})", time, weekday_name(*day), id)
            },
            AlarmEvent::Fired { time, day, .. } => {
                write!(f, "*** ALARM! It's {} on {} ***", time, weekday_name(*day))
            },
            AlarmEvent::Snoozed { id, until, .. } => {
                write!(f, "Alarm {id} snoozed to {until}")
            },
            AlarmEvent::SnoozeLimitReached { id } => {
                write!(f, "Alarm {id} already snoozed {MAX_SNOOZES} times")
            },
            AlarmEvent::Removed { id } => write!(f, "Deleted alarm {id}"),
            AlarmEvent::NotFound { id } => write!(f, "No alarm with id {id}"),
        }
    }
}

/// Sink for alarm lifecycle events
pub trait Notifier: Send + Sync {
    fn notify(&self, event: &AlarmEvent);
}

/// Notifier that routes events into the tracing pipeline
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: &AlarmEvent) {
        info!("{event}");
    }
}
