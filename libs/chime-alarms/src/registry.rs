//! Alarm registry - the shared alarm collection and its operations
//!
//! All reads and writes to the collection go through one coarse mutex. The
//! collection is small and every critical section is short, so a single
//! lock covering both foreground commands and the scheduler's
//! reconciliation pass is sufficient; no per-alarm locking.
//!
//! Every mutating operation either fully succeeds or leaves state
//! unchanged; parse failures at the string boundary never touch the
//! collection.

use crate::alarm::{Alarm, SnoozeOutcome};
use crate::error::Result;
use crate::notify::{AlarmEvent, Notifier};
use crate::types::{parse_time, parse_weekday, weekday_name, AlarmId, TimeOfDay, WallInstant};
use chrono::Weekday;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Read-only view of one alarm
#[derive(Debug, Clone, Serialize)]
pub struct AlarmSnapshot {
    pub id: AlarmId,
    pub scheduled: TimeOfDay,
    pub effective: TimeOfDay,
    #[serde(serialize_with = "serialize_weekday")]
    pub day: Weekday,
    pub snooze_count: u8,
    pub active: bool,
}

fn serialize_weekday<S: serde::Serializer>(
    day: &Weekday,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_name(*day))
}

impl From<&Alarm> for AlarmSnapshot {
    fn from(alarm: &Alarm) -> Self {
        Self {
            id: alarm.id(),
            scheduled: alarm.scheduled_time(),
            effective: alarm.effective_time(),
            day: alarm.day(),
            snooze_count: alarm.snooze_count(),
            active: alarm.is_active(),
        }
    }
}

/// Shared alarm collection, insertion-ordered
pub struct AlarmRegistry {
    alarms: Mutex<Vec<Alarm>>,
    notifier: Arc<dyn Notifier>,
}

impl AlarmRegistry {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            alarms: Mutex::new(Vec::new()),
            notifier,
        }
    }

    /// Register a new armed alarm
    pub fn add(&self, time: TimeOfDay, day: Weekday) -> AlarmId {
        let id = AlarmId::generate();
        self.alarms.lock().push(Alarm::new(id, time, day));
        info!("Registered alarm {} at {} on {}", id, time, weekday_name(day));
        self.notifier.notify(&AlarmEvent::Registered { id, time, day });
        id
    }

    /// Remove by id; idempotent, `false` when the id is unknown
    pub fn remove(&self, id: &AlarmId) -> bool {
        let removed = {
            let mut alarms = self.alarms.lock();
            let before = alarms.len();
            alarms.retain(|a| a.id() != *id);
            alarms.len() != before
        };
        if removed {
            info!("Removed alarm {id}");
            self.notifier.notify(&AlarmEvent::Removed { id: *id });
        } else {
            self.notifier.notify(&AlarmEvent::NotFound { id: *id });
        }
        removed
    }

    /// Snooze by id; `None` when no alarm holds the id
    ///
    /// The outcome decides the notification: a successful snooze reports
    /// the new trigger time, an exhausted allowance reports the limit.
    pub fn snooze(&self, id: &AlarmId) -> Option<SnoozeOutcome> {
        let outcome = {
            let mut alarms = self.alarms.lock();
            alarms.iter_mut().find(|a| a.id() == *id).map(Alarm::snooze)
        };
        match outcome {
            Some(SnoozeOutcome::Snoozed { until, count }) => {
                self.notifier.notify(&AlarmEvent::Snoozed {
                    id: *id,
                    until,
                    count,
                });
            },
            Some(SnoozeOutcome::LimitReached) => {
                self.notifier.notify(&AlarmEvent::SnoozeLimitReached { id: *id });
            },
            None => self.notifier.notify(&AlarmEvent::NotFound { id: *id }),
        }
        outcome
    }

    /// Clear any snooze override; `false` when the id is unknown
    pub fn reset_snooze(&self, id: &AlarmId) -> bool {
        let mut alarms = self.alarms.lock();
        match alarms.iter_mut().find(|a| a.id() == *id) {
            Some(alarm) => {
                alarm.reset_snooze();
                debug!("Snooze state cleared for alarm {id}");
                true
            },
            None => false,
        }
    }

    /// First alarm whose scheduled (not effective) time and day match
    pub fn find_by_time_day(&self, time: TimeOfDay, day: Weekday) -> Option<AlarmSnapshot> {
        self.alarms
            .lock()
            .iter()
            .find(|a| a.scheduled_time() == time && a.day() == day)
            .map(AlarmSnapshot::from)
    }

    /// Snooze the first alarm matching scheduled time + day; `None` = no match
    pub fn snooze_by_time_day(&self, time: TimeOfDay, day: Weekday) -> Option<SnoozeOutcome> {
        let id = self.find_by_time_day(time, day)?.id;
        self.snooze(&id)
    }

    /// Snapshots in insertion order, unfiltered
    pub fn list(&self) -> Vec<AlarmSnapshot> {
        self.alarms.lock().iter().map(AlarmSnapshot::from).collect()
    }

    pub fn len(&self) -> usize {
        self.alarms.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.lock().is_empty()
    }

    /// Number of alarms still armed
    pub fn armed(&self) -> usize {
        self.alarms.lock().iter().filter(|a| a.is_active()).count()
    }

    /// One reconciliation pass: retire and report every due alarm
    ///
    /// Level-triggered: a retired alarm no longer matches, so a second pass
    /// within the same minute fires nothing. Returns the fired ids.
    pub fn fire_due(&self, at: WallInstant) -> Vec<AlarmId> {
        let fired: Vec<AlarmId> = {
            let mut alarms = self.alarms.lock();
            alarms
                .iter_mut()
                .filter(|a| a.is_due(at.time, at.day))
                .map(|a| {
                    a.deactivate();
                    a.id()
                })
                .collect()
        };
        for id in &fired {
            info!("Alarm {} fired at {} on {}", id, at.time, weekday_name(at.day));
            self.notifier.notify(&AlarmEvent::Fired {
                id: *id,
                time: at.time,
                day: at.day,
            });
        }
        fired
    }

    // ========================================================================
    // String boundary (CLI-facing): parse, then delegate
    // ========================================================================

    /// Parse and register; a parse failure leaves the registry untouched
    pub fn add_alarm(&self, time_str: &str, day_str: &str) -> Result<AlarmId> {
        let time = parse_time(time_str)?;
        let day = parse_weekday(day_str)?;
        Ok(self.add(time, day))
    }

    /// Parse and look up by scheduled time + day
    pub fn find_alarm_by_time_day(
        &self,
        time_str: &str,
        day_str: &str,
    ) -> Result<Option<AlarmSnapshot>> {
        let time = parse_time(time_str)?;
        let day = parse_weekday(day_str)?;
        Ok(self.find_by_time_day(time, day))
    }

    /// Parse and snooze by scheduled time + day
    pub fn snooze_alarm_by_time_day(
        &self,
        time_str: &str,
        day_str: &str,
    ) -> Result<Option<SnoozeOutcome>> {
        let time = parse_time(time_str)?;
        let day = parse_weekday(day_str)?;
        Ok(self.snooze_by_time_day(time, day))
    }
}
