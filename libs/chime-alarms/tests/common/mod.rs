//! Shared test fixtures: a recording notifier and a programmable clock

#![allow(dead_code)] // not every test binary uses every helper

use chime_alarms::{AlarmEvent, Clock, Notifier, TimeOfDay, WallInstant, Weekday};
use parking_lot::Mutex;

/// Notifier that records every event for later assertions
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<AlarmEvent>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<AlarmEvent> {
        self.events.lock().clone()
    }

    pub fn fired_count(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| matches!(e, AlarmEvent::Fired { .. }))
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: &AlarmEvent) {
        self.events.lock().push(*event);
    }
}

/// Clock that returns whatever instant the test last set
pub struct ManualClock {
    now: Mutex<WallInstant>,
}

impl ManualClock {
    pub fn new(now: WallInstant) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: WallInstant) {
        *self.now.lock() = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> WallInstant {
        *self.now.lock()
    }
}

pub fn t(s: &str) -> TimeOfDay {
    s.parse().expect("valid test time")
}

pub fn at(s: &str, day: Weekday) -> WallInstant {
    WallInstant { time: t(s), day }
}
