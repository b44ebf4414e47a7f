//! Alarm entity and its snooze state machine
//!
//! An alarm is armed (`active`) until the scheduler retires it after a
//! firing. Snoozing pushes the trigger time forward five minutes at a time,
//! at most [`MAX_SNOOZES`] times; the override and its counter live in a
//! single [`SnoozeState`] so they can only change together.

use crate::types::{AlarmId, TimeOfDay};
use chrono::Weekday;

/// Maximum number of snoozes per alarm
pub const MAX_SNOOZES: u8 = 3;

/// Minutes added per snooze
pub const SNOOZE_MINUTES: i32 = 5;

/// Snooze override state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnoozeState {
    /// No snooze active; the alarm triggers at its scheduled time
    Original,
    /// Snoozed `count` times (1..=3); the alarm triggers at `until`
    Snoozed { until: TimeOfDay, count: u8 },
}

/// Result of a snooze attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnoozeOutcome {
    /// Trigger time moved forward five minutes
    Snoozed { until: TimeOfDay, count: u8 },
    /// Already snoozed the maximum number of times; state unchanged
    LimitReached,
}

/// A single scheduled alarm
///
/// `scheduled` and `day` are fixed at creation; only the snooze state and
/// the armed flag change afterwards, and only through the registry's lock.
#[derive(Debug, Clone)]
pub struct Alarm {
    id: AlarmId,
    scheduled: TimeOfDay,
    day: Weekday,
    snooze: SnoozeState,
    active: bool,
}

impl Alarm {
    pub(crate) fn new(id: AlarmId, scheduled: TimeOfDay, day: Weekday) -> Self {
        Self {
            id,
            scheduled,
            day,
            snooze: SnoozeState::Original,
            active: true,
        }
    }

    pub fn id(&self) -> AlarmId {
        self.id
    }

    pub fn scheduled_time(&self) -> TimeOfDay {
        self.scheduled
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn snooze_state(&self) -> SnoozeState {
        self.snooze
    }

    pub fn snooze_count(&self) -> u8 {
        match self.snooze {
            SnoozeState::Original => 0,
            SnoozeState::Snoozed { count, .. } => count,
        }
    }

    /// The time the scheduler compares against the wall clock
    pub fn effective_time(&self) -> TimeOfDay {
        match self.snooze {
            SnoozeState::Original => self.scheduled,
            SnoozeState::Snoozed { until, .. } => until,
        }
    }

    /// Push the trigger time forward five minutes, up to [`MAX_SNOOZES`] times
    ///
    /// The day of week is deliberately not advanced when the new time wraps
    /// past midnight: a Monday 23:58 alarm snoozed to 00:03 still matches
    /// Monday.
    pub(crate) fn snooze(&mut self) -> SnoozeOutcome {
        let count = self.snooze_count();
        if count >= MAX_SNOOZES {
            return SnoozeOutcome::LimitReached;
        }
        let until = self.effective_time().plus_minutes(SNOOZE_MINUTES);
        let count = count + 1;
        self.snooze = SnoozeState::Snoozed { until, count };
        SnoozeOutcome::Snoozed { until, count }
    }

    /// Drop any snooze override and zero the counter
    pub(crate) fn reset_snooze(&mut self) {
        self.snooze = SnoozeState::Original;
    }

    /// Whether this alarm should fire at the given minute
    pub(crate) fn is_due(&self, time: TimeOfDay, day: Weekday) -> bool {
        self.active && self.day == day && self.effective_time() == time
    }

    /// Retire the alarm after a firing; it will not fire again
    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_time;

    fn alarm(time: &str, day: Weekday) -> Alarm {
        Alarm::new(AlarmId::generate(), parse_time(time).unwrap(), day)
    }

    #[test]
    fn snooze_advances_five_minutes_each_time() {
        let mut alarm = alarm("05:00", Weekday::Mon);

        for (expected, count) in [("05:05", 1), ("05:10", 2), ("05:15", 3)] {
            match alarm.snooze() {
                SnoozeOutcome::Snoozed { until, count: c } => {
                    assert_eq!(until.to_string(), expected);
                    assert_eq!(c, count);
                },
                SnoozeOutcome::LimitReached => panic!("snooze {count} should succeed"),
            }
        }
        assert_eq!(alarm.effective_time().to_string(), "05:15");
        assert_eq!(alarm.scheduled_time().to_string(), "05:00");
    }

    #[test]
    fn fourth_snooze_is_rejected_without_state_change() {
        let mut alarm = alarm("05:00", Weekday::Mon);
        for _ in 0..3 {
            alarm.snooze();
        }

        assert_eq!(alarm.snooze(), SnoozeOutcome::LimitReached);
        assert_eq!(alarm.snooze_count(), 3);
        assert_eq!(alarm.effective_time().to_string(), "05:15");
    }

    #[test]
    fn snooze_wraps_past_midnight_without_changing_day() {
        let mut alarm = alarm("23:58", Weekday::Mon);

        alarm.snooze();
        assert_eq!(alarm.effective_time().to_string(), "00:03");
        assert_eq!(alarm.day(), Weekday::Mon);
        // the wrapped time matches Monday, not Tuesday
        assert!(alarm.is_due(parse_time("00:03").unwrap(), Weekday::Mon));
        assert!(!alarm.is_due(parse_time("00:03").unwrap(), Weekday::Tue));
    }

    #[test]
    fn reset_restores_the_scheduled_time() {
        let mut alarm = alarm("05:00", Weekday::Fri);
        alarm.snooze();
        alarm.snooze();

        alarm.reset_snooze();
        assert_eq!(alarm.snooze_count(), 0);
        assert_eq!(alarm.effective_time(), alarm.scheduled_time());
        assert_eq!(alarm.snooze_state(), SnoozeState::Original);
    }

    #[test]
    fn retired_alarm_is_never_due() {
        let mut alarm = alarm("05:00", Weekday::Mon);
        let time = parse_time("05:00").unwrap();
        assert!(alarm.is_due(time, Weekday::Mon));

        alarm.deactivate();
        assert!(!alarm.is_due(time, Weekday::Mon));
    }
}
