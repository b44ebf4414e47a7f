//! Integration tests for registry operations
//!
//! Covers add/find/list round-trips, snooze progression and limits,
//! idempotent deletion, reconciliation passes, and the concurrent access
//! discipline over the shared collection.

#![allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable

mod common;

use chime_alarms::{
    AlarmEvent, AlarmId, AlarmRegistry, SnoozeOutcome, Weekday,
};
use common::{at, t, RecordingNotifier};
use std::sync::Arc;

fn setup() -> (Arc<AlarmRegistry>, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let registry = Arc::new(AlarmRegistry::new(notifier.clone()));
    (registry, notifier)
}

#[test]
fn add_then_find_by_time_day_round_trips() {
    let (registry, _) = setup();

    let id = registry.add(t("05:00"), Weekday::Mon);

    let found = registry
        .find_by_time_day(t("05:00"), Weekday::Mon)
        .expect("alarm should be found");
    assert_eq!(found.id, id);
    assert_eq!(found.scheduled, t("05:00"));
    assert_eq!(found.day, Weekday::Mon);
    assert_eq!(found.snooze_count, 0);
    assert!(found.active);

    // same time, different day: no match
    assert!(registry.find_by_time_day(t("05:00"), Weekday::Tue).is_none());
}

#[test]
fn find_matches_scheduled_time_not_effective() {
    let (registry, _) = setup();
    let id = registry.add(t("05:00"), Weekday::Mon);
    registry.snooze(&id);

    // still found under the scheduled time, not the snoozed one
    assert!(registry.find_by_time_day(t("05:00"), Weekday::Mon).is_some());
    assert!(registry.find_by_time_day(t("05:05"), Weekday::Mon).is_none());
}

#[test]
fn three_snoozes_then_limit() {
    let (registry, notifier) = setup();
    let id = registry.add(t("05:00"), Weekday::Mon);

    for expected in ["05:05", "05:10", "05:15"] {
        match registry.snooze(&id) {
            Some(SnoozeOutcome::Snoozed { until, .. }) => {
                assert_eq!(until, t(expected));
            },
            other => panic!("expected successful snooze, got {other:?}"),
        }
    }

    assert_eq!(registry.snooze(&id), Some(SnoozeOutcome::LimitReached));

    let snap = &registry.list()[0];
    assert_eq!(snap.snooze_count, 3);
    assert_eq!(snap.effective, t("05:15"));

    let limit_events = notifier
        .events()
        .iter()
        .filter(|e| matches!(e, AlarmEvent::SnoozeLimitReached { .. }))
        .count();
    assert_eq!(limit_events, 1);
}

#[test]
fn snooze_wraps_midnight_but_keeps_the_day() {
    let (registry, _) = setup();
    let id = registry.add(t("23:58"), Weekday::Mon);

    registry.snooze(&id);

    let snap = &registry.list()[0];
    assert_eq!(snap.effective, t("00:03"));
    assert_eq!(snap.day, Weekday::Mon);

    // the wrapped minute matches Monday, not Tuesday
    assert!(registry.fire_due(at("00:03", Weekday::Tue)).is_empty());
    assert_eq!(registry.fire_due(at("00:03", Weekday::Mon)).len(), 1);
}

#[test]
fn reset_snooze_restores_the_schedule() {
    let (registry, _) = setup();
    let id = registry.add(t("08:30"), Weekday::Wed);
    registry.snooze(&id);
    registry.snooze(&id);

    assert!(registry.reset_snooze(&id));

    let snap = &registry.list()[0];
    assert_eq!(snap.snooze_count, 0);
    assert_eq!(snap.effective, snap.scheduled);

    // unknown id: false, nothing changes
    assert!(!registry.reset_snooze(&"00000000-0000-4000-8000-000000000000"
        .parse::<AlarmId>()
        .unwrap()));
}

#[test]
fn removing_unknown_id_is_a_noop() {
    let (registry, notifier) = setup();
    registry.add(t("05:00"), Weekday::Mon);
    registry.add(t("06:00"), Weekday::Tue);

    let bogus: AlarmId = "00000000-0000-4000-8000-000000000000".parse().unwrap();
    assert!(!registry.remove(&bogus));
    assert_eq!(registry.len(), 2);
    assert!(notifier
        .events()
        .iter()
        .any(|e| matches!(e, AlarmEvent::NotFound { id } if *id == bogus)));
}

#[test]
fn remove_keeps_insertion_order_of_the_rest() {
    let (registry, _) = setup();
    let first = registry.add(t("05:00"), Weekday::Mon);
    let second = registry.add(t("06:00"), Weekday::Tue);
    let third = registry.add(t("07:00"), Weekday::Wed);

    assert!(registry.remove(&second));

    let ids: Vec<AlarmId> = registry.list().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![first, third]);
}

#[test]
fn fire_due_fires_exactly_once() {
    let (registry, notifier) = setup();
    let id = registry.add(t("05:00"), Weekday::Mon);

    let fired = registry.fire_due(at("05:00", Weekday::Mon));
    assert_eq!(fired, vec![id]);
    assert!(!registry.list()[0].active);
    assert_eq!(notifier.fired_count(), 1);

    // level-triggered: the retired alarm does not match a second pass
    assert!(registry.fire_due(at("05:00", Weekday::Mon)).is_empty());
    assert_eq!(notifier.fired_count(), 1);
}

#[test]
fn snoozed_alarm_fires_at_the_new_minute_only() {
    let (registry, notifier) = setup();
    let id = registry.add(t("05:00"), Weekday::Mon);
    registry.snooze(&id);

    assert!(registry.fire_due(at("05:00", Weekday::Mon)).is_empty());
    assert_eq!(notifier.fired_count(), 0);

    assert_eq!(registry.fire_due(at("05:05", Weekday::Mon)), vec![id]);
    assert_eq!(notifier.fired_count(), 1);
}

#[test]
fn fire_due_ignores_other_days_and_minutes() {
    let (registry, _) = setup();
    registry.add(t("05:00"), Weekday::Mon);

    assert!(registry.fire_due(at("05:00", Weekday::Sun)).is_empty());
    assert!(registry.fire_due(at("05:01", Weekday::Mon)).is_empty());
    assert_eq!(registry.armed(), 1);
}

#[test]
fn string_boundary_rejects_bad_input_without_mutation() {
    let (registry, _) = setup();

    assert!(registry.add_alarm("25:00", "monday").is_err());
    assert!(registry.add_alarm("05:00", "someday").is_err());
    assert!(registry.is_empty());

    let id = registry.add_alarm("07:30", "friday").unwrap();
    assert_eq!(registry.len(), 1);

    let found = registry
        .find_alarm_by_time_day("07:30", "Friday")
        .unwrap()
        .expect("alarm should be found");
    assert_eq!(found.id, id);

    assert!(registry
        .snooze_alarm_by_time_day("07:30", "friday")
        .unwrap()
        .is_some());
    assert!(registry
        .snooze_alarm_by_time_day("09:30", "friday")
        .unwrap()
        .is_none());
}

#[test]
fn snapshots_serialize_with_readable_fields() {
    let (registry, _) = setup();
    registry.add(t("05:00"), Weekday::Mon);

    let json = serde_json::to_value(registry.list()).unwrap();
    assert_eq!(json[0]["scheduled"], "05:00");
    assert_eq!(json[0]["day"], "Monday");
    assert_eq!(json[0]["snooze_count"], 0);
    assert_eq!(json[0]["active"], true);
}

#[test]
fn concurrent_mutations_never_tear_state() {
    let (registry, _) = setup();
    let id = registry.add(t("05:00"), Weekday::Mon);

    std::thread::scope(|s| {
        // snooze/reset churn on one alarm, checking every snapshot it sees
        for _ in 0..4 {
            let registry = &registry;
            s.spawn(move || {
                for _ in 0..250 {
                    registry.snooze(&id);
                    registry.reset_snooze(&id);
                    for snap in registry.list() {
                        assert!(snap.snooze_count <= 3);
                        if snap.snooze_count == 0 {
                            assert_eq!(snap.effective, snap.scheduled);
                        } else {
                            assert_ne!(snap.effective, snap.scheduled);
                        }
                    }
                }
            });
        }
        // add/fire/remove churn interleaved with the reconciliation pass
        for _ in 0..2 {
            let registry = &registry;
            s.spawn(move || {
                for _ in 0..250 {
                    let extra = registry.add(t("06:00"), Weekday::Tue);
                    registry.fire_due(at("06:00", Weekday::Tue));
                    registry.remove(&extra);
                }
            });
        }
    });

    let snap = registry
        .list()
        .into_iter()
        .find(|a| a.id == id)
        .expect("original alarm survived the churn");
    assert!(snap.snooze_count <= 3);
    assert_eq!(snap.scheduled, t("05:00"));
}
