//! Alarm scheduler - the periodic reconciliation loop
//!
//! Wakes once per tick (60s by default), reads the wall clock at minute
//! resolution, and retires every armed alarm whose effective time and day
//! match. The collection lock is only held inside the reconciliation pass,
//! never across the inter-tick sleep.
//!
//! A minute skipped by clock skew or system sleep is simply missed: the
//! alarm stays armed but never fires for that occurrence.

use crate::clock::Clock;
use crate::registry::AlarmRegistry;
use crate::types::{weekday_name, AlarmId};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, info, warn};

/// Default reconciliation period in seconds
pub const DEFAULT_TICK_SECS: u64 = 60;

/// Scheduler status information
#[derive(Debug, Clone)]
pub struct SchedulerStatus {
    pub running: bool,
    pub total_alarms: usize,
    pub armed_alarms: usize,
    pub tick_secs: u64,
}

/// Owns the background reconciliation loop over an [`AlarmRegistry`]
pub struct AlarmScheduler {
    registry: Arc<AlarmRegistry>,
    clock: Arc<dyn Clock>,
    /// Shutdown signal
    shutdown: Arc<Notify>,
    /// Running state
    running: Arc<AtomicBool>,
    tick: Duration,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl AlarmScheduler {
    pub fn new(registry: Arc<AlarmRegistry>, clock: Arc<dyn Clock>, tick: Duration) -> Self {
        Self {
            registry,
            clock,
            shutdown: Arc::new(Notify::new()),
            running: Arc::new(AtomicBool::new(false)),
            tick,
            handle: Mutex::new(None),
        }
    }

    /// Spawn the reconciliation loop
    ///
    /// Starting an already-running scheduler is a deterministic no-op.
    pub fn start(&self) {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Scheduler already running");
            return;
        }

        info!("Starting alarm scheduler with {}s tick", self.tick.as_secs());
        let registry = Arc::clone(&self.registry);
        let clock = Arc::clone(&self.clock);
        let shutdown = Arc::clone(&self.shutdown);
        let running = Arc::clone(&self.running);
        let tick = self.tick;
        let handle = tokio::spawn(run_loop(registry, clock, shutdown, running, tick));
        *self.handle.lock() = Some(handle);
    }

    /// Signal the loop to stop; it exits within one tick
    pub fn stop(&self) {
        info!("Stopping alarm scheduler...");
        self.shutdown.notify_one();
    }

    /// Stop and wait for the loop task to finish
    pub async fn shutdown(&self) {
        self.stop();
        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// One manual reconciliation pass, outside the periodic loop
    pub fn check_now(&self) -> Vec<AlarmId> {
        self.registry.fire_due(self.clock.now())
    }

    pub fn status(&self) -> SchedulerStatus {
        SchedulerStatus {
            running: self.is_running(),
            total_alarms: self.registry.len(),
            armed_alarms: self.registry.armed(),
            tick_secs: self.tick.as_secs(),
        }
    }
}

/// Reconciliation loop body; runs until the shutdown signal fires
async fn run_loop(
    registry: Arc<AlarmRegistry>,
    clock: Arc<dyn Clock>,
    shutdown: Arc<Notify>,
    running: Arc<AtomicBool>,
    tick: Duration,
) {
    let mut ticker = interval(tick);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = clock.now();
                let fired = registry.fire_due(now);
                if !fired.is_empty() {
                    debug!(
                        "Tick at {} on {}: {} alarm(s) fired",
                        now.time,
                        weekday_name(now.day),
                        fired.len()
                    );
                }
            }
            _ = shutdown.notified() => {
                info!("Scheduler received shutdown signal");
                break;
            }
        }
    }

    running.store(false, Ordering::SeqCst);
    info!("Alarm scheduler stopped");
}
