use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use marquee_core::{Configuration, LocalConfig};
use marquee_protocol::{ScheduledItem, SyncCall, FALLBACK_DURATION};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::{
    error::SchedulerError, selector::SequenceSelector, suspend::SuspendRamp, PRELOAD_DELAY,
    PRELOAD_WINDOW, STARTUP_DELAY,
};

/// Everything the driver needs from the process hosting it.
///
/// Implementations must be `Send + Sync`; the driver calls them from its own
/// Tokio task, one call at a time.
#[async_trait]
pub trait PlayerHost: Send + Sync {
    /// Latest shared playlist/overlay configuration, if one is available.
    async fn shared_config(&self) -> Option<Arc<Configuration>>;

    /// Local blanking policy. Read once per cycle.
    async fn local_config(&self) -> LocalConfig;

    /// Wall-clock time used to evaluate schedules.
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    /// Fire-and-forget call executed by every peer display `delay` from now.
    async fn broadcast(&self, delay: Duration, call: SyncCall);

    /// Switch display power.
    async fn set_power(&self, on: bool);
}

/// Outcome of a suspension point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wake {
    Deadline,
    Stop,
}

/// Timed loop turning selector decisions into synchronized preload/switch calls.
pub struct ScheduleDriver {
    host: Arc<dyn PlayerHost>,
    selector: SequenceSelector,
    ramp: SuspendRamp,
}

impl ScheduleDriver {
    pub fn new(host: Arc<dyn PlayerHost>) -> Self {
        Self::with_selector(host, SequenceSelector::new())
    }

    pub fn with_selector(host: Arc<dyn PlayerHost>, selector: SequenceSelector) -> Self {
        Self {
            host,
            selector,
            ramp: SuspendRamp::new(),
        }
    }

    /// Main loop. Runs until `shutdown` broadcasts `true` or its sender is dropped.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!("schedule driver started");
        let mut next_switch = Instant::now() + STARTUP_DELAY + PRELOAD_WINDOW;

        loop {
            if wait_until(next_switch - PRELOAD_WINDOW, &mut shutdown).await == Wake::Stop {
                break;
            }

            let item = self.cycle(next_switch).await;

            // Don't race ahead of the switch just scheduled.
            if wait_until(next_switch, &mut shutdown).await == Wake::Stop {
                break;
            }

            next_switch = advance(next_switch, item.duration);
        }

        info!("schedule driver stopped");
    }

    /// One scheduling decision: select, ramp, power, preload, switch.
    /// Returns the item actually broadcast.
    async fn cycle(&mut self, next_switch: Instant) -> ScheduledItem {
        let blank = self.host.local_config().await.blank;
        let config = self.host.shared_config().await;

        let selected = match self.selector.select_next(config.as_deref(), self.host.now()) {
            Ok(item) => Some(item),
            Err(e @ SchedulerError::NoConfig) => {
                warn!(reason = %e, "nothing scheduled, using fallback");
                None
            }
            Err(e) => {
                info!(reason = %e, "nothing scheduled, using fallback");
                None
            }
        };
        if selected.is_some() && self.ramp.depth() > 0 {
            info!(depth = self.ramp.depth(), "items returning, exiting fallback soon");
        }

        let item = self.ramp.step(selected, blank);
        let power = self.ramp.power_on(blank);
        info!(
            item_idx = item.item_idx,
            duration = item.duration,
            cnt = item.cnt,
            ovr = ?item.ovr,
            depth = self.ramp.depth(),
            power,
            "next up"
        );

        self.host.set_power(power).await;

        self.host
            .broadcast(
                PRELOAD_DELAY,
                SyncCall::Preload {
                    payload: item.clone(),
                },
            )
            .await;

        // Peers switch at the absolute `next_switch` instant, however long
        // the calls above took.
        let switch_in = next_switch.saturating_duration_since(Instant::now());
        self.host.broadcast(switch_in, SyncCall::Switch).await;

        item
    }
}

/// Start the driver on a background task.
pub fn spawn(host: Arc<dyn PlayerHost>, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
    tokio::spawn(ScheduleDriver::new(host).run(shutdown))
}

/// Sleep until `deadline` unless a stop arrives first.
async fn wait_until(deadline: Instant, shutdown: &mut watch::Receiver<bool>) -> Wake {
    let sleep = tokio::time::sleep_until(deadline);
    tokio::pin!(sleep);

    loop {
        if *shutdown.borrow_and_update() {
            return Wake::Stop;
        }
        tokio::select! {
            _ = &mut sleep => {
                return if *shutdown.borrow() { Wake::Stop } else { Wake::Deadline };
            }
            changed = shutdown.changed() => {
                if changed.is_err() {
                    return Wake::Stop;
                }
            }
        }
    }
}

/// Next switch instant after showing an item for `secs` seconds.
fn advance(switch: Instant, secs: f64) -> Instant {
    Duration::try_from_secs_f64(secs)
        .ok()
        .and_then(|d| switch.checked_add(d))
        .unwrap_or_else(|| {
            warn!(duration = secs, "unusable item duration, using fallback duration");
            switch + Duration::from_secs_f64(FALLBACK_DURATION)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_adds_fractional_seconds() {
        let start = Instant::now();
        assert_eq!(advance(start, 7.5), start + Duration::from_millis(7500));
    }

    #[test]
    fn advance_rejects_unusable_durations() {
        let start = Instant::now();
        let fallback = start + Duration::from_secs(5);
        assert_eq!(advance(start, f64::NAN), fallback);
        assert_eq!(advance(start, -3.0), fallback);
        assert_eq!(advance(start, f64::MAX), fallback);
    }

    #[tokio::test]
    async fn stop_before_deadline_wins() {
        let (tx, mut rx) = watch::channel(false);
        tx.send(true).unwrap();
        let far = Instant::now() + Duration::from_secs(3600);
        assert_eq!(wait_until(far, &mut rx).await, Wake::Stop);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_without_stop() {
        let (_tx, mut rx) = watch::channel(false);
        let deadline = Instant::now() + Duration::from_secs(10);
        assert_eq!(wait_until(deadline, &mut rx).await, Wake::Deadline);
        assert!(Instant::now() >= deadline);
    }

    #[tokio::test]
    async fn dropped_sender_stops() {
        let (tx, mut rx) = watch::channel(false);
        drop(tx);
        let far = Instant::now() + Duration::from_secs(3600);
        assert_eq!(wait_until(far, &mut rx).await, Wake::Stop);
    }
}
