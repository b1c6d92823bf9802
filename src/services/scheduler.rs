//! Backup alarms
//!
//! A coarse one-shot wake-up per timer, independent of the one-second tick,
//! so a stalled tick task still ends the countdown.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::{sync::mpsc, task::AbortHandle, time::sleep};
use tracing::{debug, warn};

/// How long past the expected finish a backup alarm waits, so it only ever
/// fires for a tick source that has stalled
pub const BACKUP_GRACE: Duration = Duration::from_secs(60);

pub trait BackupScheduler: Send + Sync {
    /// Schedule (or reschedule) the alarm called `name`
    fn schedule_once(&self, name: &str, delay_minutes: f64);
    /// Cancel the alarm called `name`; cancelling a missing alarm is a no-op
    fn cancel(&self, name: &str);
}

/// Runs each alarm as a sleeping tokio task and reports expiry over a channel
#[derive(Debug)]
pub struct TokioScheduler {
    alarms: Arc<Mutex<HashMap<String, AbortHandle>>>,
    fired_tx: mpsc::UnboundedSender<String>,
}

impl TokioScheduler {
    /// Create the scheduler and the receiver that yields the names of fired alarms
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            alarms: Arc::new(Mutex::new(HashMap::new())),
            fired_tx,
        };
        (scheduler, fired_rx)
    }

    /// Number of alarms currently waiting to fire
    pub fn pending(&self) -> usize {
        let alarms = self.alarms.lock().unwrap_or_else(|e| e.into_inner());
        alarms.values().filter(|handle| !handle.is_finished()).count()
    }
}

impl BackupScheduler for TokioScheduler {
    fn schedule_once(&self, name: &str, delay_minutes: f64) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No runtime available, backup alarm for '{}' not scheduled", name);
            return;
        };

        // Out-of-range delays sleep as long as tokio allows
        let delay = Duration::try_from_secs_f64((delay_minutes * 60.0).max(0.0)).unwrap_or(Duration::MAX);
        let alarm = name.to_string();
        let fired_tx = self.fired_tx.clone();
        let handle = runtime
            .spawn(async move {
                sleep(delay).await;
                debug!("Backup alarm '{}' fired", alarm);
                if fired_tx.send(alarm).is_err() {
                    debug!("Backup alarm listener is gone");
                }
            })
            .abort_handle();

        let mut alarms = self.alarms.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = alarms.insert(name.to_string(), handle) {
            previous.abort();
        }
        debug!("Backup alarm '{}' scheduled in {:?}", name, delay);
    }

    fn cancel(&self, name: &str) {
        let mut alarms = self.alarms.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = alarms.remove(name) {
            handle.abort();
            debug!("Backup alarm '{}' cancelled", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let (scheduler, mut fired) = TokioScheduler::new();
        scheduler.schedule_once("tea", 0.5);
        assert_eq!(scheduler.pending(), 1);

        sleep(Duration::from_secs(29)).await;
        assert!(fired.try_recv().is_err());

        sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.try_recv().ok().as_deref(), Some("tea"));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_and_reschedule() {
        let (scheduler, mut fired) = TokioScheduler::new();
        scheduler.schedule_once("tea", 1.0);
        scheduler.cancel("tea");
        scheduler.cancel("missing");

        scheduler.schedule_once("eggs", 1.0);
        scheduler.schedule_once("eggs", 2.0);

        sleep(Duration::from_secs(90)).await;
        assert!(fired.try_recv().is_err());

        sleep(Duration::from_secs(60)).await;
        assert_eq!(fired.try_recv().ok().as_deref(), Some("eggs"));
        assert!(fired.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn huge_delays_do_not_panic() {
        let (scheduler, mut fired) = TokioScheduler::new();
        scheduler.schedule_once("forever", u64::MAX as f64 / 60.0);
        scheduler.schedule_once("nan", f64::NAN);
        assert_eq!(scheduler.pending(), 2);

        sleep(Duration::from_millis(10)).await;
        assert_eq!(fired.try_recv().ok().as_deref(), Some("nan"));
        assert!(fired.try_recv().is_err());
        assert_eq!(scheduler.pending(), 1);
    }
}
