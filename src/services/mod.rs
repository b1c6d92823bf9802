//! External collaborators
//!
//! Everything the timers talk to besides each other: where output lines go,
//! how completion is announced, how backup alarms are scheduled and where
//! the registry is persisted.

pub mod alert;
pub mod notifier;
pub mod recording;
pub mod scheduler;
pub mod sink;
pub mod store;

use std::sync::Arc;

use tracing::warn;

pub use alert::{AlertPlayer, RepeatingAlert, TerminalBell, ALERT_PERIOD, ALERT_TIMEOUT};
pub use notifier::{DesktopNotifier, LogNotifier, Notification, Notifier};
pub use recording::Recorder;
pub use scheduler::{BackupScheduler, TokioScheduler, BACKUP_GRACE};
pub use sink::{ConsoleSink, LogSink, OutputSink};
pub use store::{JsonFileStore, MemoryStore, TimerStore, STORAGE_KEY};

/// The collaborator set shared by the manager, its timers and their tick tasks
#[derive(Clone)]
pub struct Services {
    pub sink: Arc<dyn OutputSink>,
    pub notifier: Arc<dyn Notifier>,
    pub alert: RepeatingAlert,
    pub scheduler: Arc<dyn BackupScheduler>,
}

impl Services {
    pub fn new(
        sink: Arc<dyn OutputSink>,
        notifier: Arc<dyn Notifier>,
        alert: Arc<dyn AlertPlayer>,
        scheduler: Arc<dyn BackupScheduler>,
    ) -> Self {
        Self {
            sink,
            notifier,
            alert: RepeatingAlert::new(alert),
            scheduler,
        }
    }

    pub fn emit(&self, line: &str) {
        self.sink.emit(line);
    }

    pub fn emit_tick(&self, line: &str) {
        self.sink.tick(line);
    }

    /// Notify and start the repeating alert for a finished timer, falling
    /// back to a plain notification when the alert cannot be played
    pub fn announce_completion(&self, timer_name: &str) {
        if let Err(e) = self.notifier.notify(&Notification::timer_complete(timer_name)) {
            warn!("Failed to send completion notification for '{}': {}", timer_name, e);
        }

        if let Err(e) = self.alert.start(timer_name) {
            warn!("Failed to play alert for '{}': {}", timer_name, e);
            if let Err(e) = self.notifier.notify(&Notification::fallback()) {
                warn!("Fallback notification failed: {}", e);
            }
        }
    }

    /// Acknowledge a completion alert
    pub fn silence(&self, timer_name: &str) {
        self.alert.stop(timer_name);
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
