//! In-memory collaborators that record what they were asked to do

use std::sync::{Arc, Mutex};

use super::{AlertPlayer, BackupScheduler, Notification, Notifier, OutputSink, Services};

/// Everything the recording collaborators have seen, shared with the [`Services`] they back
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    lines: Arc<Mutex<Vec<String>>>,
    notifications: Arc<Mutex<Vec<Notification>>>,
    alerts: Arc<Mutex<Vec<String>>>,
    scheduled: Arc<Mutex<Vec<(String, f64)>>>,
    cancelled: Arc<Mutex<Vec<String>>>,
    alert_fails: bool,
}

fn take<T>(items: &Mutex<Vec<T>>) -> Vec<T> {
    std::mem::take(&mut *items.lock().unwrap_or_else(|e| e.into_inner()))
}

fn snapshot<T: Clone>(items: &Mutex<Vec<T>>) -> Vec<T> {
    items.lock().unwrap_or_else(|e| e.into_inner()).clone()
}

fn push<T>(items: &Mutex<Vec<T>>, item: T) {
    items.lock().unwrap_or_else(|e| e.into_inner()).push(item);
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose alert player always fails, as when there is no surface to play on
    pub fn without_alert_surface() -> Self {
        Self {
            alert_fails: true,
            ..Self::default()
        }
    }

    /// Services wired to this recorder
    pub fn services(&self) -> Services {
        Services::new(
            Arc::new(self.clone()),
            Arc::new(RecordingNotifier(self.clone())),
            self.alert_player(),
            Arc::new(RecordingScheduler(self.clone())),
        )
    }

    /// The recording alert player on its own, for services wired by hand
    pub fn alert_player(&self) -> Arc<dyn AlertPlayer> {
        Arc::new(RecordingAlert(self.clone()))
    }

    /// Drain the output lines seen so far
    pub fn take_lines(&self) -> Vec<String> {
        take(&self.lines)
    }

    pub fn lines(&self) -> Vec<String> {
        snapshot(&self.lines)
    }

    pub fn notifications(&self) -> Vec<Notification> {
        snapshot(&self.notifications)
    }

    pub fn alerts(&self) -> Vec<String> {
        snapshot(&self.alerts)
    }

    pub fn scheduled(&self) -> Vec<(String, f64)> {
        snapshot(&self.scheduled)
    }

    pub fn cancelled(&self) -> Vec<String> {
        snapshot(&self.cancelled)
    }
}

impl OutputSink for Recorder {
    fn emit(&self, line: &str) {
        push(&self.lines, line.to_string());
    }
}

struct RecordingNotifier(Recorder);

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), String> {
        push(&self.0.notifications, notification.clone());
        Ok(())
    }
}

struct RecordingAlert(Recorder);

impl AlertPlayer for RecordingAlert {
    fn play(&self, timer_name: &str) -> Result<(), String> {
        if self.0.alert_fails {
            return Err("no alert surface".to_string());
        }
        push(&self.0.alerts, timer_name.to_string());
        Ok(())
    }
}

struct RecordingScheduler(Recorder);

impl BackupScheduler for RecordingScheduler {
    fn schedule_once(&self, name: &str, delay_minutes: f64) {
        push(&self.0.scheduled, (name.to_string(), delay_minutes));
    }

    fn cancel(&self, name: &str) {
        push(&self.0.cancelled, name.to_string());
    }
}
