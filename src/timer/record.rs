//! Persisted timer shape and display helpers

use serde::{Deserialize, Serialize};

/// Serialized form of a timer, as written to the store and returned by snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerRecord {
    pub name: String,
    pub duration: u64,
    pub remaining: u64,
    pub running: bool,
    pub paused: bool,
    pub alerting: bool,
}

impl TimerRecord {
    /// Only timers that were actively counting down come back ticking after a restore
    pub fn should_resume(&self) -> bool {
        self.running && !self.paused && !self.alerting
    }
}

/// Format seconds the way status lines show them: whole minutes, or seconds under a minute
pub fn format_time(seconds: u64) -> String {
    if seconds == 0 {
        return "0m".to_string();
    }
    let minutes = seconds / 60;
    if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", seconds)
    }
}
