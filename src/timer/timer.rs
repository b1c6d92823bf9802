//! Countdown state machine for a single named timer

use serde::{Deserialize, Serialize};
use tokio::task::AbortHandle;
use tracing::{debug, info};

use super::record::{format_time, TimerRecord};
use crate::{
    services::{Services, BACKUP_GRACE},
    tasks::Ticker,
};

/// Lifecycle state of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// What the tick source should do after delivering a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Finished,
}

/// A named countdown
///
/// The timer owns its one-second tick task and the name of its backup alarm.
/// Both are cancelled whenever the timer stops, completes or is dropped.
#[derive(Debug)]
pub struct Timer {
    name: String,
    duration: u64,
    remaining: u64,
    state: TimerState,
    alerting: bool,
    /// Bumped on every start so a replaced tick task can tell it is stale
    generation: u64,
    ticker: Option<AbortHandle>,
    backup_alarm: Option<String>,
}

impl Timer {
    pub fn new(name: impl Into<String>, duration: u64) -> Self {
        Self {
            name: name.into(),
            duration,
            remaining: duration,
            state: TimerState::Idle,
            alerting: false,
            generation: 0,
            ticker: None,
            backup_alarm: None,
        }
    }

    /// Rebuild a timer from its persisted record without starting any tick source
    pub fn restore(record: &TimerRecord) -> Self {
        let state = if record.running && record.paused {
            TimerState::Paused
        } else if record.alerting {
            TimerState::Completed
        } else {
            TimerState::Idle
        };

        let mut timer = Self::new(record.name.clone(), record.duration);
        timer.remaining = record.remaining.min(record.duration);
        timer.state = state;
        timer.alerting = record.alerting;
        timer
    }

    pub fn record(&self) -> TimerRecord {
        TimerRecord {
            name: self.name.clone(),
            duration: self.duration,
            remaining: self.remaining,
            running: self.is_running(),
            paused: self.state == TimerState::Paused,
            alerting: self.alerting,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_alerting(&self) -> bool {
        self.alerting
    }

    /// Running or paused mid-countdown
    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running | TimerState::Paused)
    }

    pub fn has_backup_alarm(&self) -> bool {
        self.backup_alarm.is_some()
    }

    pub fn status_line(&self) -> String {
        format!("[{}]: {}", self.name, format_time(self.remaining))
    }

    /// Begin counting down from the current remaining time, replacing any active tick task
    pub fn start(&mut self, services: &Services, ticker: &Ticker) {
        self.state = TimerState::Running;
        self.cancel_ticker();
        services.emit(&self.status_line());

        if self.remaining == 0 {
            self.complete(services);
            return;
        }

        self.generation += 1;
        self.ticker = Some(ticker.spawn(&self.name, self.generation));
        self.schedule_backup(services);
        debug!("Timer '{}' started with {}s remaining", self.name, self.remaining);
    }

    /// Not guarded: pausing an already paused timer re-emits the same status line
    pub fn pause(&mut self, services: &Services) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
        services.emit(&self.status_line());
    }

    /// Not guarded either. A restored timer that never had a tick task gets one here.
    pub fn resume(&mut self, services: &Services, ticker: &Ticker) {
        if self.state == TimerState::Paused {
            self.state = TimerState::Running;
            if self.ticker.is_none() {
                self.generation += 1;
                self.ticker = Some(ticker.spawn(&self.name, self.generation));
            }
            self.schedule_backup(services);
        }
        services.emit(&self.status_line());
    }

    /// Cancel the tick task and backup alarm and rewind to the full duration
    pub fn stop(&mut self, services: &Services) {
        if self.is_running() {
            self.state = TimerState::Idle;
        }
        self.cancel_ticker();
        if let Some(alarm) = self.backup_alarm.take() {
            services.scheduler.cancel(&alarm);
        }
        self.remaining = self.duration;
    }

    /// Reuse this slot for a fresh countdown of `duration` seconds
    pub fn refresh(&mut self, duration: u64) {
        self.duration = duration;
        self.remaining = duration;
        self.alerting = false;
    }

    /// Deliver one tick from the task spawned with `generation`
    pub fn tick(&mut self, generation: u64, services: &Services) -> TickOutcome {
        if generation != self.generation || self.ticker.is_none() {
            return TickOutcome::Finished;
        }

        match self.state {
            TimerState::Running => {
                self.remaining = self.remaining.saturating_sub(1);
                services.emit_tick(&self.status_line());
                if self.remaining == 0 {
                    self.complete(services);
                    TickOutcome::Finished
                } else {
                    TickOutcome::Continue
                }
            }
            TimerState::Paused => TickOutcome::Continue,
            TimerState::Idle | TimerState::Completed => TickOutcome::Finished,
        }
    }

    /// Force completion when the backup alarm fires before the ticks got there
    pub fn expire(&mut self, services: &Services) {
        self.remaining = 0;
        self.complete(services);
    }

    fn complete(&mut self, services: &Services) {
        self.stop(services);
        self.state = TimerState::Completed;
        self.alerting = true;
        info!("Timer '{}' completed", self.name);
        services.emit(&format!("[{}]: Complete!", self.name));
        services.announce_completion(&self.name);
    }

    fn schedule_backup(&mut self, services: &Services) {
        let delay_minutes = self.remaining.saturating_add(BACKUP_GRACE.as_secs()) as f64 / 60.0;
        services.scheduler.schedule_once(&self.name, delay_minutes);
        self.backup_alarm = Some(self.name.clone());
    }

    fn cancel_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(running: bool, paused: bool, alerting: bool) -> TimerRecord {
        TimerRecord {
            name: "tea".to_string(),
            duration: 120,
            remaining: 200,
            running,
            paused,
            alerting,
        }
    }

    #[test]
    fn restore_maps_flags_to_state() {
        assert_eq!(Timer::restore(&record(true, true, false)).state(), TimerState::Paused);
        assert_eq!(Timer::restore(&record(false, false, true)).state(), TimerState::Completed);
        assert_eq!(Timer::restore(&record(false, false, false)).state(), TimerState::Idle);
        // running timers come back idle until the manager starts them
        assert_eq!(Timer::restore(&record(true, false, false)).state(), TimerState::Idle);
    }

    #[test]
    fn restore_clamps_remaining_to_duration() {
        let timer = Timer::restore(&record(false, false, false));
        assert_eq!(timer.remaining(), 120);
        assert!(!timer.has_backup_alarm());
    }

    #[test]
    fn record_reflects_paused_as_running() {
        let timer = Timer::restore(&record(true, true, false));
        let saved = timer.record();
        assert!(saved.running);
        assert!(saved.paused);
        assert!(!saved.alerting);
        assert_eq!(timer.status_line(), "[tea]: 2m");
    }

    #[test]
    fn refresh_resets_countdown_and_alert() {
        let mut timer = Timer::restore(&record(false, false, true));
        timer.refresh(30);
        assert_eq!(timer.duration(), 30);
        assert_eq!(timer.remaining(), 30);
        assert!(!timer.is_alerting());
    }
}
