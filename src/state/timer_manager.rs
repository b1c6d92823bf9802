//! Timer registry and command dispatch

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use anyhow::Context;
use tracing::{debug, info, warn};

use super::error::{Result, TimerError};
use crate::{
    services::{Services, TimerStore, STORAGE_KEY},
    tasks::Ticker,
    timer::{Command, TickOutcome, Timer, TimerRecord, TimerState},
};

/// Timers keyed by name
#[derive(Debug, Default)]
pub struct Registry {
    timers: BTreeMap<String, Timer>,
}

impl Registry {
    /// Deliver a tick to the named timer; a missing timer ends the tick task
    pub fn tick(&mut self, name: &str, generation: u64, services: &Services) -> TickOutcome {
        match self.timers.get_mut(name) {
            Some(timer) => timer.tick(generation, services),
            None => TickOutcome::Finished,
        }
    }
}

/// Owns every timer and applies [`Command`]s to them.
///
/// Cloning is cheap and every clone shares the same registry. Results are
/// reported through the output sink; only `NotFound` and `AlreadyExists`
/// come back as errors.
#[derive(Debug, Clone)]
pub struct TimerManager {
    registry: Arc<Mutex<Registry>>,
    services: Services,
    ticker: Ticker,
}

impl TimerManager {
    pub fn new(services: Services) -> Self {
        let registry = Arc::new(Mutex::new(Registry::default()));
        let ticker = Ticker::new(Arc::downgrade(&registry), services.clone());
        Self { registry, services, ticker }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn emit(&self, line: &str) {
        self.services.emit(line);
    }

    pub fn execute_command(&self, command: &Command) -> Result<()> {
        debug!("Executing {} command", command.kind());
        match command {
            Command::Create { name, duration } => self.create_timer(name, *duration),
            Command::Start { name } => self.start_timer(name),
            Command::Pause { name } => self.pause_timer(name),
            Command::Resume { name } => self.resume_timer(name),
            Command::Stop { name } => self.stop_timer(name),
            Command::Delete { name } => self.delete_timer(name),
            Command::List => {
                self.list_timers();
                Ok(())
            }
        }
    }

    /// Create and start a timer. A finished timer that is still alerting is
    /// refreshed in place instead.
    pub fn create_timer(&self, name: &str, duration: u64) -> Result<()> {
        let mut registry = self.lock();

        if let Some(timer) = registry.timers.get_mut(name) {
            if !timer.is_alerting() {
                return Err(TimerError::AlreadyExists(name.to_string()));
            }
            self.services.silence(name);
            timer.refresh(duration);
            info!("Refreshed timer '{}' with {}s", name, duration);
            self.emit(&format!("Refreshed timer '{}'", name));
            timer.start(&self.services, &self.ticker);
            return Ok(());
        }

        let timer = registry
            .timers
            .entry(name.to_string())
            .or_insert_with(|| Timer::new(name, duration));
        info!("Created timer '{}' with {}s", name, duration);
        self.emit(&format!("Created timer '{}'", name));
        timer.start(&self.services, &self.ticker);
        Ok(())
    }

    pub fn start_timer(&self, name: &str) -> Result<()> {
        let mut registry = self.lock();
        let timer = registry
            .timers
            .get_mut(name)
            .ok_or_else(|| TimerError::NotFound(name.to_string()))?;

        if timer.state() == TimerState::Running {
            self.emit(&format!("Timer '{}' is already running", name));
            return Ok(());
        }

        timer.start(&self.services, &self.ticker);
        self.emit(&format!("Started timer '{}'", name));
        Ok(())
    }

    pub fn pause_timer(&self, name: &str) -> Result<()> {
        let mut registry = self.lock();
        let timer = registry
            .timers
            .get_mut(name)
            .ok_or_else(|| TimerError::NotFound(name.to_string()))?;

        if !timer.is_running() {
            self.emit(&format!("Timer '{}' is not running", name));
            return Ok(());
        }

        timer.pause(&self.services);
        self.emit(&format!("Paused timer '{}'", name));
        Ok(())
    }

    pub fn resume_timer(&self, name: &str) -> Result<()> {
        let mut registry = self.lock();
        let timer = registry
            .timers
            .get_mut(name)
            .ok_or_else(|| TimerError::NotFound(name.to_string()))?;

        if !timer.is_running() {
            self.emit(&format!("Timer '{}' is not running", name));
            return Ok(());
        }
        if timer.state() != TimerState::Paused {
            self.emit(&format!("Timer '{}' is already running", name));
            return Ok(());
        }

        timer.resume(&self.services, &self.ticker);
        self.emit(&format!("Resumed timer '{}'", name));
        Ok(())
    }

    /// Stop and rewind a timer. This also emits the completion line even
    /// though the countdown did not finish.
    pub fn stop_timer(&self, name: &str) -> Result<()> {
        let mut registry = self.lock();
        self.stop_locked(&mut registry, name)
    }

    fn stop_locked(&self, registry: &mut Registry, name: &str) -> Result<()> {
        let timer = registry
            .timers
            .get_mut(name)
            .ok_or_else(|| TimerError::NotFound(name.to_string()))?;

        timer.stop(&self.services);
        self.services.silence(name);
        info!("Stopped timer '{}'", name);
        self.emit(&format!("Stopped timer '{}'", name));
        self.emit(&format!("[{}]: Complete!", name));
        Ok(())
    }

    pub fn delete_timer(&self, name: &str) -> Result<()> {
        let mut registry = self.lock();
        self.stop_locked(&mut registry, name)?;
        registry.timers.remove(name);
        drop(registry);

        info!("Deleted timer '{}'", name);
        self.emit(&format!("Deleted timer '{}'", name));
        self.services.scheduler.cancel(name);
        Ok(())
    }

    pub fn list_timers(&self) {
        let registry = self.lock();
        if registry.timers.is_empty() {
            self.emit("No active timers");
            return;
        }

        self.emit(&format!("Active timers ({}):", registry.timers.len()));
        for timer in registry.timers.values() {
            let status = if timer.state() == TimerState::Paused { "paused" } else { "running" };
            self.emit(&format!("{} ({})", timer.status_line(), status));
        }
    }

    /// Stop every timer without emitting anything, used on shutdown
    pub fn stop_all(&self) {
        let mut registry = self.lock();
        for timer in registry.timers.values_mut() {
            timer.stop(&self.services);
        }
        self.services.alert.stop_all();
        info!("Stopped {} timers", registry.timers.len());
    }

    /// A backup alarm only completes a timer that is still counting down
    pub fn handle_backup_alarm(&self, name: &str) {
        let mut registry = self.lock();
        match registry.timers.get_mut(name) {
            Some(timer) if timer.state() == TimerState::Running => {
                warn!(
                    "Backup alarm fired for '{}' with {}s still on the clock, completing it",
                    name,
                    timer.remaining()
                );
                timer.expire(&self.services);
            }
            Some(timer) => {
                debug!("Ignoring backup alarm for '{}' in state {:?}", name, timer.state());
            }
            None => {
                debug!("Ignoring backup alarm for unknown timer '{}'", name);
            }
        }
    }

    /// Every timer in its persisted shape, keyed by name
    pub fn snapshot(&self) -> BTreeMap<String, TimerRecord> {
        let registry = self.lock();
        registry
            .timers
            .iter()
            .map(|(name, timer)| (name.clone(), timer.record()))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<TimerRecord> {
        self.lock().timers.get(name).map(Timer::record)
    }

    pub fn state_of(&self, name: &str) -> Option<TimerState> {
        self.lock().timers.get(name).map(Timer::state)
    }

    pub fn has_backup_alarm(&self, name: &str) -> bool {
        self.lock().timers.get(name).is_some_and(Timer::has_backup_alarm)
    }

    pub fn len(&self) -> usize {
        self.lock().timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().timers.is_empty()
    }

    pub async fn save<S: TimerStore>(&self, store: &S) -> anyhow::Result<()> {
        let records = self.snapshot();
        let value = serde_json::to_value(&records).context("Failed to serialize timers")?;
        store.set(STORAGE_KEY, value).await?;
        debug!("Saved {} timers", records.len());
        Ok(())
    }

    /// Restore saved timers, resuming the ones that were counting down.
    /// Returns once every timer is registered; the count restored is returned.
    pub async fn load<S: TimerStore>(&self, store: &S) -> anyhow::Result<usize> {
        let Some(value) = store.get(STORAGE_KEY).await? else {
            info!("No saved timers found");
            return Ok(0);
        };

        let records: BTreeMap<String, TimerRecord> =
            serde_json::from_value(value).context("Saved timers are malformed")?;

        let mut registry = self.lock();
        for record in records.into_values() {
            let mut timer = Timer::restore(&record);
            if record.should_resume() {
                timer.start(&self.services, &self.ticker);
            }
            if let Some(mut replaced) = registry.timers.insert(record.name.clone(), timer) {
                replaced.stop(&self.services);
            }
        }

        info!("Restored {} timers", registry.timers.len());
        Ok(registry.timers.len())
    }
}
