//! Audible completion alert

use std::{
    collections::HashMap,
    io::{IsTerminal, Write},
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::{
    task::AbortHandle,
    time::{interval_at, Instant},
};
use tracing::debug;

/// Time between repeats of a completion alert
pub const ALERT_PERIOD: Duration = Duration::from_secs(1);
/// An unacknowledged alert goes quiet after this long
pub const ALERT_TIMEOUT: Duration = Duration::from_secs(120);

/// Plays a completion alert. An error makes the caller fall back to a notification.
pub trait AlertPlayer: Send + Sync {
    fn play(&self, timer_name: &str) -> Result<(), String>;
}

/// Rings the terminal bell, failing when stdout is not a terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl AlertPlayer for TerminalBell {
    fn play(&self, timer_name: &str) -> Result<(), String> {
        let mut stdout = std::io::stdout();
        if !stdout.is_terminal() {
            return Err(format!("No terminal to ring for timer '{}'", timer_name));
        }
        stdout
            .write_all(b"\x07")
            .and_then(|_| stdout.flush())
            .map_err(|e| format!("Failed to ring terminal bell: {}", e))
    }
}

/// Keeps one repeating alert task per timer name
#[derive(Clone)]
pub struct RepeatingAlert {
    player: Arc<dyn AlertPlayer>,
    active: Arc<Mutex<HashMap<String, AbortHandle>>>,
}

impl RepeatingAlert {
    pub fn new(player: Arc<dyn AlertPlayer>) -> Self {
        Self {
            player,
            active: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Play the alert now, then repeat it every [`ALERT_PERIOD`] until it is
    /// stopped or [`ALERT_TIMEOUT`] passes. Only the first play can fail.
    pub fn start(&self, timer_name: &str) -> Result<(), String> {
        self.stop(timer_name);
        self.player.play(timer_name)?;

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("No runtime available, alert for '{}' plays once", timer_name);
            return Ok(());
        };

        let player = Arc::clone(&self.player);
        let alert = timer_name.to_string();
        let first_repeat = Instant::now() + ALERT_PERIOD;
        let plays = ALERT_TIMEOUT.as_secs() / ALERT_PERIOD.as_secs();
        let handle = runtime
            .spawn(async move {
                let mut interval = interval_at(first_repeat, ALERT_PERIOD);
                for _ in 1..plays {
                    interval.tick().await;
                    if let Err(e) = player.play(&alert) {
                        debug!("Alert for '{}' stopped repeating: {}", alert, e);
                        return;
                    }
                }
                debug!("Alert for '{}' timed out", alert);
            })
            .abort_handle();

        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = active.insert(timer_name.to_string(), handle) {
            previous.abort();
        }
        Ok(())
    }

    pub fn stop(&self, timer_name: &str) {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = active.remove(timer_name) {
            handle.abort();
            debug!("Alert for '{}' stopped", timer_name);
        }
    }

    pub fn stop_all(&self) {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        for (_, handle) in active.drain() {
            handle.abort();
        }
    }

    /// Alerts still repeating
    pub fn active(&self) -> usize {
        let active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        active.values().filter(|handle| !handle.is_finished()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[derive(Default)]
    struct CountingPlayer {
        plays: Mutex<Vec<String>>,
    }

    impl CountingPlayer {
        fn count(&self, name: &str) -> usize {
            self.plays.lock().unwrap().iter().filter(|played| *played == name).count()
        }
    }

    impl AlertPlayer for CountingPlayer {
        fn play(&self, timer_name: &str) -> Result<(), String> {
            self.plays.lock().unwrap().push(timer_name.to_string());
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn repeats_every_second_until_timeout() {
        let player = Arc::new(CountingPlayer::default());
        let alerts = RepeatingAlert::new(player.clone());

        alerts.start("tea").unwrap();
        assert_eq!(player.count("tea"), 1);

        sleep(Duration::from_millis(10_500)).await;
        assert_eq!(player.count("tea"), 11);
        assert_eq!(alerts.active(), 1);

        sleep(Duration::from_secs(300)).await;
        assert_eq!(player.count("tea"), 120);
        assert_eq!(alerts.active(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_silences_one_and_stop_all_the_rest() {
        let player = Arc::new(CountingPlayer::default());
        let alerts = RepeatingAlert::new(player.clone());

        alerts.start("tea").unwrap();
        alerts.start("eggs").unwrap();
        sleep(Duration::from_millis(2500)).await;

        alerts.stop("tea");
        alerts.stop("missing");
        sleep(Duration::from_secs(3)).await;
        assert_eq!(player.count("tea"), 3);
        assert_eq!(player.count("eggs"), 6);

        alerts.stop_all();
        sleep(Duration::from_secs(3)).await;
        assert_eq!(player.count("eggs"), 6);
        assert_eq!(alerts.active(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_replaces_the_running_alert() {
        let player = Arc::new(CountingPlayer::default());
        let alerts = RepeatingAlert::new(player.clone());

        alerts.start("tea").unwrap();
        alerts.start("tea").unwrap();
        sleep(Duration::from_millis(1500)).await;

        assert_eq!(player.count("tea"), 3);
        assert_eq!(alerts.active(), 1);
    }
}
