//! One-second tick source for running timers

use std::{
    sync::{Mutex, Weak},
    time::Duration,
};

use tokio::{
    task::AbortHandle,
    time::{interval_at, Instant},
};
use tracing::debug;

use crate::{services::Services, state::Registry, timer::TickOutcome};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Spawns tick tasks that feed back into the registry by timer name
#[derive(Debug, Clone)]
pub struct Ticker {
    registry: Weak<Mutex<Registry>>,
    services: Services,
}

impl Ticker {
    pub fn new(registry: Weak<Mutex<Registry>>, services: Services) -> Self {
        Self { registry, services }
    }

    /// Start ticking the timer called `name`. `generation` identifies this
    /// particular start so a superseded task stops on its next tick.
    pub fn spawn(&self, name: &str, generation: u64) -> AbortHandle {
        let ticker = self.clone();
        let name = name.to_string();
        tokio::spawn(async move { ticker.run(name, generation).await }).abort_handle()
    }

    async fn run(self, name: String, generation: u64) {
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

        loop {
            interval.tick().await;

            let Some(registry) = self.registry.upgrade() else {
                debug!("Registry dropped, ticker for '{}' exiting", name);
                break;
            };

            let outcome = {
                let mut registry = registry.lock().unwrap_or_else(|e| e.into_inner());
                registry.tick(&name, generation, &self.services)
            };

            if outcome == TickOutcome::Finished {
                debug!("Ticker for '{}' (generation {}) finished", name, generation);
                break;
            }
        }
    }
}
