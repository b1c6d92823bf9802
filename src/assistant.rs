//! Application context: interpreter, timer manager and store, built once by the entry point

use std::collections::BTreeMap;

use tracing::{error, info, warn};

use crate::{
    interpreter::Interpreter,
    services::{Services, TimerStore},
    state::{TimerError, TimerManager},
    timer::{Command, TimerRecord},
};

pub const HELP_TEXT: &str = "\
Welcome to Timer Assistant!
Just type what you want in natural language:

Examples:
- \"set a 5 minute timer for coffee break\"
- \"start a 25 min pomodoro timer\"
- \"create 1 hour meeting timer\"
- \"pause the coffee timer\"
- \"show all timers\"
- \"stop meeting timer\"

The assistant will understand your intent and execute the command.";

pub const NOT_UNDERSTOOD: &str = "I didn't understand that command. Try rephrasing or type 'help'.";

/// What happened to one line of user text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Blank input
    Ignored,
    Help,
    Executed(Command),
    Failed(TimerError),
    Unrecognized,
}

impl Outcome {
    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Ignored | Outcome::Executed(_) => "ok",
            Outcome::Help => "help",
            Outcome::Failed(_) => "error",
            Outcome::Unrecognized => "unrecognized",
        }
    }
}

pub struct Assistant<S> {
    interpreter: Interpreter,
    manager: TimerManager,
    store: S,
}

impl<S: TimerStore> Assistant<S> {
    pub fn new(services: Services, store: S) -> Self {
        Self {
            interpreter: Interpreter::new(),
            manager: TimerManager::new(services),
            store,
        }
    }

    pub fn manager(&self) -> &TimerManager {
        &self.manager
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Interpret and run one line of user text, then persist the registry
    pub async fn handle_text(&self, text: &str) -> Outcome {
        let text = text.trim();
        if text.is_empty() {
            return Outcome::Ignored;
        }

        let services = self.manager.services();
        if text.eq_ignore_ascii_case("help") {
            services.emit(HELP_TEXT);
            return Outcome::Help;
        }

        let Some(command) = self.interpreter.interpret(text) else {
            info!("Could not interpret {:?}", text);
            services.emit(NOT_UNDERSTOOD);
            return Outcome::Unrecognized;
        };

        let outcome = match self.manager.execute_command(&command) {
            Ok(()) => {
                services.emit(&format!("Executed: {}", text));
                Outcome::Executed(command)
            }
            Err(e) => {
                warn!("Command {:?} failed: {}", command, e);
                services.emit(&format!("Error: {}", e));
                Outcome::Failed(e)
            }
        };

        self.persist().await;
        outcome
    }

    /// The full registry, for UI sync
    pub fn snapshot(&self) -> BTreeMap<String, TimerRecord> {
        self.manager.snapshot()
    }

    /// Load saved timers; a missing or unreadable store starts empty
    pub async fn restore(&self) -> usize {
        match self.manager.load(&self.store).await {
            Ok(count) => count,
            Err(e) => {
                error!("Failed to restore timers: {:#}", e);
                0
            }
        }
    }

    /// Save once more and stop every tick source
    pub async fn shutdown(&self) {
        self.persist().await;
        self.manager.stop_all();
        info!("Assistant shut down");
    }

    async fn persist(&self) {
        if let Err(e) = self.manager.save(&self.store).await {
            error!("Failed to save timers: {:#}", e);
        }
    }
}
