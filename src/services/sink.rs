//! Output sinks for status and command lines

use std::{collections::HashMap, sync::Mutex};

use tracing::info;

/// Receives every human-readable line the timers and the manager produce.
///
/// Called synchronously while the registry is locked, so implementations
/// must not call back into the manager.
pub trait OutputSink: Send + Sync {
    fn emit(&self, line: &str);

    /// A status line produced by the one-second tick
    fn tick(&self, line: &str) {
        self.emit(line);
    }
}

impl<F> OutputSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn emit(&self, line: &str) {
        self(line)
    }
}

/// Prints lines to stdout. A tick's status line is skipped when it repeats
/// the last status printed for that timer; command output always prints.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    last_status: Mutex<HashMap<String, String>>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `line` as the latest status for its timer, reporting whether it was unchanged
    fn is_repeat(&self, line: &str) -> bool {
        let Some((name, status)) = split_status_line(line) else {
            return false;
        };
        let mut last = self.last_status.lock().unwrap_or_else(|e| e.into_inner());
        let repeat = last.get(name).is_some_and(|previous| previous == status);
        last.insert(name.to_string(), status.to_string());
        repeat
    }
}

impl OutputSink for ConsoleSink {
    fn emit(&self, line: &str) {
        self.is_repeat(line);
        println!("{}", line);
    }

    fn tick(&self, line: &str) {
        if !self.is_repeat(line) {
            println!("{}", line);
        }
    }
}

/// Writes lines to the log, used when running as a server
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl OutputSink for LogSink {
    fn emit(&self, line: &str) {
        info!(target: "timer_assistant::output", "{}", line);
    }
}

/// Split "[name]: status" into its parts
pub fn split_status_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('[')?;
    let (name, status) = rest.split_once("]: ")?;
    Some((name, status))
}
