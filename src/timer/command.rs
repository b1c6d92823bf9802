//! Structured commands produced by the interpreter

use serde::{Deserialize, Serialize};

/// A single action against the timer registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Command {
    /// Create a timer and start it right away
    Create { name: String, duration: u64 },
    Start { name: String },
    Pause { name: String },
    Resume { name: String },
    Stop { name: String },
    Delete { name: String },
    List,
}

impl Command {
    /// Name of the timer this command targets, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            Command::Create { name, .. }
            | Command::Start { name }
            | Command::Pause { name }
            | Command::Resume { name }
            | Command::Stop { name }
            | Command::Delete { name } => Some(name),
            Command::List => None,
        }
    }

    /// Lowercase tag used in logs and on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Create { .. } => "create",
            Command::Start { .. } => "start",
            Command::Pause { .. } => "pause",
            Command::Resume { .. } => "resume",
            Command::Stop { .. } => "stop",
            Command::Delete { .. } => "delete",
            Command::List => "list",
        }
    }
}
