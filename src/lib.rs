//! Timer Assistant - named countdown timers driven by plain-English commands
//!
//! Text goes through the [`interpreter`] to become a [`Command`], which the
//! [`TimerManager`] applies to its registry of timers. Collaborators for
//! output, notifications, backup alarms and persistence live in [`services`].

pub mod api;
pub mod assistant;
pub mod config;
pub mod interpreter;
pub mod repl;
pub mod services;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use assistant::{Assistant, Outcome};
pub use config::Config;
pub use interpreter::{interpret, Interpreter};
pub use state::{TimerError, TimerManager};
pub use timer::{Command, Timer, TimerRecord, TimerState};
pub use utils::signals::shutdown_signal;
