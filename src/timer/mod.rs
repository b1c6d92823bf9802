//! Timer module
//!
//! A single named countdown, the commands that drive it, and its persisted form.

pub mod command;
pub mod record;
pub mod timer;

pub use command::Command;
pub use record::{format_time, TimerRecord};
pub use timer::{TickOutcome, Timer, TimerState};
