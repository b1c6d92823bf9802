//! Background tasks module
//!
//! The per-timer tick source and the backup alarm listener.

pub mod backup_alarm;
pub mod ticker;

pub use backup_alarm::backup_alarm_task;
pub use ticker::{Ticker, TICK_PERIOD};
