//! State management module
//!
//! The timer registry, command dispatch and persistence round-trip.

pub mod error;
pub mod timer_manager;

pub use error::{Result, TimerError};
pub use timer_manager::{Registry, TimerManager};
