//! API response structures

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerRecord;

/// Body of POST /command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    pub text: String,
}

/// Result of running one command, with the registry as it stands afterwards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timers: BTreeMap<String, TimerRecord>,
}

impl ApiResponse {
    pub fn new(status: &str, message: String, timers: BTreeMap<String, TimerRecord>) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            timers,
        }
    }
}

/// Registry snapshot for UI sync
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimersResponse {
    pub count: usize,
    pub timers: BTreeMap<String, TimerRecord>,
}

impl TimersResponse {
    pub fn new(timers: BTreeMap<String, TimerRecord>) -> Self {
        Self { count: timers.len(), timers }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
