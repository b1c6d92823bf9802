//! Backup alarm listener task

use tokio::sync::mpsc;
use tracing::info;

use crate::state::TimerManager;

/// Background task that hands fired backup alarms to the manager
pub async fn backup_alarm_task(manager: TimerManager, mut fired_rx: mpsc::UnboundedReceiver<String>) {
    info!("Starting backup alarm listener");

    while let Some(name) = fired_rx.recv().await {
        manager.handle_backup_alarm(&name);
    }

    info!("Backup alarm channel closed, listener exiting");
}
