//! Completion notifications

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// A desktop-style notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub id: String,
}

impl Notification {
    /// Notification for a finished timer
    pub fn timer_complete(name: &str) -> Self {
        Self {
            title: "Timer Complete".to_string(),
            message: format!("Your \"{}\" timer has finished!", name),
            id: format!("notification_{}", name),
        }
    }

    /// Generic notification used when the alert sound could not be played
    pub fn fallback() -> Self {
        Self {
            title: "Timer Complete".to_string(),
            message: "Timer finished!".to_string(),
            id: "notification".to_string(),
        }
    }
}

/// Fire-and-forget notification delivery; errors are reported but never fatal
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification) -> Result<(), String>;
}

/// Writes notifications to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), String> {
        info!("{}: {}", notification.title, notification.message);
        Ok(())
    }
}

/// Shows notifications through `notify-send`
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), String> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| format!("No runtime available for notify-send: {}", e))?;

        let notification = notification.clone();
        runtime.spawn(async move {
            if let Err(e) = send_desktop_notification(&notification).await {
                warn!("Desktop notification failed: {}", e);
            }
        });
        Ok(())
    }
}

async fn send_desktop_notification(notification: &Notification) -> Result<(), String> {
    debug!("Sending desktop notification {}", notification.id);

    let output = Command::new("notify-send")
        .args(["--urgency=critical", "--app-name=timer-assistant"])
        .arg(&notification.title)
        .arg(&notification.message)
        .output()
        .await
        .map_err(|e| format!("Failed to execute notify-send: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("notify-send failed: {}", stderr));
    }

    Ok(())
}
