//! Interactive command loop on stdin

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info};

use crate::{assistant::Assistant, services::TimerStore, utils::shutdown_signal};

/// Read commands line by line until `exit`, end of input or a shutdown signal
pub async fn run_repl<S: TimerStore>(assistant: &Assistant<S>) {
    info!("Reading commands from stdin");
    println!("Timer Assistant - type 'help' for examples, 'exit' to quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        if line.trim().eq_ignore_ascii_case("exit") {
                            println!("Exiting...");
                            break;
                        }
                        let outcome = assistant.handle_text(&line).await;
                        debug!("Command outcome: {}", outcome.status());
                    }
                    Ok(None) => {
                        info!("End of input");
                        break;
                    }
                    Err(e) => {
                        error!("Failed to read from stdin: {}", e);
                        break;
                    }
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }
}
