//! Timer Assistant - named countdown timers driven by plain-English commands
//!
//! This is the main entry point for the timer-assistant application.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use timer_assistant::{
    api::create_router,
    assistant::Assistant,
    config::Config,
    repl::run_repl,
    services::{
        ConsoleSink, DesktopNotifier, JsonFileStore, LogNotifier, LogSink, Notifier, OutputSink,
        Services, TerminalBell, TokioScheduler,
    },
    tasks::backup_alarm_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so they never interleave with command output
    tracing_subscriber::fmt()
        .with_env_filter(format!("timer_assistant={},tower_http=info", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting timer-assistant v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: serve={}, store={}", config.serve, config.store.display());

    let sink: Arc<dyn OutputSink> = if config.serve {
        Arc::new(LogSink)
    } else {
        Arc::new(ConsoleSink::new())
    };
    let notifier: Arc<dyn Notifier> = if config.notify_desktop {
        Arc::new(DesktopNotifier)
    } else {
        Arc::new(LogNotifier)
    };
    let (scheduler, fired_rx) = TokioScheduler::new();
    let services = Services::new(sink, notifier, Arc::new(TerminalBell), Arc::new(scheduler));

    let assistant = Arc::new(Assistant::new(services, JsonFileStore::new(&config.store)));

    // Backup alarms report back through this listener
    tokio::spawn(backup_alarm_task(assistant.manager().clone(), fired_rx));

    let restored = assistant.restore().await;
    info!("Restored {} timers from {}", restored, config.store.display());

    if config.serve {
        let app = create_router(Arc::clone(&assistant));
        let addr = config.address();
        let listener = TcpListener::bind(&addr).await?;

        info!("Server running on http://{}", addr);
        info!("Endpoints:");
        info!("  POST /command - Interpret and run {{\"text\": \"...\"}}");
        info!("  GET  /timers  - Current timers");
        info!("  GET  /health  - Health check");

        let server = axum::serve(listener, app);

        tokio::select! {
            result = server => {
                if let Err(e) = result {
                    tracing::error!("Server error: {}", e);
                }
            }
            _ = shutdown_signal() => {
                info!("Shutdown signal received");
            }
        }
    } else {
        run_repl(&*assistant).await;
    }

    assistant.shutdown().await;
    info!("Shutdown complete");
    Ok(())
}
