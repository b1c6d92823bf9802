//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "timer-assistant")]
#[command(about = "Named countdown timers driven by plain-English commands")]
#[command(version)]
pub struct Config {
    /// Serve the HTTP command API instead of reading commands from stdin
    #[arg(long)]
    pub serve: bool,

    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// File the timers are saved to between runs
    #[arg(short, long, default_value = "timers.json")]
    pub store: PathBuf,

    /// Show completion notifications on the desktop via notify-send
    #[arg(long)]
    pub notify_desktop: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
