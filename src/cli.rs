//! CLI definitions for tabpilot.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// tabpilot CLI.
#[derive(Parser)]
#[command(name = "tabpilot")]
#[command(about = "Relays textbook questions to an AI chat tab over CDP")]
#[command(version)]
pub(crate) struct Cli {
    /// Chrome DevTools endpoint
    #[arg(long, default_value = "http://127.0.0.1:9222", global = true)]
    pub endpoint: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the relay in foreground (default)
    Run {
        /// Launch Chrome if the endpoint does not answer
        #[arg(long)]
        launch: bool,

        /// Remote debugging port used when launching
        #[arg(long, default_value_t = 9222)]
        port: u16,

        /// Chrome profile directory used when launching
        #[arg(long)]
        profile_dir: Option<PathBuf>,
    },

    /// List open tabs and how they classify
    Tabs,

    /// Settings management commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the merged settings
    Show,

    /// Set one settings key
    Set {
        /// Key (ai_model, min_delay, max_delay, turbo_mode, website_url)
        key: String,

        /// New value
        value: String,
    },
}
