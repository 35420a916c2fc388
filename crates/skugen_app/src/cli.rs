use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use skugen_core::SaveTrigger;

/// Deterministic SKU generation for product saves.
#[derive(Parser, Debug)]
#[command(name = "skugen", version, about = "Derive SKUs from product titles")]
pub struct Cli {
    /// Settings file (RON). Defaults to ./skugen.ron when present.
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// History log file; overrides the settings file.
    #[arg(long = "history", global = true)]
    pub history: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(long = "verbose", short = 'v', global = true)]
    pub verbose: bool,

    /// Also write logs to this file.
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the SKU for each title.
    Derive {
        /// Product titles.
        #[arg(required = true)]
        titles: Vec<String>,
        /// Print JSON instead of plain lines.
        #[arg(long)]
        json: bool,
    },

    /// Run a product save through the missing-SKU guard.
    Save {
        /// Product title.
        #[arg(long)]
        title: String,
        /// Current SKU field value; omitted means empty.
        #[arg(long)]
        sku: Option<String>,
        /// How the save was triggered.
        #[arg(long, value_enum, default_value_t = Trigger::Click)]
        trigger: Trigger,
        /// Generate without asking.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
        /// Print the resulting form as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show generated SKUs, newest first.
    History {
        /// Maximum number of entries.
        #[arg(long, conflicts_with = "title")]
        limit: Option<usize>,
        /// Only the latest SKU generated for this title.
        #[arg(long)]
        title: Option<String>,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Remove all history entries.
    ClearHistory,

    /// Check that a string is a well-formed SKU.
    Check {
        sku: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Click,
    Submit,
    Shortcut,
}

impl From<Trigger> for SaveTrigger {
    fn from(trigger: Trigger) -> Self {
        match trigger {
            Trigger::Click => SaveTrigger::Click,
            Trigger::Submit => SaveTrigger::FormSubmit,
            Trigger::Shortcut => SaveTrigger::KeyboardShortcut,
        }
    }
}
