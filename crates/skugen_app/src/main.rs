//! `skugen`: command-line host for SKU derivation and the missing-SKU save guard.

mod cli;
mod commands;
mod effects;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use skugen_logging::{skugen_debug, LevelFilter};
use skugen_store::Settings;

use cli::{Cli, Commands};

const DEFAULT_CONFIG_FILENAME: &str = "skugen.ron";

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => {
            Settings::load(path).with_context(|| format!("loading settings {path:?}"))?
        }
        None => Settings::load_optional(&PathBuf::from(DEFAULT_CONFIG_FILENAME))
            .context("loading default settings")?,
    };
    if let Some(path) = cli.history.clone() {
        settings.history_path = path;
    }

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        settings.log_level.into()
    };
    skugen_logging::initialize(level, cli.log_file.as_deref());
    skugen_debug!("Using history log {:?}", settings.history_path);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Derive { titles, json } => {
            commands::derive(&titles, json, &mut out, &mut io::stderr())
        }
        Commands::Save {
            title,
            sku,
            trigger,
            yes,
            json,
        } => commands::save(
            &settings,
            &title,
            sku.as_deref(),
            trigger.into(),
            yes,
            json,
            &mut out,
        ),
        Commands::History { limit, title, json } => {
            commands::history(&settings, limit, title.as_deref(), json, &mut out)
        }
        Commands::ClearHistory => commands::clear_history(&settings, &mut out),
        Commands::Check { sku } => commands::check(&sku, &mut out),
    }
}
