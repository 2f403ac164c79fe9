//! `notekeep` command-line client.
//!
//! # Responsibility
//! - Resolve configuration once at startup and fail fast when it is missing.
//! - Sequence note service calls with ownership updates.

mod cli;
mod commands;
mod tags;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::Cli;
use notekeep_core::{
    default_log_level, init_logging, ApiConfig, NoteService, OwnershipTracker, SqliteLocalStore,
};
use std::path::PathBuf;
use std::process::ExitCode;

const STATE_DIR_NAME: &str = ".notekeep";
const STATE_DB_FILE_NAME: &str = "state.sqlite3";

fn main() -> ExitCode {
    match run(Cli::parse(), |key| std::env::var(key).ok()) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Runs one invocation; `env` resolves configuration variables.
fn run<F>(cli: Cli, env: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)
            .map_err(anyhow::Error::msg)
            .context("failed to initialize logging")?;
    }

    let config = ApiConfig::from_lookup(env)?;
    let state_db = resolve_state_db(cli.state_db)?;
    let store = SqliteLocalStore::open(&state_db)
        .with_context(|| format!("failed to open state database `{}`", state_db.display()))?;
    let mut tracker = OwnershipTracker::load(store)?;
    let service = NoteService::new(config);

    commands::execute(cli.command, &service, &mut tracker)
}

fn resolve_state_db(explicit: Option<PathBuf>) -> Result<PathBuf> {
    let path = match explicit {
        Some(path) => path,
        None => {
            let Some(home) = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))
            else {
                bail!("cannot locate home directory; pass --state-db");
            };
            PathBuf::from(home)
                .join(STATE_DIR_NAME)
                .join(STATE_DB_FILE_NAME)
        }
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create `{}`", parent.display()))?;
    }
    Ok(path)
}
