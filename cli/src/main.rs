//! tickloop - binary entry point.
//!
//! # Event Loop
//!
//! One thread, one epoll instance, three sources:
//!
//! 1. 10ms timer: print `popcnt(<n>) = <v>` when a value was published
//! 2. 100ms timer: print `lzcnt(<n>) = <v>` when a value was published
//! 3. Standard input: drain everything; a line containing `q` or `exit` quits
//!
//! Standard output carries task lines only. Logs go to standard error, or to
//! the file named by `TICKLOOP_LOG_FILE`.

mod settings;

use anyhow::{Context, Result};
use std::{
    fs::{self, File, OpenOptions},
    io,
    path::Path,
    sync::Mutex,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use settings::{DEFAULT_LOG_FILTER, Settings};
use tickloop_core::App;

fn init_tracing(settings: &Settings) {
    let mut warnings = Vec::new();

    let env_filter = EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|e| {
        warnings.push(format!(
            "Invalid log filter {:?}: {e}; using {DEFAULT_LOG_FILTER}",
            settings.log_filter
        ));
        EnvFilter::new(DEFAULT_LOG_FILTER)
    });

    let log_file = settings
        .log_file
        .as_deref()
        .and_then(|path| match open_log_file(path) {
            Ok(file) => Some((path, file)),
            Err(e) => {
                warnings.push(format!("Failed to open log file {}: {e}", path.display()));
                None
            }
        });

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();
        tracing::info!(path = %log_path.display(), "Logging initialized");
    } else {
        // Standard output is the data channel; never log there.
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(env_filter)
            .init();
    }

    for warning in warnings {
        tracing::warn!("{warning}");
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn main() -> Result<()> {
    let settings = Settings::from_env();
    init_tracing(&settings);

    let mut app = App::new().context("failed to set up event loop")?;
    app.run().context("event loop failed")?;

    tracing::info!("exiting on quit command");
    Ok(())
}
