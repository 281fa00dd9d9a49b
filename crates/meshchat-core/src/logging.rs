//! Tracing initialization.
//!
//! The TUI owns stdout while the session runs, so log output goes to a file
//! instead: set `MESHCHAT_LOG_FILE` to enable it. `RUST_LOG` controls the
//! filter, defaulting to `info`.

use std::fs::OpenOptions;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

pub fn init() {
    let Some(path) = std::env::var_os("MESHCHAT_LOG_FILE") else {
        return;
    };

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!(
                "failed to open log file {}: {err}",
                path.to_string_lossy()
            );
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(file_layer).init();
}
