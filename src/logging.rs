use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn default_filter(verbose: bool) -> String {
    if verbose {
        "glbfind=debug".to_string()
    } else {
        "glbfind=info".to_string()
    }
}

/// Tracing for one-shot commands, written to stderr so piped output stays
/// machine-readable. `RUST_LOG` overrides the default filter.
pub fn init_tracing(verbose: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(verbose).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Interactive mode logs to a file instead, keeping the alternate screen
/// clean. Returns the log path for display.
pub fn init_tracing_to_file(verbose: bool) -> Result<PathBuf> {
    let path = std::env::temp_dir().join("glbfind.log");
    let file = std::fs::File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(verbose).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file)),
        )
        .init();

    Ok(path)
}
