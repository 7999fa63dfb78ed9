use std::fs::{self, File};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use playbar::config::{self, LogSettings};

/// Install a file-backed `tracing` subscriber. The terminal belongs to the
/// UI, so nothing is written to stdout or stderr. Without a resolvable log
/// path logging stays off.
pub fn init(settings: &LogSettings) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = settings.file.clone().or_else(config::default_log_path) else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = File::options().create(true).append(true).open(&path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let subscriber = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}
