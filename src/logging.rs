use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Sends tracing output to `path`, filtered by `RUST_LOG` (default `info`).
///
/// Logs never go to the terminal: the game owns the alternate screen.
pub fn init(path: &Path) -> io::Result<()> {
    let log_file = File::create(path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    Ok(())
}
