//! Tracing subscriber setup for hosts embedding the editor.

use anyhow::Result;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct LogOptions {
    pub dir: PathBuf,
    pub file_name: String,
    /// Used when `RUST_LOG` is unset.
    pub default_directive: String,
    /// Remove a previous log file before the first write.
    pub truncate: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            file_name: "vimcore.log".to_string(),
            default_directive: "info".to_string(),
            truncate: true,
        }
    }
}

impl LogOptions {
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_directive))
    }
}

/// Install a file-backed global subscriber.
///
/// The returned guard flushes the non-blocking writer on drop and must be
/// held for the life of the host. When a global subscriber is already
/// installed this is a no-op returning `Ok(None)`.
pub fn init(opts: LogOptions) -> Result<Option<WorkerGuard>> {
    std::fs::create_dir_all(&opts.dir)?;
    let log_path = opts.dir.join(&opts.file_name);
    if opts.truncate && log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(&opts.dir, &opts.file_name);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(opts.filter())
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(()) => Ok(Some(guard)),
        // Global subscriber already installed; dropping the guard shuts the writer down.
        Err(_err) => Ok(None),
    }
}
