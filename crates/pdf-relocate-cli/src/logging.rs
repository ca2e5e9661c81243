use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILE: &str = "./logs/pdf-relocate.log";

/// Where and how verbosely a run logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub filter: String,
    pub file: PathBuf,
}

impl LogSettings {
    /// `--log-file` wins over `LOG_FILE_PATH`, which wins over `log_file`
    /// from `PdfRelocate.toml`.
    pub fn resolve(cli_file: Option<PathBuf>, configured_file: Option<PathBuf>) -> Self {
        let file = cli_file
            .or_else(|| env::var_os("LOG_FILE_PATH").map(PathBuf::from))
            .or(configured_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
        let filter = env::var("TRACING_LEVEL").unwrap_or_else(|_| "info".to_string());
        Self { filter, file }
    }

    fn split_file(&self) -> (PathBuf, PathBuf) {
        let dir = match self.file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let name = self
            .file
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("pdf-relocate.log"));
        (dir, name)
    }
}

/// Pretty events on stdout plus a plain-text copy in the run's log file.
/// Keep the returned guard alive until exit so the file gets flushed.
pub fn init_logger(settings: &LogSettings) -> WorkerGuard {
    let (dir, name) = settings.split_file();
    let file_appender = tracing_appender::rolling::never(&dir, &name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .pretty()
                .with_file(false)
                .with_line_number(false)
                .with_target(false)
                .without_time(),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_target(false)
                .with_ansi(false),
        )
        .with(EnvFilter::new(&settings.filter))
        .init();

    debug!("Logging to {}", Path::new(&dir).join(&name).display());

    guard
}
