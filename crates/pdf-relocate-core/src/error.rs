use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Directory not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Unreadable PDF {}: {reason}", path.display())]
    UnreadablePdf { path: PathBuf, reason: String },

    #[error("Failed to move {} to {}: {reason}", source_path.display(), destination.display())]
    MoveFailure {
        source_path: PathBuf,
        destination: PathBuf,
        reason: String,
    },

    #[error("Destination already exists: {}", path.display())]
    DestinationExists { path: PathBuf },

    #[error(
        "Destination {} is inside the compare tree {}",
        dest.display(),
        compare.display()
    )]
    DestinationInsideCompare { dest: PathBuf, compare: PathBuf },

    #[error("Failed to write report {}: {source}", path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error must abort the whole run rather than a single file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::NotFound { .. }
                | Error::DestinationInsideCompare { .. }
                | Error::ReportWrite { .. }
                | Error::Config(_)
        )
    }
}
