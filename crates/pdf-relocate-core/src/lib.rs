pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod pdf;
pub mod progress;
pub mod relocate;
pub mod report;
pub mod scanner;
pub mod verify;

pub use config::AppConfig;
pub use engine::{RelocationEngine, RunOutcome, RunStats};
pub use error::Error;
pub use model::{FileRecord, MatchCandidate, MatchLog, VerifiedMatch};
pub use pdf::{LopdfPageCounter, PageCounter};
pub use progress::{ProgressReporter, SilentReporter};
pub use relocate::CollisionPolicy;
pub use verify::MatchVerifier;
