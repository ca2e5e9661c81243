use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::relocate::CollisionPolicy;

pub const DEFAULT_REPORT_PATH: &str = "output.txt";

/// Everything a run needs. Produced by a shell (CLI, config file, env) and
/// handed to the engine by value; the engine holds no other state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub source_root: PathBuf,
    pub compare_root: PathBuf,
    pub dest_root: PathBuf,
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    #[serde(default)]
    pub on_collision: CollisionPolicy,
}

fn default_report_path() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_PATH)
}

/// Values from `PdfRelocate.toml` and `PDF_RELOCATE_*` variables. Every field is
/// optional here; the shell merges them with its own arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialConfig {
    pub source_root: Option<PathBuf>,
    pub compare_root: Option<PathBuf>,
    pub dest_root: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    pub on_collision: Option<CollisionPolicy>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn new(
        source_root: impl Into<PathBuf>,
        compare_root: impl Into<PathBuf>,
        dest_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            compare_root: compare_root.into(),
            dest_root: dest_root.into(),
            report_path: default_report_path(),
            ignore_patterns: Vec::new(),
            on_collision: CollisionPolicy::default(),
        }
    }

    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = path.into();
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.on_collision = policy;
        self
    }

    /// True when the destination lies inside the source tree. Moved files are
    /// not rescanned within a run but would be on the next one.
    pub fn dest_inside_source(&self) -> bool {
        normalize(&self.dest_root).starts_with(normalize(&self.source_root))
    }

    /// The compare tree is read-only, so a destination inside it is rejected.
    pub fn check_destination(&self) -> Result<(), Error> {
        if normalize(&self.dest_root).starts_with(normalize(&self.compare_root)) {
            return Err(Error::DestinationInsideCompare {
                dest: self.dest_root.clone(),
                compare: self.compare_root.clone(),
            });
        }
        Ok(())
    }
}

/// Canonical form of `path`, resolving the longest existing ancestor so that
/// a destination which does not exist yet still compares correctly.
fn normalize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => normalize(parent).join(name),
        (Some(_), Some(name)) => normalize(Path::new(".")).join(name),
        _ => path.to_path_buf(),
    }
}

/// Load optional settings from `PdfRelocate.toml` in the working directory,
/// overlaid by `PDF_RELOCATE_*` environment variables.
pub fn load_configuration() -> Result<PartialConfig, ConfigError> {
    load_configuration_from("PdfRelocate")
}

pub fn load_configuration_from(name: &str) -> Result<PartialConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name(name).required(false))
        .add_source(
            Environment::with_prefix("PDF_RELOCATE")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("ignore_patterns"),
        )
        .build()?;
    builder.try_deserialize::<PartialConfig>()
}
