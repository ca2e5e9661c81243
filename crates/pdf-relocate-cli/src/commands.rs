use clap::{Parser, ValueEnum};
use pdf_relocate_core::CollisionPolicy;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pdf-relocate")]
#[command(version, about = "Compare and move PDF files.", long_about = None)]
pub struct Cli {
    /// Path to the source folder.
    pub source_folder: Option<PathBuf>,

    /// Path to the compare folder.
    pub compare_folder: Option<PathBuf>,

    /// Path to the destination folder.
    pub dest_folder: Option<PathBuf>,

    /// Where to write the match report
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// What to do when the destination already holds a file of the same name
    #[arg(long, value_enum)]
    pub on_collision: Option<CollisionArg>,

    /// Glob of paths to skip in both trees (repeatable)
    #[arg(long = "ignore", value_name = "GLOB")]
    pub ignore: Vec<String>,

    /// Create the destination folder if it does not exist
    #[arg(long)]
    pub create_dest: bool,

    /// Log file for this run (overrides LOG_FILE_PATH and `log_file`)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CollisionArg {
    /// Leave the source in place and report a failure
    Fail,
    /// Leave the source in place quietly
    Skip,
    /// Move under a numbered name such as `doc_1.pdf`
    Rename,
    /// Replace the existing file
    Overwrite,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Fail => CollisionPolicy::Fail,
            CollisionArg::Skip => CollisionPolicy::Skip,
            CollisionArg::Rename => CollisionPolicy::Rename,
            CollisionArg::Overwrite => CollisionPolicy::Overwrite,
        }
    }
}
