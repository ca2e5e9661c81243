use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::Error;
use crate::model::MatchLog;

/// Text of the report: one `Source` / `Compare` / `Destination` stanza per
/// entry, each followed by a blank line.
pub fn render(log: &MatchLog) -> String {
    let mut out = String::new();
    for entry in log {
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "Source: {}\nCompare: {}\nDestination: {}\n\n",
            entry.source_path.display(),
            entry.compare_path.display(),
            entry.destination_path.display(),
        );
    }
    out
}

/// Write the report to `output_path`, replacing any existing file.
pub fn write(log: &MatchLog, output_path: &Path) -> Result<(), Error> {
    fs::write(output_path, render(log)).map_err(|source| Error::ReportWrite {
        path: output_path.to_path_buf(),
        source,
    })?;
    info!(
        "Wrote {} entries to {}",
        log.len(),
        output_path.display()
    );
    Ok(())
}
