use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::Error;

const MAX_RENAME_ATTEMPTS: u32 = 1000;

/// What to do when a file with the same name is already in the destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Report a move failure and leave the source in place.
    #[default]
    Fail,
    /// Leave the source in place without reporting a failure.
    Skip,
    /// Pick `stem_1.pdf`, `stem_2.pdf`, ... until a free name is found.
    Rename,
    /// Replace the existing file.
    Overwrite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved(PathBuf),
    Skipped(PathBuf),
}

/// Destination for `source_path` inside `dest_root`: same file name, new parent.
pub fn destination_for(source_path: &Path, dest_root: &Path) -> Result<PathBuf, Error> {
    let file_name = source_path.file_name().ok_or_else(|| Error::MoveFailure {
        source_path: source_path.to_path_buf(),
        destination: dest_root.to_path_buf(),
        reason: "source path has no file name".to_string(),
    })?;
    Ok(dest_root.join(file_name))
}

/// Move `source_path` to `destination`, applying `policy` if the destination
/// is taken. Returns where the file actually ended up.
///
/// Only `Overwrite` may replace a file. The other policies move with
/// [`move_file_no_clobber`], so a file that appears at the target after the
/// existence check is reported as `DestinationExists` instead of being replaced.
pub fn relocate(
    source_path: &Path,
    destination: &Path,
    policy: CollisionPolicy,
) -> Result<MoveOutcome, Error> {
    let target = if destination.exists() {
        match policy {
            CollisionPolicy::Fail => {
                return Err(Error::DestinationExists {
                    path: destination.to_path_buf(),
                })
            }
            CollisionPolicy::Skip => return Ok(MoveOutcome::Skipped(destination.to_path_buf())),
            CollisionPolicy::Rename => unique_path(destination)?,
            CollisionPolicy::Overwrite => {
                warn!("Overwriting existing file {}", destination.display());
                destination.to_path_buf()
            }
        }
    } else {
        destination.to_path_buf()
    };

    if policy == CollisionPolicy::Overwrite {
        move_file(source_path, &target)?;
    } else {
        move_file_no_clobber(source_path, &target)?;
    }
    Ok(MoveOutcome::Moved(target))
}

/// Rename, falling back to copy + remove when the rename is refused
/// (typically a cross-device move). Replaces an existing `destination`.
pub fn move_file(source_path: &Path, destination: &Path) -> Result<(), Error> {
    let rename_err = match fs::rename(source_path, destination) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    if !source_path.is_file() {
        return Err(move_failure(source_path, destination, rename_err.to_string()));
    }

    debug!(
        "Rename of {} failed ({}), falling back to copy",
        source_path.display(),
        rename_err
    );
    copy_then_remove(source_path, destination, |from, to| {
        fs::copy(from, to).map(|_| ())
    })
}

/// Move that never replaces an existing `destination`.
///
/// A hard link refuses an existing target atomically; where links are not
/// possible (other device, unsupported filesystem) the copy opens the target
/// with `create_new`.
pub fn move_file_no_clobber(source_path: &Path, destination: &Path) -> Result<(), Error> {
    match fs::hard_link(source_path, destination) {
        Ok(()) => return remove_source(source_path, destination),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(Error::DestinationExists {
                path: destination.to_path_buf(),
            })
        }
        Err(e) if !source_path.is_file() => {
            return Err(move_failure(source_path, destination, e.to_string()))
        }
        Err(e) => debug!(
            "Hard link of {} failed ({}), falling back to copy",
            source_path.display(),
            e
        ),
    }

    copy_then_remove(source_path, destination, copy_new)
}

fn copy_new(from: &Path, to: &Path) -> io::Result<()> {
    let mut reader = File::open(from)?;
    let permissions = reader.metadata()?.permissions();
    let mut writer = OpenOptions::new().write(true).create_new(true).open(to)?;
    io::copy(&mut reader, &mut writer)?;
    writer.sync_all()?;
    fs::set_permissions(to, permissions)
}

/// Copy with `copy`, then remove the source. On any failure the destination
/// is left as it was before the call.
fn copy_then_remove<F>(source_path: &Path, destination: &Path, copy: F) -> Result<(), Error>
where
    F: FnOnce(&Path, &Path) -> io::Result<()>,
{
    if let Err(e) = copy(source_path, destination) {
        if e.kind() == io::ErrorKind::AlreadyExists {
            return Err(Error::DestinationExists {
                path: destination.to_path_buf(),
            });
        }
        discard_partial(destination);
        return Err(move_failure(
            source_path,
            destination,
            format!("copy failed: {}", e),
        ));
    }

    remove_source(source_path, destination)
}

/// Drop the source once `destination` holds the file. Never leave the file
/// in both places.
fn remove_source(source_path: &Path, destination: &Path) -> Result<(), Error> {
    if let Err(e) = fs::remove_file(source_path) {
        discard_partial(destination);
        return Err(move_failure(
            source_path,
            destination,
            format!("failed to remove source after copy: {}", e),
        ));
    }
    Ok(())
}

fn discard_partial(destination: &Path) {
    match fs::remove_file(destination) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(
            "Failed to remove partial copy {}: {}",
            destination.display(),
            e
        ),
    }
}

fn move_failure(source_path: &Path, destination: &Path, reason: String) -> Error {
    Error::MoveFailure {
        source_path: source_path.to_path_buf(),
        destination: destination.to_path_buf(),
        reason,
    }
}

fn unique_path(original: &Path) -> Result<PathBuf, Error> {
    let parent = original.parent().unwrap_or(Path::new("."));
    let stem = original
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());
    let ext = original
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1..=MAX_RENAME_ATTEMPTS)
        .map(|n| parent.join(format!("{}_{}{}", stem, n, ext)))
        .find(|candidate| !candidate.exists())
        .ok_or_else(|| Error::DestinationExists {
            path: original.to_path_buf(),
        })
}
