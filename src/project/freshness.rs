//! Modification-time checks used to skip work that is already up to date.

use crate::error::Result;
use std::path::Path;
use std::time::SystemTime;
use walkdir::WalkDir;

/// Reports whether `target` must be regenerated from `sources`.
///
/// Directories are compared by the newest file they contain, so an
/// `.xcarchive` counts as fresh when its newest file is newer than every file
/// under the sources.
///
/// # Returns
///
/// * `Ok(true)` - `target` does not exist, or some source is newer
/// * `Ok(false)` - `target` is newer than every source
/// * `Err` - a source could not be read
pub fn is_stale(target: &Path, sources: &[&Path]) -> Result<bool> {
    let target_time = match newest_mtime(target) {
        Ok(Some(time)) => time,
        Ok(None) => return Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(true),
        Err(e) => return Err(e.into()),
    };

    for source in sources {
        if let Some(source_time) = newest_mtime(source)? {
            if source_time > target_time {
                log::debug!(
                    "{} is newer than {}",
                    source.display(),
                    target.display()
                );
                return Ok(true);
            }
        }
    }

    Ok(false)
}

/// Newest modification time of a file, or of any entry under a directory.
fn newest_mtime(path: &Path) -> std::io::Result<Option<SystemTime>> {
    let metadata = std::fs::metadata(path)?;
    if !metadata.is_dir() {
        return metadata.modified().map(Some);
    }

    let mut newest: Option<SystemTime> = None;
    for entry in WalkDir::new(path).follow_links(false) {
        let entry = entry.map_err(std::io::Error::other)?;
        if entry.file_type().is_dir() {
            continue;
        }
        let modified = entry.metadata().map_err(std::io::Error::other)?.modified()?;
        newest = Some(newest.map_or(modified, |n| n.max(modified)));
    }

    match newest {
        Some(time) => Ok(Some(time)),
        // Empty directory: fall back to the directory itself
        None => metadata.modified().map(Some),
    }
}
