//! # Extraction
//!
//! Restores a directory tree from an in-memory tar stream, applying entries
//! in stream order.

use std::io;
use std::path::Path;

use tar::EntryType;

use crate::fsx;
use crate::ArchiveError;

/// Unpacks the raw tar stream in `data` into `dest`, creating the
/// destination (and any missing parents) first.
///
/// Directory entries are created with their recorded mode, symlink entries
/// are recreated best-effort (a failed link is logged and skipped), and
/// every other entry is written out as a regular file with its recorded
/// mode. The first error other than a failed symlink aborts the whole
/// extraction; partially written output is left behind for the caller to
/// discard.
pub fn unpack_into(data: &[u8], dest: &Path) -> Result<(), ArchiveError> {
    fsx::create_dir_all(dest)
        .map_err(|e| ArchiveError::Io { source: e, path: dest.to_path_buf() })?;

    let mut reader = tar::Archive::new(data);
    for entry in reader.entries()? {
        let mut entry = entry?;
        let relative = entry.path()?.into_owned();
        let target = dest.join(&relative);
        let entry_type = entry.header().entry_type();
        let mode = entry.header().mode()?;
        tracing::debug!(entry = %relative.display(), "unpacking");

        match entry_type {
            EntryType::Directory => {
                fsx::create_dir_all(&target)
                    .map_err(|e| ArchiveError::Io { source: e, path: target.clone() })?;
                fsx::set_unix_permissions(&target, mode)
                    .map_err(|e| ArchiveError::Io { source: e, path: target.clone() })?;
            }
            EntryType::Symlink => {
                let Some(link_target) = entry.link_name()? else {
                    continue;
                };
                if let Err(err) = fsx::symlink(&link_target, &target) {
                    tracing::warn!(
                        link = %target.display(),
                        error = %err,
                        "could not recreate symlink, skipping"
                    );
                }
            }
            // Anything that is not a directory or symlink is written out as
            // a regular file.
            _ => {
                let mut file = fsx::File::create(&target)
                    .map_err(|e| ArchiveError::Io { source: e, path: target.clone() })?;
                io::copy(&mut entry, &mut file)
                    .map_err(|e| ArchiveError::Io { source: e, path: target.clone() })?;
                fsx::set_unix_permissions(&target, mode)
                    .map_err(|e| ArchiveError::Io { source: e, path: target.clone() })?;
            }
        }
    }
    Ok(())
}
