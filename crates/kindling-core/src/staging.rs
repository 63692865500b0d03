//! Staging area management and deployment into the target directory
//!
//! The skeleton is always built in a fresh staging directory below the
//! target, then moved into place in one pass. Disk writes never happen
//! while questions are still being answered, so a failed interview leaves
//! the target untouched.

use crate::error::{Error, Result};
use std::path::Path;
use tokio::fs;

/// Create a fresh staging directory, removing leftovers from an aborted run
pub async fn prepare(staging: &Path) -> Result<()> {
    if fs::metadata(staging).await.is_ok() {
        fs::remove_dir_all(staging).await.map_err(|err| {
            Error::Resource(format!(
                "cannot remove previous staging directory \"{}\": {}",
                staging.display(),
                err
            ))
        })?;
    }
    fs::create_dir(staging).await.map_err(|err| {
        Error::Resource(format!(
            "cannot create staging directory \"{}\": {}",
            staging.display(),
            err
        ))
    })
}

/// Move every top-level staged entry into the target directory and remove
/// the then-empty staging directory
pub async fn deploy(staging: &Path, target: &Path) -> Result<()> {
    let mut entries = fs::read_dir(staging).await.map_err(|err| {
        Error::Resource(format!(
            "cannot read staging directory \"{}\": {}",
            staging.display(),
            err
        ))
    })?;
    while let Some(entry) = entries.next_entry().await? {
        let destination = target.join(entry.file_name());
        fs::rename(entry.path(), &destination).await.map_err(|err| {
            Error::Resource(format!(
                "could not move \"{}\" to \"{}\": {}",
                entry.path().display(),
                destination.display(),
                err
            ))
        })?;
    }
    fs::remove_dir(staging).await.map_err(|err| {
        Error::Resource(format!(
            "could not remove staging directory \"{}\": {}",
            staging.display(),
            err
        ))
    })
}

/// Best-effort removal of a leftover staging directory
///
/// Called after the run regardless of outcome; when the run itself failed,
/// the caller reports this failure without letting it mask the run error.
pub async fn cleanup(staging: &Path) -> Result<()> {
    if fs::metadata(staging).await.is_err() {
        return Ok(());
    }
    fs::remove_dir_all(staging).await.map_err(|err| {
        Error::Cleanup(format!(
            "could not remove staging directory \"{}\": {}",
            staging.display(),
            err
        ))
    })
}
