//! Creation and seeding of the mutable data directory.

use crate::SEED_SUBDIRS;
use crate::error::data_dir::DataDirError;

use common::ErrorLocation;

use std::fs::{canonicalize, copy, create_dir_all, read_dir};
use std::io::Error as IoError;
use std::path::{Path, PathBuf};

use log::{info, trace};

/// Ensure the data directory exists and return its absolute path.
///
/// # Errors
///
/// Returns [`DataDirError::Unavailable`] if the directory cannot be created
/// or the resulting path is not a directory.
#[track_caller]
pub fn ensure_data_dir(data_dir: &Path) -> Result<PathBuf, DataDirError> {
    create_dir_all(data_dir).map_err(|e| DataDirError::Unavailable {
        path: data_dir.to_path_buf(),
        message: format!("cannot create: {e}"),
        location: ErrorLocation::caller(),
    })?;

    let absolute = canonicalize(data_dir).map_err(|e| DataDirError::Unavailable {
        path: data_dir.to_path_buf(),
        message: format!("cannot resolve: {e}"),
        location: ErrorLocation::caller(),
    })?;

    if !absolute.is_dir() {
        return Err(DataDirError::Unavailable {
            path: absolute,
            message: String::from("not a directory"),
            location: ErrorLocation::caller(),
        });
    }

    Ok(absolute)
}

/// Copy the bundled seed subdirectories into a fresh data directory.
///
/// Each seed tree is copied at most once: a subdirectory that already exists
/// is left untouched. That presence check is what preserves database state
/// across restarts of the same data directory.
#[track_caller]
pub fn seed_data_dir(data_dir: &Path, template_dir: &Path) -> Result<(), DataDirError> {
    for seed in SEED_SUBDIRS {
        let destination = data_dir.join(seed);
        if destination.is_dir() {
            trace!("Seed subdirectory {seed} already present, leaving untouched");
            continue;
        }

        let source = template_dir.join(seed);
        copy_dir_recursive(&source, &destination).map_err(|e| DataDirError::SeedCopy {
            path: source.clone(),
            location: ErrorLocation::caller(),
            source: e,
        })?;

        info!("Seeded {} from {}", destination.display(), source.display());
    }

    Ok(())
}

fn copy_dir_recursive(source: &Path, destination: &Path) -> Result<(), IoError> {
    create_dir_all(destination)?;

    for entry in read_dir(source)? {
        let entry = entry?;
        let target = destination.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            copy(entry.path(), &target)?;
        }
    }

    Ok(())
}
