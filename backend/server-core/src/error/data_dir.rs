use common::ErrorLocation;

use std::io::Error as IoError;
use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum DataDirError {
    #[error("Data Directory Unavailable Error: {path}: {message} {location}")]
    Unavailable {
        path: PathBuf,
        message: String,
        location: ErrorLocation,
    },

    #[error("Seed Copy Error: {path}: {source} {location}")]
    SeedCopy {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: IoError,
    },

    #[error("Config Write Error: {path}: {source} {location}")]
    ConfigWrite {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: IoError,
    },
}
