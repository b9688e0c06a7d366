use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum BinariesError {
    #[error("Missing Binary Error: {path} {location}")]
    MissingBinary {
        path: PathBuf,
        location: ErrorLocation,
    },

    #[error("Resolution Error: {message} {location}")]
    Resolution {
        message: String,
        location: ErrorLocation,
    },
}
