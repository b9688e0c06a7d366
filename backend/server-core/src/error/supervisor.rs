use crate::error::data_dir::DataDirError;

use common::ErrorLocation;

use models::ModelError;

use std::error::Error as StdError;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SupervisorError {
    #[error("Spawn Error: {message} {location}")]
    Spawn {
        message: String,
        location: ErrorLocation,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Start Timeout Error: {message} {location}")]
    StartTimeout {
        message: String,
        location: ErrorLocation,
    },

    #[error("Port In Use Error: port {port} already has a listener {location}")]
    PortInUse { port: u16, location: ErrorLocation },

    #[error("Already Running Error: {message} {location}")]
    AlreadyRunning {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    DataDir(#[from] DataDirError),

    #[error(transparent)]
    Validation(#[from] ModelError),
}
