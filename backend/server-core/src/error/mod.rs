pub mod binaries;
pub mod data_dir;
pub mod supervisor;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Binaries(#[from] binaries::BinariesError),

    #[error(transparent)]
    DataDir(#[from] data_dir::DataDirError),

    #[error(transparent)]
    Supervisor(#[from] supervisor::SupervisorError),
}
