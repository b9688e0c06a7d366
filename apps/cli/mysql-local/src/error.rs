use common::ErrorLocation;

use thiserror::Error;

/// Errors surfaced by the CLI wrapper.
///
/// Core errors are flattened to strings for display, but location tracking
/// is kept so a failure still points at its source line.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error from this app's own wiring (logging, directories, output)
    #[error("Cli Error: {message} {location}")]
    Cli {
        message: String,
        location: ErrorLocation,
    },

    /// Error from server-core operations (resolution, start)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },
}
