use serde::Serialize;

use std::fmt::{self, Display, Formatter};
use std::panic::Location;

/// Source position captured where an error was raised.
///
/// Every error enum in the workspace embeds one of these so a rendered
/// message always names the line that produced it. Construct with
/// [`ErrorLocation::caller`] inside a `#[track_caller]` chain; the capture
/// then points at the outermost caller rather than the helper that built
/// the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorLocation {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl ErrorLocation {
    /// Capture the caller's position.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }
}

impl From<&'static Location<'static>> for ErrorLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

/// Renders as `[file:line:column]`, the suffix every error message carries.
impl Display for ErrorLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}:{}]", self.file, self.line, self.column)
    }
}
