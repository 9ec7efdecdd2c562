use std::fmt;

/// Result type for lexeme-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while formatting or parsing exports
#[derive(Debug)]
pub enum Error {
    /// JSON serialization failed
    Json(serde_json::Error),

    /// Summary text could not be parsed back into rows
    Summary(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::Summary(msg) => write!(f, "Invalid summary: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(err) => Some(err),
            Error::Summary(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Summary(err.to_string())
    }
}
