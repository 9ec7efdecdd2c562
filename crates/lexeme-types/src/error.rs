use std::fmt;
use std::path::PathBuf;

/// Result type for lexeme-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types shared by every lexeme layer
#[derive(Debug)]
pub enum Error {
    /// No workbook could be resolved, or the explicit path does not exist
    FileNotFound(PathBuf),

    /// IO operation failed
    Io(std::io::Error),

    /// The workbook is not in a shape we can read
    Format(String),

    /// A single cell could not be read as the expected type
    MalformedCell {
        sheet: String,
        row: usize,
        column: usize,
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FileNotFound(path) => {
                if path.as_os_str().is_empty() {
                    write!(f, "file not found: no workbook matched in the search root")
                } else {
                    write!(f, "file not found: {}", path.display())
                }
            }
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Format(msg) => write!(f, "Format error: {}", msg),
            Error::MalformedCell {
                sheet,
                row,
                column,
                reason,
            } => write!(
                f,
                "Malformed cell in sheet '{}' at row {}, column {}: {}",
                sheet,
                row + 1,
                column + 1,
                reason
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::FileNotFound(_) | Error::Format(_) | Error::MalformedCell { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
