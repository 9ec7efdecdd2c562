use std::fmt;

/// Result type for lexeme-sheets operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while locating and reading workbooks
#[derive(Debug)]
pub enum Error {
    /// Shared model error (file not found, malformed cell, IO)
    Types(lexeme_types::Error),

    /// The workbook container could not be opened
    Zip(zip::result::ZipError),

    /// A workbook part is not well-formed XML
    Xml(quick_xml::Error),

    /// A required workbook part is absent from the archive
    MissingPart(String),

    /// A sheet or file name pattern failed to compile
    Pattern(regex::Error),

    /// Walkdir error
    WalkDir(walkdir::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Types(err) => write!(f, "{}", err),
            Error::Zip(err) => write!(f, "Workbook archive error: {}", err),
            Error::Xml(err) => write!(f, "Workbook XML error: {}", err),
            Error::MissingPart(part) => write!(f, "Workbook part missing: {}", part),
            Error::Pattern(err) => write!(f, "Invalid pattern: {}", err),
            Error::WalkDir(err) => write!(f, "Directory traversal error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Types(err) => Some(err),
            Error::Zip(err) => Some(err),
            Error::Xml(err) => Some(err),
            Error::Pattern(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::MissingPart(_) => None,
        }
    }
}

impl From<lexeme_types::Error> for Error {
    fn from(err: lexeme_types::Error) -> Self {
        Error::Types(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Types(lexeme_types::Error::Io(err))
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Zip(err)
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err)
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(quick_xml::Error::InvalidAttr(err))
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Pattern(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err)
    }
}

impl Error {
    /// True when the underlying cause is a missing workbook file.
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, Error::Types(lexeme_types::Error::FileNotFound(_)))
    }
}
