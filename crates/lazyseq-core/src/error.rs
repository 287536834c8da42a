//! Error types for lazyseq.

use std::fmt;

/// The main error type for lazyseq operations.
#[derive(Debug)]
pub enum Error {
    /// The query was configured without a usable data source
    Configuration(String),

    /// The source backing a built query could not be read at execution time
    SourceUnavailable(String),

    /// I/O error raised by a result sink
    Io(std::io::Error),
}

impl Error {
    /// Returns true for [`Error::Configuration`].
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }

    /// Returns true for [`Error::SourceUnavailable`].
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Error::SourceUnavailable(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            Error::SourceUnavailable(msg) => write!(f, "Source unavailable: {}", msg),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// A specialized `Result` type for lazyseq operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display() {
        let err = Error::Configuration("no data source".to_string());
        assert_eq!(err.to_string(), "Configuration error: no data source");

        let err = Error::SourceUnavailable("sequence dropped".to_string());
        assert_eq!(err.to_string(), "Source unavailable: sequence dropped");
    }

    #[test]
    fn test_kind_helpers() {
        assert!(Error::Configuration(String::new()).is_configuration());
        assert!(!Error::Configuration(String::new()).is_source_unavailable());
        assert!(Error::SourceUnavailable(String::new()).is_source_unavailable());
    }

    #[test]
    fn test_io_conversion_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.source().is_some());
    }
}
