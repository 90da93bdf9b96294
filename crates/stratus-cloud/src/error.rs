use std::fmt;

/// Result type for stratus-cloud operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the cloud-facing layer
#[derive(Debug)]
pub enum Error {
    /// No cloud credentials available to the provider CLI
    Credentials,

    /// The provider CLI ran but reported a failure
    Provider(String),

    /// The provider CLI could not be spawned or produced unreadable output
    Io(std::io::Error),

    /// Provider response did not have the expected shape
    Response(String),

    /// Configuration error (missing file, bad TOML, missing field)
    Config(String),

    /// The named cluster or image does not exist
    NotFound(String),

    /// Invalid operation for the current resource state
    InvalidOperation(String),
}

impl Error {
    pub fn is_credentials(&self) -> bool {
        matches!(self, Error::Credentials)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Credentials => write!(f, "Cloud credentials not found."),
            Error::Provider(msg) => write!(f, "Provider error: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Response(msg) => write!(f, "Unexpected provider response: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Response(err.to_string())
    }
}
