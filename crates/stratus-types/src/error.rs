use std::fmt;

/// Result type for stratus-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// A string failed to parse into a domain enum
    InvalidValue(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidValue(msg) => write!(f, "invalid value '{}'", msg),
        }
    }
}

impl std::error::Error for Error {}
