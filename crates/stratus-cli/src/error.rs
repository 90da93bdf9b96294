use std::fmt;

/// Failure of a dispatched command, classified for exit handling in `main`.
pub enum RunError {
    /// No cloud credentials could be located.
    Credentials,
    /// The handler already printed its own diagnostic; exit silently.
    Reported,
    /// Anything else, reported through the standard error log line.
    Command(anyhow::Error),
}

impl fmt::Debug for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Credentials => write!(f, "Credentials"),
            RunError::Reported => write!(f, "Reported"),
            RunError::Command(e) => write!(f, "Command({e:?})"),
        }
    }
}

impl From<anyhow::Error> for RunError {
    fn from(err: anyhow::Error) -> Self {
        if err.downcast_ref::<ReportedError>().is_some() {
            return RunError::Reported;
        }
        match err.downcast_ref::<stratus_cloud::Error>() {
            Some(e) if e.is_credentials() => RunError::Credentials,
            _ => RunError::Command(err),
        }
    }
}

impl From<stratus_cloud::Error> for RunError {
    fn from(err: stratus_cloud::Error) -> Self {
        if err.is_credentials() {
            RunError::Credentials
        } else {
            RunError::Command(err.into())
        }
    }
}

/// Marker for errors a handler has already surfaced to the user itself.
#[derive(Debug)]
pub struct ReportedError;

impl fmt::Display for ReportedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("command failed")
    }
}

impl std::error::Error for ReportedError {}
