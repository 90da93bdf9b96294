use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Severity threshold for pre-flight validators.
///
/// A validator outcome at or above the configured level aborts the operation,
/// so the ordering of the variants is part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FailureLevel {
    Info,
    Warning,
    Error,
}

impl FailureLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureLevel::Info => "INFO",
            FailureLevel::Warning => "WARNING",
            FailureLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for FailureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailureLevel {
    type Err = Error;

    // Member names match case-insensitively; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INFO" => Ok(FailureLevel::Info),
            "WARNING" => Ok(FailureLevel::Warning),
            "ERROR" => Ok(FailureLevel::Error),
            _ => Err(Error::InvalidValue(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        for input in ["error", "ERROR", "Error", "eRrOr"] {
            assert_eq!(input.parse::<FailureLevel>().unwrap(), FailureLevel::Error);
        }
        assert_eq!("info".parse::<FailureLevel>().unwrap(), FailureLevel::Info);
        assert_eq!(
            "Warning".parse::<FailureLevel>().unwrap(),
            FailureLevel::Warning
        );
    }

    #[test]
    fn rejects_unknown_members() {
        let err = "critical".parse::<FailureLevel>().unwrap_err();
        assert_eq!(err.to_string(), "invalid value 'critical'");
    }

    #[test]
    fn levels_are_ordered() {
        assert!(FailureLevel::Info < FailureLevel::Warning);
        assert!(FailureLevel::Warning < FailureLevel::Error);
    }
}
