use stratus_types::FailureLevel;

/// Value parser for `--validation-failure-level`. Member names match
/// case-insensitively; anything else is an invalid-value error reported by
/// the parser before any handler runs.
pub fn failure_level(s: &str) -> Result<FailureLevel, String> {
    s.parse::<FailureLevel>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_any_casing_of_member_names() {
        assert_eq!(failure_level("error"), Ok(FailureLevel::Error));
        assert_eq!(failure_level("ERROR"), Ok(FailureLevel::Error));
        assert_eq!(failure_level("Error"), Ok(FailureLevel::Error));
        assert_eq!(failure_level("warning"), Ok(FailureLevel::Warning));
        assert_eq!(failure_level("INFO"), Ok(FailureLevel::Info));
    }

    #[test]
    fn rejects_non_members() {
        let err = failure_level("fatal").unwrap_err();
        assert_eq!(err, "invalid value 'fatal'");
    }
}
