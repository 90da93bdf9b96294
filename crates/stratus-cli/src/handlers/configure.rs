use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::info;

use stratus_cloud::CliConfigFile;

use crate::context::ExecutionContext;

pub fn run(ctx: &ExecutionContext) -> Result<()> {
    let path = ctx.config_path()?;
    let current = ctx.config()?.clone();

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();

    let updated = CliConfigFile {
        region: prompt(&mut input, &mut out, "Cloud region", current.region)?,
        key_name: prompt(&mut input, &mut out, "EC2 key pair name", current.key_name)?,
        ssh_user: prompt(&mut input, &mut out, "SSH user", current.ssh_user)?,
        template_url: prompt(
            &mut input,
            &mut out,
            "Infrastructure template URL",
            current.template_url,
        )?,
    };

    updated.save_to(&path)?;
    info!("Configuration written to {}", path.display());
    Ok(())
}

/// Empty input keeps the current value.
fn prompt(
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
    current: Option<String>,
) -> Result<Option<String>> {
    match &current {
        Some(value) => write!(out, "{label} [{value}]: ")?,
        None => write!(out, "{label}: ")?,
    }
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.trim();

    if trimmed.is_empty() {
        Ok(current)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_answer_keeps_current_value() {
        let mut input = "\n".as_bytes();
        let mut out = Vec::new();
        let value = prompt(&mut input, &mut out, "Region", Some("us-east-1".into())).unwrap();
        assert_eq!(value.as_deref(), Some("us-east-1"));
        assert_eq!(String::from_utf8(out).unwrap(), "Region [us-east-1]: ");
    }

    #[test]
    fn answer_replaces_current_value() {
        let mut input = "eu-west-1\n".as_bytes();
        let mut out = Vec::new();
        let value = prompt(&mut input, &mut out, "Region", None).unwrap();
        assert_eq!(value.as_deref(), Some("eu-west-1"));
    }

    #[test]
    fn whitespace_only_answer_is_empty() {
        let mut input = "   \n".as_bytes();
        let mut out = Vec::new();
        let value = prompt(&mut input, &mut out, "SSH user", None).unwrap();
        assert_eq!(value, None);
    }
}
