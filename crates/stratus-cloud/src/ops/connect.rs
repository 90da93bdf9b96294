use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};
use crate::ops::cluster::ClusterStack;

/// A pre-populated `ssh user@ip` invocation for a cluster's head node.
/// Passthrough arguments land verbatim after the destination.
pub struct SshCommand {
    user: String,
    host: String,
    extra_args: Vec<String>,
}

impl SshCommand {
    pub fn resolve(stack: &ClusterStack<'_>, extra_args: Vec<String>) -> Result<Self> {
        let head = stack.head_node()?;
        let host = head
            .public_ip
            .or(Some(head.private_ip))
            .filter(|ip| !ip.is_empty())
            .ok_or_else(|| Error::InvalidOperation("head node has no reachable IP".to_string()))?;

        Ok(Self {
            user: stack.ssh_user().to_string(),
            host,
            extra_args,
        })
    }

    /// The shell-style rendering used by `--dryrun`.
    pub fn command_line(&self) -> String {
        let mut line = format!("ssh {}@{}", self.user, self.host);
        for arg in &self.extra_args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    pub fn run(&self) -> Result<i32> {
        debug!("running: {}", self.command_line());
        let status = Command::new("ssh")
            .arg(format!("{}@{}", self.user, self.host))
            .args(&self.extra_args)
            .status()?;
        Ok(status.code().unwrap_or(1))
    }
}

/// Remote-desktop session helper for the head node.
pub struct DcvConnection {
    url: String,
}

impl DcvConnection {
    pub fn establish(stack: &ClusterStack<'_>, key_path: Option<&Path>) -> Result<Self> {
        let url = stack.dcv_session_url(key_path)?;
        Ok(Self { url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Hands the session URL to the desktop's URL opener.
    pub fn open(&self) -> Result<()> {
        #[cfg(target_os = "macos")]
        let opener = "open";
        #[cfg(not(target_os = "macos"))]
        let opener = "xdg-open";

        let status = Command::new(opener).arg(&self.url).status()?;
        if !status.success() {
            return Err(Error::InvalidOperation(format!(
                "could not open {}",
                self.url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_appends_passthrough_args() {
        let cmd = SshCommand {
            user: "ec2-user".to_string(),
            host: "1.1.1.1".to_string(),
            extra_args: vec!["-i".to_string(), "~/.ssh/id_rsa".to_string()],
        };
        assert_eq!(cmd.command_line(), "ssh ec2-user@1.1.1.1 -i ~/.ssh/id_rsa");
    }

    #[test]
    fn command_line_without_extras() {
        let cmd = SshCommand {
            user: "ubuntu".to_string(),
            host: "10.0.0.4".to_string(),
            extra_args: vec![],
        };
        assert_eq!(cmd.command_line(), "ssh ubuntu@10.0.0.4");
    }
}
