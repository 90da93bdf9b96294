use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Per-invocation cloud settings, threaded by value through every operation.
///
/// Nothing in this layer reads process-global state: the CLI entrypoint
/// resolves the region once (flag, then config file) and hands it down here.
#[derive(Debug, Clone, Default)]
pub struct CloudConfig {
    pub region: Option<String>,
    pub config_file: Option<PathBuf>,
}

impl CloudConfig {
    pub fn new(region: Option<String>, config_file: Option<PathBuf>) -> Self {
        Self {
            region,
            config_file,
        }
    }
}

/// The `~/.stratus/config.toml` file written by `stratus configure`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfigFile {
    #[serde(default)]
    pub region: Option<String>,

    /// EC2 key pair used for head-node SSH access.
    #[serde(default)]
    pub key_name: Option<String>,

    /// Login user on the head node.
    #[serde(default)]
    pub ssh_user: Option<String>,

    /// Infrastructure template used when none is given on the command line.
    #[serde(default)]
    pub template_url: Option<String>,
}

impl CliConfigFile {
    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".stratus").join("config.toml"))
            .ok_or_else(|| Error::Config("could not determine home directory".to_string()))
    }

    /// Missing files load as defaults; `configure` has not run yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn ssh_user(&self) -> &str {
        self.ssh_user.as_deref().unwrap_or("ec2-user")
    }
}
