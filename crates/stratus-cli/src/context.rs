use std::path::PathBuf;

use anyhow::Result;
use once_cell::unsync::OnceCell;

use stratus_cloud::{AwsCli, CliConfigFile, CloudConfig, ClusterStack, ImageBuilder};

/// Per-invocation state shared by every handler.
///
/// The region and config-file path come from the parsed arguments; the
/// orchestrator and the loaded config file are built lazily the first time
/// a handler asks for them.
pub struct ExecutionContext {
    region_flag: Option<String>,
    config_flag: Option<PathBuf>,
    config: OnceCell<CliConfigFile>,
    orchestrator: OnceCell<AwsCli>,
}

impl ExecutionContext {
    pub fn new(region_flag: Option<String>, config_flag: Option<PathBuf>) -> Self {
        Self {
            region_flag,
            config_flag,
            config: OnceCell::new(),
            orchestrator: OnceCell::new(),
        }
    }

    /// Path the config file is read from, flag first then the default.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config_flag {
            Some(path) => Ok(path.clone()),
            None => Ok(CliConfigFile::default_path()?),
        }
    }

    pub fn config(&self) -> Result<&CliConfigFile> {
        self.config.get_or_try_init(|| {
            let path = self.config_path()?;
            Ok(CliConfigFile::load_from(&path)?)
        })
    }

    /// Region used for every cloud call: flag wins over the config file.
    pub fn region(&self) -> Result<Option<String>> {
        if let Some(region) = &self.region_flag {
            return Ok(Some(region.clone()));
        }
        Ok(self.config()?.region.clone())
    }

    pub fn orchestrator(&self) -> Result<&AwsCli> {
        self.orchestrator.get_or_try_init(|| {
            let region = self.region()?;
            Ok(AwsCli::new(CloudConfig::new(region, self.config_flag.clone())))
        })
    }

    pub fn cluster(&self, cluster_name: &str) -> Result<ClusterStack<'_>> {
        Ok(ClusterStack::new(
            self.orchestrator()?,
            cluster_name,
            self.config()?.clone(),
        ))
    }

    pub fn image(&self, image_name: &str) -> Result<ImageBuilder<'_>> {
        Ok(ImageBuilder::new(self.orchestrator()?, image_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_flag_wins_over_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "region = \"us-west-2\"\n").unwrap();

        let ctx = ExecutionContext::new(Some("eu-central-1".to_string()), Some(path));
        assert_eq!(ctx.region().unwrap().as_deref(), Some("eu-central-1"));
    }

    #[test]
    fn region_falls_back_to_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "region = \"us-west-2\"\n").unwrap();

        let ctx = ExecutionContext::new(None, Some(path));
        assert_eq!(ctx.region().unwrap().as_deref(), Some("us-west-2"));
    }

    #[test]
    fn missing_config_file_means_no_region() {
        let dir = tempfile::TempDir::new().unwrap();
        let ctx = ExecutionContext::new(None, Some(dir.path().join("absent.toml")));
        assert_eq!(ctx.region().unwrap(), None);
    }
}
