pub mod config;
pub mod error;
pub mod ops;
pub mod provider;

pub use config::{CliConfigFile, CloudConfig};
pub use error::{Error, Result};
pub use ops::cluster::{ClusterStack, CreateOptions, UpdateOptions, list_clusters};
pub use ops::connect::{DcvConnection, SshCommand};
pub use ops::image::{ImageBuilder, list_images};
pub use ops::logs::{ExportImageLogs, ExportOptions};
pub use provider::{
    AwsCli, BuildImageRequest, CreateStackRequest, ExportLogsRequest, Orchestrator,
    UpdateStackRequest,
};
