mod aws_cli;

pub use aws_cli::AwsCli;

use std::path::{Path, PathBuf};

use stratus_types::{ClusterInstance, ClusterSummary, FailureLevel, ImageSummary};

use crate::error::Result;

/// Stack creation parameters, projected straight out of the parsed arguments.
#[derive(Debug, Clone)]
pub struct CreateStackRequest {
    pub stack_name: String,
    pub template_url: String,
    pub disable_rollback: bool,
    pub wait: bool,
    pub suppress_validators: bool,
    pub validation_failure_level: FailureLevel,
}

#[derive(Debug, Clone)]
pub struct UpdateStackRequest {
    pub stack_name: String,
    pub template_url: Option<String>,
    pub disable_rollback: bool,
    pub wait: bool,
    pub force: bool,
}

#[derive(Debug, Clone)]
pub struct BuildImageRequest {
    pub image_name: String,
    pub template_url: String,
}

/// Parameters of the image log export, forwarded verbatim to the provider.
#[derive(Debug, Clone)]
pub struct ExportLogsRequest {
    pub image_id: String,
    pub output: PathBuf,
    pub bucket: String,
    pub bucket_prefix: Option<String>,
    pub keep_s3_objects: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// The narrow seam in front of the cloud platform.
///
/// Everything hard lives on the far side of this trait: stack lifecycle and
/// rollback, resource dependency resolution, polling, eventual consistency.
/// Implementations own any waiting or retrying; callers issue one blocking
/// call per operation.
pub trait Orchestrator {
    fn create_stack(&self, req: &CreateStackRequest) -> Result<String>;
    fn update_stack(&self, req: &UpdateStackRequest) -> Result<String>;
    fn delete_stack(&self, stack_name: &str, keep_logs: bool, wait: bool) -> Result<()>;
    fn describe_stack(&self, stack_name: &str) -> Result<ClusterSummary>;
    /// Blocks until an in-progress stack reaches a terminal state, then
    /// returns the fresh summary. No-op for settled stacks.
    fn wait_stack_settled(&self, stack_name: &str) -> Result<ClusterSummary>;
    fn list_stacks(&self) -> Result<Vec<ClusterSummary>>;

    fn list_instances(&self, cluster_name: &str) -> Result<Vec<ClusterInstance>>;
    fn head_node(&self, cluster_name: &str) -> Result<ClusterInstance>;
    fn set_compute_fleet(&self, cluster_name: &str, running: bool) -> Result<()>;

    fn build_image(&self, req: &BuildImageRequest) -> Result<()>;
    fn delete_image(&self, image_name: &str, force: bool) -> Result<()>;
    fn describe_image(&self, image_name: &str) -> Result<ImageSummary>;
    fn list_images(&self) -> Result<Vec<ImageSummary>>;
    fn export_image_logs(&self, req: &ExportLogsRequest) -> Result<()>;

    fn dcv_session_url(
        &self,
        cluster_name: &str,
        ssh_user: &str,
        key_path: Option<&Path>,
    ) -> Result<String>;
}
