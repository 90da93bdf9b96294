use tracing::{debug, info};

use stratus_types::{
    ClusterInstance, ClusterSummary, ComputeFleetStatus, FailureLevel, stack_name,
};

use crate::config::CliConfigFile;
use crate::error::{Error, Result};
use crate::provider::{CreateStackRequest, Orchestrator, UpdateStackRequest};

/// Creation parameters projected out of the parsed arguments; all decision
/// logic about them lives behind the orchestrator.
#[derive(Debug, Clone)]
pub struct CreateOptions {
    pub template_url: Option<String>,
    pub disable_rollback: bool,
    pub wait: bool,
    pub suppress_validators: bool,
    pub validation_failure_level: FailureLevel,
    pub disable_update_check: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateOptions {
    pub template_url: Option<String>,
    pub disable_rollback: bool,
    pub wait: bool,
    pub force: bool,
}

/// Model object for the stack backing one cluster.
pub struct ClusterStack<'a> {
    orchestrator: &'a dyn Orchestrator,
    cluster_name: String,
    config_file: CliConfigFile,
}

impl<'a> ClusterStack<'a> {
    pub fn new(
        orchestrator: &'a dyn Orchestrator,
        cluster_name: impl Into<String>,
        config_file: CliConfigFile,
    ) -> Self {
        Self {
            orchestrator,
            cluster_name: cluster_name.into(),
            config_file,
        }
    }

    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    fn template_url(&self, explicit: Option<String>) -> Result<String> {
        explicit
            .or_else(|| self.config_file.template_url.clone())
            .ok_or_else(|| {
                Error::Config(
                    "no infrastructure template configured, pass --template-url or run \
                     'stratus configure'"
                        .to_string(),
                )
            })
    }

    pub fn create(&self, opts: CreateOptions) -> Result<()> {
        if opts.disable_update_check {
            debug!("update check disabled for this invocation");
        }

        info!("Beginning cluster creation for cluster: {}", self.cluster_name);
        let stack_id = self.orchestrator.create_stack(&CreateStackRequest {
            stack_name: stack_name(&self.cluster_name),
            template_url: self.template_url(opts.template_url)?,
            disable_rollback: opts.disable_rollback,
            wait: opts.wait,
            suppress_validators: opts.suppress_validators,
            validation_failure_level: opts.validation_failure_level,
        })?;
        debug!("stack id: {}", stack_id);

        let summary = self.status()?;
        info!("Status: {}", summary.status);
        Ok(())
    }

    pub fn update(&self, opts: UpdateOptions) -> Result<()> {
        info!("Updating cluster: {}", self.cluster_name);
        let stack_id = self.orchestrator.update_stack(&UpdateStackRequest {
            stack_name: stack_name(&self.cluster_name),
            template_url: opts.template_url,
            disable_rollback: opts.disable_rollback,
            wait: opts.wait,
            force: opts.force,
        })?;
        debug!("stack id: {}", stack_id);

        let summary = self.status()?;
        info!("Status: {}", summary.status);
        Ok(())
    }

    pub fn delete(&self, keep_logs: bool, wait: bool) -> Result<()> {
        info!("Deleting cluster: {}", self.cluster_name);
        self.orchestrator
            .delete_stack(&stack_name(&self.cluster_name), keep_logs, wait)?;
        info!("Cluster {} deleted", self.cluster_name);
        Ok(())
    }

    pub fn status(&self) -> Result<ClusterSummary> {
        self.orchestrator.describe_stack(&stack_name(&self.cluster_name))
    }

    /// Follows an in-flight stack operation to its terminal state.
    pub fn wait_settled(&self) -> Result<ClusterSummary> {
        self.orchestrator
            .wait_stack_settled(&stack_name(&self.cluster_name))
    }

    pub fn instances(&self) -> Result<Vec<ClusterInstance>> {
        self.orchestrator.list_instances(&self.cluster_name)
    }

    pub fn head_node(&self) -> Result<ClusterInstance> {
        self.orchestrator.head_node(&self.cluster_name)
    }

    pub fn start_compute_fleet(&self) -> Result<()> {
        info!("Starting compute fleet: {}", self.cluster_name);
        self.orchestrator
            .set_compute_fleet(&self.cluster_name, true)?;
        info!("Compute fleet status: {}", ComputeFleetStatus::StartRequested);
        Ok(())
    }

    pub fn stop_compute_fleet(&self) -> Result<()> {
        info!("Stopping compute fleet: {}", self.cluster_name);
        self.orchestrator
            .set_compute_fleet(&self.cluster_name, false)?;
        info!("Compute fleet status: {}", ComputeFleetStatus::StopRequested);
        Ok(())
    }

    pub fn ssh_user(&self) -> &str {
        self.config_file.ssh_user()
    }

    pub fn dcv_session_url(&self, key_path: Option<&std::path::Path>) -> Result<String> {
        self.orchestrator
            .dcv_session_url(&self.cluster_name, self.ssh_user(), key_path)
    }
}

/// Every stack carrying the stratus prefix, across the whole region.
pub fn list_clusters(orchestrator: &dyn Orchestrator) -> Result<Vec<ClusterSummary>> {
    orchestrator.list_stacks()
}
