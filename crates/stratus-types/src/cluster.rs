use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every cluster is backed by a stack named `stratus-<cluster_name>`.
pub const STACK_PREFIX: &str = "stratus-";

pub fn stack_name(cluster_name: &str) -> String {
    format!("{}{}", STACK_PREFIX, cluster_name)
}

/// Lifecycle status of the stack backing a cluster, as reported by the
/// orchestration engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterStatus {
    CreateInProgress,
    CreateComplete,
    CreateFailed,
    UpdateInProgress,
    UpdateComplete,
    UpdateRollbackComplete,
    DeleteInProgress,
    DeleteFailed,
    RollbackInProgress,
    RollbackComplete,
}

impl ClusterStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(
            self,
            ClusterStatus::CreateComplete | ClusterStatus::UpdateComplete
        )
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            ClusterStatus::CreateInProgress
                | ClusterStatus::UpdateInProgress
                | ClusterStatus::DeleteInProgress
                | ClusterStatus::RollbackInProgress
        )
    }
}

impl fmt::Display for ClusterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClusterStatus::CreateInProgress => "CREATE_IN_PROGRESS",
            ClusterStatus::CreateComplete => "CREATE_COMPLETE",
            ClusterStatus::CreateFailed => "CREATE_FAILED",
            ClusterStatus::UpdateInProgress => "UPDATE_IN_PROGRESS",
            ClusterStatus::UpdateComplete => "UPDATE_COMPLETE",
            ClusterStatus::UpdateRollbackComplete => "UPDATE_ROLLBACK_COMPLETE",
            ClusterStatus::DeleteInProgress => "DELETE_IN_PROGRESS",
            ClusterStatus::DeleteFailed => "DELETE_FAILED",
            ClusterStatus::RollbackInProgress => "ROLLBACK_IN_PROGRESS",
            ClusterStatus::RollbackComplete => "ROLLBACK_COMPLETE",
        };
        f.write_str(s)
    }
}

/// One row of `stratus list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub name: String,
    pub status: ClusterStatus,
    pub created_at: Option<DateTime<Utc>>,
}

/// Whether the worker pool is running, independent of the head node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComputeFleetStatus {
    Running,
    Stopped,
    StopRequested,
    StartRequested,
}

impl fmt::Display for ComputeFleetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComputeFleetStatus::Running => "RUNNING",
            ComputeFleetStatus::Stopped => "STOPPED",
            ComputeFleetStatus::StopRequested => "STOP_REQUESTED",
            ComputeFleetStatus::StartRequested => "START_REQUESTED",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum NodeRole {
    HeadNode,
    ComputeNode,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRole::HeadNode => f.write_str("HeadNode"),
            NodeRole::ComputeNode => f.write_str("ComputeNode"),
        }
    }
}

/// One row of `stratus instances`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterInstance {
    pub instance_id: String,
    pub role: NodeRole,
    pub instance_type: String,
    pub public_ip: Option<String>,
    pub private_ip: String,
    pub state: String,
}
