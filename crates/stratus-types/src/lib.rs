mod cluster;
mod error;
mod failure_level;
mod image;

pub use cluster::{
    ClusterInstance, ClusterStatus, ClusterSummary, ComputeFleetStatus, NodeRole, STACK_PREFIX,
    stack_name,
};
pub use error::{Error, Result};
pub use failure_level::FailureLevel;
pub use image::{ImageStatus, ImageSummary};
