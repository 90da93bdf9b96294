use anyhow::Result;

use stratus_cloud::list_clusters;

use crate::context::ExecutionContext;
use crate::output::{color_enabled, paint_cluster_status};

pub fn run(ctx: &ExecutionContext, color: bool) -> Result<()> {
    let color = color_enabled(color);
    for cluster in list_clusters(ctx.orchestrator()?)? {
        println!(
            "{:<24} {}",
            cluster.name,
            paint_cluster_status(cluster.status, color)
        );
    }
    Ok(())
}
