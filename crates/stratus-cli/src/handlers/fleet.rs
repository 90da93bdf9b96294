use anyhow::Result;

use crate::context::ExecutionContext;

pub fn start(ctx: &ExecutionContext, cluster_name: &str) -> Result<()> {
    ctx.cluster(cluster_name)?.start_compute_fleet()?;
    Ok(())
}

pub fn stop(ctx: &ExecutionContext, cluster_name: &str) -> Result<()> {
    ctx.cluster(cluster_name)?.stop_compute_fleet()?;
    Ok(())
}
