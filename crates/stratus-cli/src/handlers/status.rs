use anyhow::Result;
use tracing::info;

use crate::context::ExecutionContext;

pub fn run(ctx: &ExecutionContext, cluster_name: &str, nowait: bool) -> Result<()> {
    let stack = ctx.cluster(cluster_name)?;
    let mut summary = stack.status()?;
    info!("Status: {}", summary.status);

    if !nowait && summary.status.is_in_progress() {
        summary = stack.wait_settled()?;
        info!("Status: {}", summary.status);
    }
    Ok(())
}
