use anyhow::Result;

use crate::context::ExecutionContext;

pub fn run(ctx: &ExecutionContext, cluster_name: &str, keep_logs: bool, nowait: bool) -> Result<()> {
    let stack = ctx.cluster(cluster_name)?;
    stack.delete(keep_logs, !nowait)?;
    Ok(())
}
