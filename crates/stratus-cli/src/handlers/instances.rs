use anyhow::Result;

use crate::context::ExecutionContext;

pub fn run(ctx: &ExecutionContext, cluster_name: &str) -> Result<()> {
    let stack = ctx.cluster(cluster_name)?;
    for instance in stack.instances()? {
        println!("{:<12} {}", instance.role, instance.instance_id);
    }
    Ok(())
}
