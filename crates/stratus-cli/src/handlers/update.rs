use anyhow::Result;

use stratus_cloud::UpdateOptions;

use crate::context::ExecutionContext;

pub struct UpdateArgs {
    pub cluster_name: String,
    pub norollback: bool,
    pub nowait: bool,
    pub force: bool,
}

pub fn run(ctx: &ExecutionContext, args: UpdateArgs) -> Result<()> {
    let stack = ctx.cluster(&args.cluster_name)?;
    stack.update(UpdateOptions {
        template_url: ctx.config()?.template_url.clone(),
        disable_rollback: args.norollback,
        wait: !args.nowait,
        force: args.force,
    })?;
    Ok(())
}
