use anyhow::Result;

use stratus_cloud::CreateOptions;

use crate::context::ExecutionContext;

pub struct CreateArgs {
    pub cluster_name: String,
    pub template_url: Option<String>,
    pub norollback: bool,
    pub nowait: bool,
    pub suppress_validators: bool,
    pub validation_failure_level: stratus_types::FailureLevel,
    pub disable_update_check: bool,
}

pub fn run(ctx: &ExecutionContext, args: CreateArgs) -> Result<()> {
    let stack = ctx.cluster(&args.cluster_name)?;
    stack.create(CreateOptions {
        template_url: args.template_url,
        disable_rollback: args.norollback,
        wait: !args.nowait,
        suppress_validators: args.suppress_validators,
        validation_failure_level: args.validation_failure_level,
        disable_update_check: args.disable_update_check,
    })?;
    Ok(())
}
