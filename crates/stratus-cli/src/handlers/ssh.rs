use anyhow::Result;

use stratus_cloud::SshCommand;

use crate::context::ExecutionContext;
use crate::error::ReportedError;

pub fn run(
    ctx: &ExecutionContext,
    cluster_name: &str,
    dryrun: bool,
    ssh_args: Vec<String>,
) -> Result<()> {
    let stack = ctx.cluster(cluster_name)?;
    let command = SshCommand::resolve(&stack, ssh_args)?;

    if dryrun {
        println!("{}", command.command_line());
        return Ok(());
    }

    // The remote shell's exit code becomes ours; ssh already printed any
    // diagnostics, so a failure here exits without another error line.
    let code = command.run()?;
    if code != 0 {
        return Err(ReportedError.into());
    }
    Ok(())
}
