use std::path::Path;

use anyhow::Result;

use stratus_cloud::DcvConnection;

use crate::context::ExecutionContext;

pub fn connect(
    ctx: &ExecutionContext,
    cluster_name: &str,
    key_path: Option<&Path>,
    show_url: bool,
) -> Result<()> {
    let stack = ctx.cluster(cluster_name)?;
    let connection = DcvConnection::establish(&stack, key_path)?;

    if show_url {
        println!("{}", connection.url());
        return Ok(());
    }
    connection.open()?;
    Ok(())
}
