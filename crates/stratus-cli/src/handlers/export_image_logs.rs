use std::path::PathBuf;

use anyhow::Result;

use stratus_cloud::{ExportImageLogs, ExportOptions};

use crate::context::ExecutionContext;
use crate::error::ReportedError;

pub struct ExportArgs {
    pub image_id: String,
    pub bucket: String,
    pub bucket_prefix: Option<String>,
    pub keep_s3_objects: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub output: Option<PathBuf>,
}

/// Any failure past argument parsing is reported with a single prefixed
/// message on stderr instead of the generic error line.
pub fn run(ctx: &ExecutionContext, args: ExportArgs) -> Result<()> {
    let builder = ctx.image(&args.image_id)?;
    let export = ExportImageLogs::new(&builder, args.image_id.as_str());

    let result = export.execute(ExportOptions {
        output: args.output,
        bucket: args.bucket,
        bucket_prefix: args.bucket_prefix,
        keep_s3_objects: args.keep_s3_objects,
        start_time: args.start_time,
        end_time: args.end_time,
    });

    if let Err(e) = result {
        eprintln!("Unable to export image's logs.\n{}", e);
        return Err(ReportedError.into());
    }
    Ok(())
}
