use crate::args::{Cli, Commands, DcvCommand};
use crate::context::ExecutionContext;
use crate::error::RunError;
use crate::handlers;
use crate::handlers::create::CreateArgs;
use crate::handlers::export_image_logs::ExportArgs;
use crate::handlers::update::UpdateArgs;

/// Routes a parsed invocation to its handler.
pub fn run(cli: Cli) -> Result<(), RunError> {
    let result = match cli.command {
        Commands::Create {
            cluster_name,
            disable_update_check,
            suppress_validators,
            validation_failure_level,
            config,
            region,
            nowait,
            norollback,
            template_url,
        } => {
            let ctx = ExecutionContext::new(region.region, config.config_file);
            handlers::create::run(
                &ctx,
                CreateArgs {
                    cluster_name,
                    template_url,
                    norollback,
                    nowait: nowait.nowait,
                    suppress_validators,
                    validation_failure_level,
                    disable_update_check,
                },
            )
        }
        Commands::Update {
            cluster_name,
            config,
            region,
            nowait,
            norollback,
            force,
        } => {
            let ctx = ExecutionContext::new(region.region, config.config_file);
            handlers::update::run(
                &ctx,
                UpdateArgs {
                    cluster_name,
                    norollback,
                    nowait: nowait.nowait,
                    force,
                },
            )
        }
        Commands::Delete {
            cluster_name,
            keep_logs,
            region,
            nowait,
        } => {
            let ctx = ExecutionContext::new(region.region, None);
            handlers::delete::run(&ctx, &cluster_name, keep_logs, nowait.nowait)
        }
        Commands::Start {
            cluster_name,
            region,
        } => {
            let ctx = ExecutionContext::new(region.region, None);
            handlers::fleet::start(&ctx, &cluster_name)
        }
        Commands::Stop {
            cluster_name,
            region,
        } => {
            let ctx = ExecutionContext::new(region.region, None);
            handlers::fleet::stop(&ctx, &cluster_name)
        }
        Commands::Status {
            cluster_name,
            region,
            nowait,
        } => {
            let ctx = ExecutionContext::new(region.region, None);
            handlers::status::run(&ctx, &cluster_name, nowait.nowait)
        }
        Commands::List { color, region } => {
            let ctx = ExecutionContext::new(region.region, None);
            handlers::list::run(&ctx, color)
        }
        Commands::Instances {
            cluster_name,
            region,
        } => {
            let ctx = ExecutionContext::new(region.region, None);
            handlers::instances::run(&ctx, &cluster_name)
        }
        Commands::Ssh {
            cluster_name,
            dryrun,
            region,
            ssh_args,
        } => {
            let ctx = ExecutionContext::new(region.region, None);
            handlers::ssh::run(&ctx, &cluster_name, dryrun, ssh_args)
        }
        Commands::BuildImage {
            image_name,
            config,
            region,
        } => {
            let ctx = ExecutionContext::new(region.region, config.config_file);
            handlers::image::build(&ctx, &image_name)
        }
        Commands::DeleteImage {
            image_name,
            force,
            region,
        } => {
            let ctx = ExecutionContext::new(region.region, None);
            handlers::image::delete(&ctx, &image_name, force)
        }
        Commands::DescribeImage { image_name, region } => {
            let ctx = ExecutionContext::new(region.region, None);
            handlers::image::describe(&ctx, &image_name)
        }
        Commands::ListImages { color, region } => {
            let ctx = ExecutionContext::new(region.region, None);
            handlers::image::list(&ctx, color)
        }
        Commands::Configure { config, region } => {
            let ctx = ExecutionContext::new(region.region, config.config_file);
            handlers::configure::run(&ctx)
        }
        Commands::Version => {
            handlers::version::run();
            Ok(())
        }
        Commands::Dcv {
            command:
                DcvCommand::Connect {
                    cluster_name,
                    key_path,
                    show_url,
                    region,
                },
        } => {
            let ctx = ExecutionContext::new(region.region, None);
            handlers::dcv::connect(&ctx, &cluster_name, key_path.as_deref(), show_url)
        }
        Commands::ExportImageLogs {
            image_id,
            bucket,
            bucket_prefix,
            keep_s3_objects,
            start_time,
            end_time,
            output,
            region,
        } => {
            let ctx = ExecutionContext::new(region.region, None);
            handlers::export_image_logs::run(
                &ctx,
                ExportArgs {
                    image_id,
                    bucket,
                    bucket_prefix,
                    keep_s3_objects,
                    start_time,
                    end_time,
                    output,
                },
            )
        }
    };

    result.map_err(RunError::from)
}
