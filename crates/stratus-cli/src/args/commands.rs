use std::path::PathBuf;

use clap::Subcommand;

use stratus_types::FailureLevel;

use super::common::{ConfigArg, NowaitArg, RegionArg};
use super::enums::failure_level;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Creates a new cluster")]
    Create {
        #[arg(help = "Defines the name of the cluster; the stack will be named stratus-[cluster_name]")]
        cluster_name: String,

        #[arg(long, help = "Disable check for stratus updates")]
        disable_update_check: bool,

        #[arg(long, help = "Disable validators execution")]
        suppress_validators: bool,

        #[arg(
            long,
            value_parser = failure_level,
            default_value = "ERROR",
            help = "Min validation level that will cause the creation to fail"
        )]
        validation_failure_level: FailureLevel,

        #[command(flatten)]
        config: ConfigArg,

        #[command(flatten)]
        region: RegionArg,

        #[command(flatten)]
        nowait: NowaitArg,

        #[arg(long, alias = "nr", help = "Disables stack rollback on error")]
        norollback: bool,

        #[arg(
            short = 'u',
            long,
            help = "Specifies the URL for a custom infrastructure template"
        )]
        template_url: Option<String>,
    },

    #[command(about = "Updates a running cluster using the values in the config file")]
    Update {
        #[arg(help = "Names the cluster to update")]
        cluster_name: String,

        #[command(flatten)]
        config: ConfigArg,

        #[command(flatten)]
        region: RegionArg,

        #[command(flatten)]
        nowait: NowaitArg,

        #[arg(long, alias = "nr", help = "Disable stack rollback on error")]
        norollback: bool,

        #[arg(
            short = 'f',
            long,
            help = "Forces the update skipping security checks. Not recommended"
        )]
        force: bool,
    },

    #[command(about = "Deletes a cluster")]
    Delete {
        #[arg(help = "Names the cluster to delete")]
        cluster_name: String,

        #[arg(
            long,
            help = "Keep the cluster's log group data after deleting; log events still expire \
                    based on the configured retention time"
        )]
        keep_logs: bool,

        #[command(flatten)]
        region: RegionArg,

        #[command(flatten)]
        nowait: NowaitArg,
    },

    #[command(about = "Starts the compute fleet for a cluster that has been stopped")]
    Start {
        #[arg(help = "Starts the compute fleet of the cluster name provided here")]
        cluster_name: String,

        #[command(flatten)]
        region: RegionArg,
    },

    #[command(about = "Stops the compute fleet, leaving the head node running")]
    Stop {
        #[arg(help = "Stops the compute fleet of the cluster name provided here")]
        cluster_name: String,

        #[command(flatten)]
        region: RegionArg,
    },

    #[command(about = "Pulls the current status of the cluster")]
    Status {
        #[arg(help = "Shows the status of the cluster with the name provided here")]
        cluster_name: String,

        #[command(flatten)]
        region: RegionArg,

        #[command(flatten)]
        nowait: NowaitArg,
    },

    #[command(about = "Displays a list of stacks associated with stratus")]
    List {
        #[arg(long, help = "Display the cluster status in color")]
        color: bool,

        #[command(flatten)]
        region: RegionArg,
    },

    #[command(about = "Displays a list of all instances in a cluster")]
    Instances {
        #[arg(help = "Display the instances for the cluster with the name provided here")]
        cluster_name: String,

        #[command(flatten)]
        region: RegionArg,
    },

    #[command(
        about = "Connects to the head node instance using SSH",
        long_about = "Run ssh command with the cluster username and IP address pre-populated. \
                      Arbitrary arguments are appended to the end of the ssh command. \
                      Flags for stratus itself must come before the cluster name; every \
                      token after it is forwarded to ssh verbatim."
    )]
    Ssh {
        #[arg(help = "Name of the cluster to connect to")]
        cluster_name: String,

        #[arg(short = 'd', long, help = "Prints command and exits")]
        dryrun: bool,

        #[command(flatten)]
        region: RegionArg,

        // The one subcommand allowed to receive unrecognized trailing tokens;
        // they are appended verbatim to the generated ssh command.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        ssh_args: Vec<String>,
    },

    #[command(about = "Creates a custom machine image to use with stratus")]
    BuildImage {
        #[arg(
            short = 'n',
            long = "name",
            required = true,
            help = "Specifies the image name to use for the build"
        )]
        image_name: String,

        #[command(flatten)]
        config: ConfigArg,

        #[command(flatten)]
        region: RegionArg,
    },

    #[command(about = "Deletes an image and the related image builder stack")]
    DeleteImage {
        #[arg(short = 'n', long = "name", required = true, help = "Name of the image to delete")]
        image_name: String,

        #[arg(
            short = 'f',
            long,
            help = "Force image deletion even if the image is shared or in use"
        )]
        force: bool,

        #[command(flatten)]
        region: RegionArg,
    },

    #[command(about = "Describes the specified stratus image")]
    DescribeImage {
        #[arg(short = 'n', long = "name", required = true, help = "Name of the image to describe")]
        image_name: String,

        #[command(flatten)]
        region: RegionArg,
    },

    #[command(about = "Displays the list of images built by stratus with status and version")]
    ListImages {
        #[arg(long, help = "Display the image status in color")]
        color: bool,

        #[command(flatten)]
        region: RegionArg,
    },

    #[command(about = "Start the stratus configuration")]
    Configure {
        #[command(flatten)]
        config: ConfigArg,

        #[command(flatten)]
        region: RegionArg,
    },

    #[command(about = "Displays the version of stratus")]
    Version,

    #[command(
        about = "Remote-desktop (DCV) related features",
        after_help = "For dcv subcommand specific flags, please run: \"stratus dcv [subcommand] --help\""
    )]
    Dcv {
        #[command(subcommand)]
        command: DcvCommand,
    },

    #[command(
        about = "Export the logs of the image builder stack to a local tar.gz archive by \
                 passing through an S3 bucket"
    )]
    ExportImageLogs {
        #[arg(help = "Export the logs related to the image id provided here")]
        image_id: String,

        #[arg(
            long,
            required = true,
            help = "S3 bucket to export image builder logs data to; it must be in the same \
                    region as the image"
        )]
        bucket: String,

        #[arg(long, help = "Keys prefix to use in the bucket")]
        bucket_prefix: Option<String>,

        #[arg(long, help = "Keep the exported objects in the bucket after archiving")]
        keep_s3_objects: bool,

        #[arg(long, help = "Start of the log time range, RFC 3339")]
        start_time: Option<String>,

        #[arg(long, help = "End of the log time range, RFC 3339")]
        end_time: Option<String>,

        #[arg(short = 'o', long, help = "File path to save the log archive to")]
        output: Option<PathBuf>,

        #[command(flatten)]
        region: RegionArg,
    },
}

#[derive(Subcommand)]
pub enum DcvCommand {
    #[command(about = "Connects to the head node through an interactive DCV session")]
    Connect {
        #[arg(help = "Name of the cluster to connect to")]
        cluster_name: String,

        #[arg(
            short = 'k',
            long,
            help = "Key path of the SSH key to use for the connection"
        )]
        key_path: Option<PathBuf>,

        #[arg(short = 's', long, help = "Print URL and exit")]
        show_url: bool,

        #[command(flatten)]
        region: RegionArg,
    },
}

impl Commands {
    /// Region flag of the selected subcommand, published to the environment
    /// before dispatch so child processes observe the same region.
    pub fn region(&self) -> Option<&str> {
        let region = match self {
            Commands::Create { region, .. }
            | Commands::Update { region, .. }
            | Commands::Delete { region, .. }
            | Commands::Start { region, .. }
            | Commands::Stop { region, .. }
            | Commands::Status { region, .. }
            | Commands::List { region, .. }
            | Commands::Instances { region, .. }
            | Commands::Ssh { region, .. }
            | Commands::BuildImage { region, .. }
            | Commands::DeleteImage { region, .. }
            | Commands::DescribeImage { region, .. }
            | Commands::ListImages { region, .. }
            | Commands::Configure { region, .. }
            | Commands::ExportImageLogs { region, .. } => region,
            Commands::Dcv {
                command: DcvCommand::Connect { region, .. },
            } => region,
            Commands::Version => return None,
        };
        region.region.as_deref()
    }
}
