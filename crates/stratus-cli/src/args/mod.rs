// NOTE: Command organization
//
// One flat namespace mirroring the operator's mental model (create, update,
// delete, ssh, ...), with a single nested namespace for remote-desktop
// features (`dcv connect`). Shared flags (--region, --config, --nowait) are
// clap Args structs flattened into each subcommand rather than globals, so
// every operation states exactly what it accepts.

mod commands;
mod common;
mod enums;

pub use commands::*;
pub use common::*;
pub use enums::*;

use clap::Parser;

#[derive(Parser)]
#[command(name = "stratus")]
#[command(
    about = "stratus permits launching and management of HPC clusters in the cloud",
    long_about = None
)]
#[command(
    after_help = "For command specific flags, please run: \"stratus [command] --help\""
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}
