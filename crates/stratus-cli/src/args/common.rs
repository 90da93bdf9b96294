use std::path::PathBuf;

use clap::Args;

#[derive(Debug, Clone, Default, Args)]
pub struct RegionArg {
    #[arg(short = 'r', long, help = "Indicates which region to connect to")]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArg {
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Defines an alternative config file"
    )]
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct NowaitArg {
    #[arg(
        long,
        alias = "nw",
        help = "Do not wait for stack events after executing stack command"
    )]
    pub nowait: bool,
}
