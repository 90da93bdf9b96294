use clap::error::ErrorKind;
use clap::Parser;
use tracing::{debug, error, info};

use stratus_cli::args::Cli;
use stratus_cli::commands;
use stratus_cli::error::RunError;
use stratus_cli::logging;

fn main() {
    // Restore default SIGPIPE behavior so piping into `head` does not panic.
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                std::process::exit(0);
            }
            _ => {
                eprint!("{e}");
                std::process::exit(1);
            }
        },
    };

    let _guard = logging::init();

    ctrlc::set_handler(|| {
        info!("Exiting...");
        std::process::exit(1);
    })
    .ok();

    if let Some(region) = cli.command.region() {
        // Child processes (the platform CLI, ssh helpers) read the region
        // from the environment; publish it once before any of them spawn.
        // SAFETY: single-threaded at this point, no other thread is reading
        // the environment.
        unsafe {
            std::env::set_var("AWS_DEFAULT_REGION", region);
        }
    }

    match commands::run(cli) {
        Ok(()) => {}
        Err(RunError::Credentials) => {
            error!("Cloud credentials not found.");
            std::process::exit(1);
        }
        Err(RunError::Reported) => {
            std::process::exit(1);
        }
        Err(RunError::Command(e)) => {
            debug!("{e:?}");
            error!("{e}");
            std::process::exit(1);
        }
    }
}
