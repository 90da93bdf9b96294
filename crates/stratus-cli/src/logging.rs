use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

const LOG_FILE_NAME: &str = "stratus-cli.log";
const MAX_LOG_BYTES: u64 = 5 * 1024 * 1024;

fn log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".stratus").join(LOG_FILE_NAME))
}

/// Rolls the current log to a single `.1` backup once it crosses the size
/// cap. Done at startup only; a single run is not expected to produce
/// anywhere near the cap.
fn rotate_if_oversized(path: &PathBuf) {
    let Ok(meta) = std::fs::metadata(path) else {
        return;
    };
    if meta.len() >= MAX_LOG_BYTES {
        let mut backup = path.clone();
        backup.set_extension("log.1");
        let _ = std::fs::rename(path, backup);
    }
}

/// Installs the two sinks: terse info-level messages on stdout for the
/// user, and a debug-level file under `~/.stratus/` for troubleshooting.
///
/// The returned guard must stay alive for the whole run so buffered file
/// writes get flushed on exit. If the file sink cannot be set up the CLI
/// still runs with console output only.
pub fn init() -> Option<WorkerGuard> {
    let console = fmt::layer()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_level(false)
        .with_filter(LevelFilter::INFO);

    let file_sink = log_path().and_then(|path| {
        let dir = path.parent()?.to_path_buf();
        std::fs::create_dir_all(&dir).ok()?;
        rotate_if_oversized(&path);
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .ok()?;
        Some(tracing_appender::non_blocking(file))
    });

    match file_sink {
        Some((writer, guard)) => {
            let file = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_filter(LevelFilter::DEBUG);
            tracing_subscriber::registry().with(console).with(file).init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(console).init();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_log_is_left_alone() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        std::fs::write(&path, "short").unwrap();

        rotate_if_oversized(&path);
        assert!(path.exists());
        assert!(!dir.path().join("stratus-cli.log.1").exists());
    }

    #[test]
    fn oversized_log_is_rotated_to_backup() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(MAX_LOG_BYTES).unwrap();

        rotate_if_oversized(&path);
        assert!(!path.exists());
        assert!(dir.path().join("stratus-cli.log.1").exists());
    }
}
