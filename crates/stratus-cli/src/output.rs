use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::io::stdout;

use stratus_types::{ClusterStatus, ImageStatus};

/// Whether `--color` should actually emit escape codes.
pub fn color_enabled(flag: bool) -> bool {
    flag && stdout().is_terminal()
}

pub fn paint_cluster_status(status: ClusterStatus, color: bool) -> String {
    let text = status.to_string();
    if !color {
        return text;
    }
    if status.is_healthy() {
        text.green().to_string()
    } else if status.is_in_progress() {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

pub fn paint_image_status(status: ImageStatus, color: bool) -> String {
    let text = status.to_string();
    if !color {
        return text;
    }
    match status {
        ImageStatus::BuildComplete => text.green().to_string(),
        ImageStatus::BuildInProgress | ImageStatus::DeleteInProgress => {
            text.yellow().to_string()
        }
        ImageStatus::BuildFailed | ImageStatus::DeleteFailed => text.red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_when_color_disabled() {
        let text = paint_cluster_status(ClusterStatus::CreateComplete, false);
        assert_eq!(text, "CREATE_COMPLETE");
    }

    #[test]
    fn healthy_status_is_green() {
        let text = paint_cluster_status(ClusterStatus::CreateComplete, true);
        assert!(text.contains("CREATE_COMPLETE"));
        assert!(text.contains("\u{1b}[32m"));
    }

    #[test]
    fn failed_status_is_red() {
        let text = paint_cluster_status(ClusterStatus::CreateFailed, true);
        assert!(text.contains("\u{1b}[31m"));
    }

    #[test]
    fn in_progress_image_is_yellow() {
        let text = paint_image_status(ImageStatus::BuildInProgress, true);
        assert!(text.contains("\u{1b}[33m"));
    }
}
