//! Logging Infrastructure
//!
//! `RUST_LOG` wins when set; otherwise `storefront_server` and `tower_http`
//! log at the configured level.

use std::path::Path;
use tracing_subscriber::EnvFilter;

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("storefront_server={log_level},tower_http={log_level}"))
    })
}

/// Initialize the logger
pub fn init_logger(log_level: &str) {
    init_logger_with_file(log_level, None);
}

/// Initialize the logger with optional daily rolling file output
///
/// File output is used only when `log_dir` exists; otherwise logs go to stdout.
pub fn init_logger_with_file(log_level: &str, log_dir: Option<&str>) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(log_level))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "storefront-server");
            subscriber.with_ansi(false).with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
