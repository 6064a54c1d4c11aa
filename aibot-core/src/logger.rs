//! Logging initialization: human-readable format (timestamp, level, target, message, fields) to console and, when configured, a log file.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::{FmtSpan, Writer},
    fmt::time::FormatTime,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Local time in `YYYY-MM-DD HH:MM:SS` for human-readable log lines.
struct ChronoLocal;

impl FormatTime for ChronoLocal {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let t = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        write!(w, "{} ", t)
    }
}

/// Opens `path` for appending, creating parent directories first.
fn open_log_file(path: &str) -> anyhow::Result<fs::File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

/// Initializes the global tracing subscriber.
///
/// Output is `YYYY-MM-DD HH:MM:SS LEVEL target: message key=value ...`, without ANSI codes.
/// With `Some(path)` the output is teed to stdout and the file; with `None` only stdout.
/// Log level from `RUST_LOG` (e.g. `info`, `debug`); default `info`. Load `.env` before calling.
pub fn init_tracing(log_file_path: Option<&str>) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let event_format = tracing_subscriber::fmt::format()
        .with_timer(ChronoLocal)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(false);

    let result = match log_file_path {
        Some(path) => {
            use tracing_subscriber::fmt::writer::MakeWriterExt;
            let file = Arc::new(open_log_file(path)?);
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stdout.and(file))
                .event_format(event_format)
                .with_span_events(FmtSpan::NONE)
                .with_ansi(false);
            Registry::default().with(env_filter).with(fmt_layer).try_init()
        }
        None => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stdout)
                .event_format(event_format)
                .with_span_events(FmtSpan::NONE)
                .with_ansi(false);
            Registry::default().with(env_filter).with(fmt_layer).try_init()
        }
    };

    result.map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/logs/aibot.log");
        let path = path.to_str().unwrap();

        open_log_file(path).unwrap();

        assert!(Path::new(path).exists());
    }
}
