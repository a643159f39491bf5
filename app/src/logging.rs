//! Logging setup.
//!
//! Events are emitted from inside the low-level mouse hook, so no layer may
//! touch stdout or the disk on the calling thread. Both writers go through
//! `tracing_appender::non_blocking`: the hook thread only enqueues lines, and
//! when the queue is full lines are dropped rather than waited on.

use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_FILTER: &str = "wheelsize=info,wheelsize_core=info,wheelsize_platform=info";
const LOG_FILE_PREFIX: &str = "wheelsize.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Install the global subscriber.
///
/// `to_file` adds a daily log under `<config dir>/wheelsize/logs/` (release
/// builds have no console). `RUST_LOG` overrides the default filter.
///
/// The returned guards flush the background writers when dropped; keep them
/// alive until the process is about to exit.
pub fn init(to_file: bool) -> Vec<WorkerGuard> {
    let mut guards = Vec::new();

    let (console, guard) = tracing_appender::non_blocking(std::io::stdout());
    guards.push(guard);
    let console_layer = fmt::layer()
        .with_target(true)
        .with_writer(console)
        .with_filter(env_filter());

    let log_dir = wheelsize_core::log_dir();
    let file_layer = if to_file {
        file_writer(&log_dir).map(|(writer, guard)| {
            guards.push(guard);
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(env_filter())
        })
    } else {
        None
    };
    let has_file = file_layer.is_some();

    if let Err(e) = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("wheelsize: logging already initialized: {e}");
    }

    if has_file {
        tracing::info!(dir = %log_dir.display(), "File logging enabled");
    }
    guards
}

/// Daily rolling file in `dir`, written from a background thread.
fn file_writer(dir: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!(
            "wheelsize: cannot create log directory {}: {e}",
            dir.display()
        );
        return None;
    }
    let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
    Some(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_writer_flushes_on_guard_drop() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");

        let (mut writer, guard) = file_writer(&logs).unwrap();
        writer.write_all(b"resize failed: access denied\n").unwrap();
        drop(guard);

        let entry = std::fs::read_dir(&logs)
            .unwrap()
            .filter_map(Result::ok)
            .find(|e| e.file_name().to_string_lossy().starts_with(LOG_FILE_PREFIX))
            .unwrap();
        let contents = std::fs::read_to_string(entry.path()).unwrap();
        assert!(contents.contains("resize failed: access denied"));
    }

    #[test]
    fn test_file_writer_needs_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        assert!(file_writer(&blocker.join("logs")).is_none());
    }
}
