//! Structured logger with dry-run awareness.
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::types::Log;
use super::utils::log_file_path;

/// Target used for stage headers.
pub(super) const STAGE_TARGET: &str = "winpath_bashrc::stage";
/// Target used for dry-run messages.
pub(super) const DRY_RUN_TARGET: &str = "winpath_bashrc::dry_run";

/// Implement [`Log`] by delegating to inherent methods of the same name.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Logger that emits [`tracing`] events.
///
/// Every message also lands in `$XDG_CACHE_HOME/winpath-bashrc/<command>.log`
/// through the file layer installed by
/// [`init_subscriber`](super::subscriber::init_subscriber).
#[derive(Debug)]
pub struct Logger {
    log_file: Option<PathBuf>,
    warnings: AtomicUsize,
}

impl Logger {
    /// Create a new logger for `command`.
    ///
    /// Only remembers the log file path; the file itself is opened by the
    /// subscriber.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            log_file: log_file_path(command),
            warnings: AtomicUsize::new(0),
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Number of warnings logged so far.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        self.warnings.fetch_add(1, Ordering::Relaxed);
        tracing::warn!("{msg}");
    }

    /// Log a stage header.
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message.
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Print where the full log went, plus a warning tally if any.
    pub fn print_footer(&self) {
        let warnings = self.warning_count();
        if warnings > 0 {
            self.info(&format!("\x1b[33m{warnings} warning(s)\x1b[0m"));
        }
        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::isolated_logger;
    use std::fs;

    fn log_contents(log: &Logger) -> String {
        fs::read_to_string(log.log_path().expect("log path")).unwrap()
    }

    #[test]
    fn log_file_is_created() {
        let (log, _tmp, _guard) = isolated_logger();
        let path = log.log_path().expect("log path should exist");
        assert!(path.exists(), "file layer should create the log file");
        assert!(log_contents(&log).contains("winpath-bashrc"));
    }

    #[test]
    fn debug_always_written_to_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.debug("classified 12 entries");
        assert!(log_contents(&log).contains("[debug] classified 12 entries"));
    }

    #[test]
    fn stage_written_with_arrow() {
        let (log, _tmp, _guard) = isolated_logger();
        log.stage("Reading PATH");
        assert!(log_contents(&log).contains("==> Reading PATH"));
    }

    #[test]
    fn dry_run_written_with_tag() {
        let (log, _tmp, _guard) = isolated_logger();
        log.dry_run("would write C:\\msys64\\home\\me\\.bashrc_winpath");
        let contents = log_contents(&log);
        assert!(contents.contains("[dry run] would write"));
    }

    #[test]
    fn warn_and_error_are_tagged() {
        let (log, _tmp, _guard) = isolated_logger();
        log.warn("user PATH not set");
        log.error("cygpath failed");
        let contents = log_contents(&log);
        assert!(contents.contains("[warn] user PATH not set"));
        assert!(contents.contains("[error] cygpath failed"));
    }

    #[test]
    fn ansi_codes_are_stripped_in_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.info("\x1b[32mdone\x1b[0m");
        let contents = log_contents(&log);
        assert!(contents.contains("     done"));
        assert!(!contents.contains('\x1b'));
    }

    #[test]
    fn warnings_are_counted() {
        let (log, _tmp, _guard) = isolated_logger();
        assert_eq!(log.warning_count(), 0);
        let as_trait: &dyn Log = &log;
        as_trait.warn("one");
        as_trait.warn("two");
        assert_eq!(log.warning_count(), 2);
    }
}
