//! The [`Log`] trait shared by every logging backend.

/// Abstraction over logging backends.
///
/// Pipeline code logs through `&dyn Log` so tests can capture messages
/// without installing a global subscriber.
pub trait Log: Send + Sync {
    /// Log a stage header (one per pipeline stage).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log an action that was skipped because of `--dry-run`.
    fn dry_run(&self, msg: &str);
}
