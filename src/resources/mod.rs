//! Files this tool manages, each modelled as a checkable, appliable resource.
pub mod config_file;
pub mod source_line;

use anyhow::Result;

/// What a resource looks like on disk compared to what it should be.
///
/// ```
/// use winpath_bashrc::resources::ResourceState;
///
/// let stale = ResourceState::Incorrect { current: "12 bytes of older content".into() };
/// assert_ne!(stale, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// The file does not exist yet.
    Missing,
    /// The file already has the desired content.
    Correct,
    /// The file exists with other content.
    Incorrect {
        /// Short description of the current content.
        current: String,
    },
}

/// Outcome of [`Resource::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceChange {
    /// The file was written.
    Applied,
    /// Nothing had to be written.
    AlreadyCorrect,
}

/// A file that can be inspected without side effects and then brought to
/// its desired state. `current_state` backs `--dry-run`.
pub trait Resource {
    /// Path (and qualifier) shown in progress messages.
    fn description(&self) -> String;

    /// Inspect the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    fn current_state(&self) -> Result<ResourceState>;

    /// Write whatever is needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn apply(&self) -> Result<ResourceChange>;

    /// `true` unless the file is already [`ResourceState::Correct`].
    ///
    /// # Errors
    ///
    /// Propagates errors from [`current_state`](Self::current_state).
    fn needs_change(&self) -> Result<bool> {
        Ok(self.current_state()? != ResourceState::Correct)
    }
}
