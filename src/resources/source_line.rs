//! A single `source` line in the bash startup file, added at most once.
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Result;

use super::{Resource, ResourceChange, ResourceState};
use crate::error::InstallError;
use crate::render::escape_double_quoted;

/// Build the line that sources `file_name` relative to `$HOME`.
///
/// ```
/// use winpath_bashrc::resources::source_line::source_line;
///
/// assert_eq!(source_line(".bashrc_winpath"), r#"source "${HOME}/.bashrc_winpath""#);
/// ```
#[must_use]
pub fn source_line(file_name: &str) -> String {
    format!("source \"${{HOME}}/{}\"", escape_double_quoted(file_name))
}

/// Ensures `line` appears in the startup file at `path`.
#[derive(Debug, Clone)]
pub struct SourceLineResource {
    /// Startup file (usually `~/.bashrc`).
    pub path: PathBuf,
    /// Exact line that must be present.
    pub line: String,
}

impl SourceLineResource {
    /// Create a new source line resource.
    #[must_use]
    pub const fn new(path: PathBuf, line: String) -> Self {
        Self { path, line }
    }

    /// Startup file content, empty when the file does not exist.
    fn read(&self) -> Result<Option<String>, InstallError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(InstallError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl Resource for SourceLineResource {
    fn description(&self) -> String {
        format!("{} (source line)", self.path.display())
    }

    fn current_state(&self) -> Result<ResourceState> {
        Ok(match self.read()? {
            None => ResourceState::Missing,
            Some(content) if content.contains(&self.line) => ResourceState::Correct,
            Some(_) => ResourceState::Incorrect {
                current: "source line absent".to_string(),
            },
        })
    }

    fn apply(&self) -> Result<ResourceChange> {
        let content = self.read()?.unwrap_or_default();
        if content.contains(&self.line) {
            return Ok(ResourceChange::AlreadyCorrect);
        }

        let io_error = |source| InstallError::Io {
            path: self.path.clone(),
            source,
        };
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_error)?;
        let separator = if content.is_empty() || content.ends_with('\n') {
            ""
        } else {
            "\n"
        };
        writeln!(file, "{separator}{}", self.line).map_err(io_error)?;
        Ok(ResourceChange::Applied)
    }
}
