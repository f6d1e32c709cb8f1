//! The generated config file, rewritten on every run.
use std::path::PathBuf;

use anyhow::Result;

use super::{Resource, ResourceChange, ResourceState};
use crate::error::InstallError;

/// A file whose whole content is owned by this tool.
#[derive(Debug, Clone)]
pub struct ConfigFileResource {
    /// Target file.
    pub path: PathBuf,
    /// Desired content.
    pub content: String,
}

impl ConfigFileResource {
    /// Create a new config file resource.
    #[must_use]
    pub const fn new(path: PathBuf, content: String) -> Self {
        Self { path, content }
    }
}

impl Resource for ConfigFileResource {
    fn description(&self) -> String {
        self.path.display().to_string()
    }

    fn current_state(&self) -> Result<ResourceState> {
        match std::fs::read_to_string(&self.path) {
            Ok(current) if current == self.content => Ok(ResourceState::Correct),
            Ok(current) => Ok(ResourceState::Incorrect {
                current: format!("{} bytes of older content", current.len()),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ResourceState::Missing),
            Err(source) => Err(InstallError::Io {
                path: self.path.clone(),
                source,
            }
            .into()),
        }
    }

    /// Write the content unconditionally; the file is refreshed on every run
    /// even when it already matches.
    fn apply(&self) -> Result<ResourceChange> {
        std::fs::write(&self.path, &self.content).map_err(|source| InstallError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(ResourceChange::Applied)
    }
}
