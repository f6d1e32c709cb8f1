//! Locating the MSYS2 home directory and installing the rendered config.
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cygpath::{self, Direction};
use crate::error::InstallError;
use crate::exec::Executor;
use crate::resources::config_file::ConfigFileResource;
use crate::resources::source_line::{SourceLineResource, source_line};
use crate::resources::{Resource, ResourceChange};

/// Name of the bash startup file under the MSYS2 home directory.
pub const STARTUP_FILE_NAME: &str = ".bashrc";

/// Ask MSYS2 for its `HOME` and convert it to a native path.
///
/// # Errors
///
/// Returns an error if `printenv` or `cygpath` fails, or if `HOME` is empty.
pub fn resolve_home(executor: &dyn Executor, printenv: &Path, cygpath: &Path) -> Result<PathBuf> {
    let result = executor.run(&printenv.to_string_lossy(), &["HOME"])?;
    let home = result.stdout.trim();
    if home.is_empty() {
        return Err(InstallError::EmptyHome.into());
    }
    let native = cygpath::convert_one(executor, cygpath, home, Direction::ToWindows)?;
    Ok(PathBuf::from(native))
}

/// Write `text` to `home/file_name` and make sure `home/.bashrc` sources it.
///
/// # Errors
///
/// Returns an error if either file cannot be read or written.
pub fn install(home: &Path, file_name: &str, text: &str) -> Result<InstallReport> {
    InstallPlan::new(home, file_name, text.to_string()).apply()
}

/// Both files touched by an install.
#[derive(Debug, Clone)]
pub struct InstallPlan {
    /// Generated config file, rewritten on every run.
    pub config: ConfigFileResource,
    /// Startup file that must source the config file.
    pub startup: SourceLineResource,
}

impl InstallPlan {
    /// Plan an install of `content` as `home/file_name`.
    #[must_use]
    pub fn new(home: &Path, file_name: &str, content: String) -> Self {
        Self {
            config: ConfigFileResource::new(home.join(file_name), content),
            startup: SourceLineResource::new(
                home.join(STARTUP_FILE_NAME),
                source_line(file_name),
            ),
        }
    }

    /// Write the config file, then make sure the startup file sources it.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read or written.
    pub fn apply(&self) -> Result<InstallReport> {
        let config = self.config.apply()?;
        let startup = self.startup.apply()?;
        Ok(InstallReport { config, startup })
    }
}

/// What [`InstallPlan::apply`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallReport {
    /// Always [`ResourceChange::Applied`]; the config file is refreshed every run.
    pub config: ResourceChange,
    /// Whether the `source` line had to be added.
    pub startup: ResourceChange,
}
