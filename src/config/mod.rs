//! User settings: MSYS2 location, output file name, and classification rules.
pub mod toml_loader;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Default MSYS2 installation root.
pub const DEFAULT_MSYS_ROOT: &str = r"C:\msys64";

/// Default name of the generated file under the MSYS2 home directory.
pub const DEFAULT_CONFIG_FILE_NAME: &str = ".bashrc_winpath";

/// Settings loaded from `config.toml`.
///
/// Every key is optional; a missing file is equivalent to an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// MSYS2 installation root containing `usr\bin\cygpath.exe`.
    pub msys_root: PathBuf,
    /// Name of the generated file, relative to the MSYS2 home directory.
    pub config_file_name: String,
    /// Whether `%VAR%` references in PATH entries are expanded.
    pub expand_vars: bool,
    /// Directory classification rules (`[rules]` table).
    pub rules: Rules,
    /// Value exported as `RSYNC_RSH` when an SSH directory is found.
    pub rsync_rsh: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            msys_root: PathBuf::from(DEFAULT_MSYS_ROOT),
            config_file_name: DEFAULT_CONFIG_FILE_NAME.to_string(),
            expand_vars: true,
            rules: Rules::default(),
            rsync_rsh: "/usr/bin/ssh".to_string(),
        }
    }
}

/// Sentinels that drive directory classification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    /// Executables whose presence moves a directory ahead of `$PATH`.
    pub prepend_executables: Vec<String>,
    /// Executable identifying the Windows SSH client directory.
    pub ssh_executable: String,
    /// Substring identifying the VS Code launcher directory.
    pub vscode_marker: String,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            prepend_executables: vec!["python.exe".to_string(), "pip.exe".to_string()],
            ssh_executable: "ssh.exe".to_string(),
            vscode_marker: r"Microsoft VS Code\bin".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or return defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        toml_loader::load_config(path)
    }

    /// Path of the MSYS2 `usr\bin` directory.
    #[must_use]
    pub fn msys_bin(&self) -> PathBuf {
        self.msys_root.join("usr").join("bin")
    }
}

/// Return the default settings path,
/// `$XDG_CONFIG_HOME/winpath-bashrc/config.toml` (or `~/.config/...`).
#[must_use]
pub fn default_settings_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME").map_or_else(
        |_| {
            std::env::var("HOME")
                .or_else(|_| std::env::var("USERPROFILE"))
                .map_or_else(|_| PathBuf::from("."), PathBuf::from)
                .join(".config")
        },
        PathBuf::from,
    );
    config_dir.join("winpath-bashrc").join("config.toml")
}
