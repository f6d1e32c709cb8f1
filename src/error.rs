//! Domain-specific error types for the PATH synchronisation pipeline.
//!
//! Internal modules return typed errors (e.g., [`ConvertError`],
//! [`InstallError`]) while command handlers at the CLI boundary convert them
//! to [`anyhow::Error`] via the standard `?` operator and attach the name of
//! the stage that failed.
//!
//! # Error hierarchy
//!
//! ```text
//! WinpathError
//! ├── Source(SourceError)    : registry access
//! ├── Exec(ExecError)        : external program exited non-zero
//! ├── Convert(ConvertError)  : cygpath invocation and output
//! ├── Install(InstallError)  : config file and startup file I/O
//! ├── Config(ConfigError)    : settings file parsing
//! └── Platform(PlatformError) : OS-specific operation failures
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the pipeline.
///
/// Aggregates the per-stage errors and is convertible to [`anyhow::Error`]
/// for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum WinpathError {
    /// Reading the PATH registry values failed.
    #[error("PATH source error: {0}")]
    Source(#[from] SourceError),

    /// An external program exited unsuccessfully.
    #[error("process error: {0}")]
    Exec(#[from] ExecError),

    /// Invoking an MSYS2 utility failed.
    #[error("path conversion error: {0}")]
    Convert(#[from] ConvertError),

    /// Writing the generated config or the startup file failed.
    #[error("install error: {0}")]
    Install(#[from] InstallError),

    /// The settings file could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The operation is not available on this platform.
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),
}

/// Errors that arise while reading the PATH values from the registry.
///
/// A missing key or value is not an error; it reads as an empty PATH.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The registry returned an error other than "not found".
    #[error("failed to read {scope} PATH from the registry: {source}")]
    Registry {
        /// Which PATH was being read (`user` or `system`).
        scope: String,
        /// Underlying registry error.
        source: std::io::Error,
    },
}

/// Errors from running an external program through `Executor::run`.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The program exited with a non-zero status.
    #[error("{program} failed (exit {exit_code}): {stderr}")]
    Failed {
        /// Program that was invoked.
        program: String,
        /// Exit code, or `-1` when the process was terminated by a signal.
        exit_code: i32,
        /// Captured standard error.
        stderr: String,
    },
}

/// Errors that arise from invoking the MSYS2 helper utilities.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The utility could not be found in the MSYS2 tree or on `PATH`.
    #[error("required executable '{name}' not found (looked in {searched})")]
    MissingTool {
        /// Executable name (e.g., `cygpath`).
        name: String,
        /// Location that was searched before falling back to `PATH`.
        searched: PathBuf,
    },

    /// The utility exited with a non-zero status.
    #[error("{program} failed (exit {exit_code}): {stderr}")]
    Failed {
        /// Program that was invoked.
        program: String,
        /// Exit code, or `-1` when the process was terminated by a signal.
        exit_code: i32,
        /// Captured standard error.
        stderr: String,
    },

    /// The utility produced a different number of lines than it was given paths.
    #[error("{program} returned {actual} path(s) for {expected} input(s)")]
    LineCountMismatch {
        /// Program that was invoked.
        program: String,
        /// Number of paths passed in.
        expected: usize,
        /// Number of lines read back.
        actual: usize,
    },
}

/// Errors that arise while installing the generated configuration.
#[derive(Error, Debug)]
pub enum InstallError {
    /// MSYS2 reported an empty `HOME`.
    #[error("MSYS2 HOME is empty")]
    EmptyHome,

    /// Reading or writing one of the target files failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from loading the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings file exists but could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has unexpected keys.
    #[error("invalid TOML in {path}: {message}")]
    InvalidSyntax {
        /// Path to the offending file.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },
}

/// Errors that arise from platform-specific operations.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The requested operation is not supported on the current platform.
    #[error("{operation} is only supported on Windows")]
    Unsupported {
        /// Name of the unavailable operation.
        operation: String,
    },
}
