//! Mirror the Windows `PATH` into an MSYS2 bash configuration.
//!
//! The tool reads the user and system `Path` values from the registry, sorts
//! each directory into a bucket, converts the buckets to POSIX form with
//! `cygpath`, renders a bash fragment, and installs it as
//! `~/.bashrc_winpath`, sourced once from `~/.bashrc`.
//!
//! The public API follows the pipeline:
//!
//! - **[`source`]**: read and normalize the registry `Path` values
//! - **[`classify`]**: bucket directories (prepend, append, VS Code, SSH)
//! - **[`cygpath`]**: batch Windows/POSIX path conversion
//! - **[`render`]**: produce the bash text
//! - **[`install`]** / **[`resources`]**: idempotent file updates
//! - **[`commands`]**: subcommand orchestration (`install`, `show`, `version`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod cygpath;
pub mod error;
pub mod exec;
pub mod install;
pub mod logging;
pub mod operations;
pub mod render;
pub mod resources;
pub mod source;
