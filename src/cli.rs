//! Command-line interface.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Mirror the Windows PATH into an MSYS2 bash configuration.
#[derive(Parser, Debug)]
#[command(
    name = "winpath-bashrc",
    about = "Mirror the Windows PATH registry entries into an MSYS2 bash configuration",
    version
)]
pub struct Cli {
    /// Subcommand to run (defaults to `install`).
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

impl Cli {
    /// The requested subcommand, `install` when none was given.
    #[must_use]
    pub fn selected_command(&self) -> Command {
        self.command.unwrap_or(Command::Install)
    }
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview changes without writing any file
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Settings file (default: $XDG_CONFIG_HOME/winpath-bashrc/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// MSYS2 installation root (overrides the settings file)
    #[arg(long, global = true, value_name = "DIR")]
    pub msys_root: Option<PathBuf>,

    /// Keep %VAR% references in PATH entries unexpanded
    #[arg(long, global = true)]
    pub no_expand: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Generate the config file and hook it into ~/.bashrc
    Install,
    /// Print the generated config without writing anything
    Show,
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the log file.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Show => "show",
            Self::Version => "version",
        }
    }
}
