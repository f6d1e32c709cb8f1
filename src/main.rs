//! Command-line entry point for `winpath-bashrc`.
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use winpath_bashrc::cli::{Cli, Command};
use winpath_bashrc::commands::{self, Context};
use winpath_bashrc::logging::{self, Logger};
use winpath_bashrc::source::{PathSource, RegistryPathSource};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    let result = match args.selected_command() {
        Command::Version => commands::version::run(&mut std::io::stdout().lock()),
        Command::Install => run_logged(&args, Command::Install, commands::install::run),
        Command::Show => run_logged(&args, Command::Show, |ctx, source| {
            commands::show::run(ctx, source, &mut std::io::stdout().lock())
        }),
    };

    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Run a pipeline command with logging set up. Any error is logged here,
/// once, before the footer.
fn run_logged(
    args: &Cli,
    command: Command,
    body: impl FnOnce(&Context, &dyn PathSource) -> Result<()>,
) -> Result<()> {
    logging::init_subscriber(args.verbose, command.name());
    let log = Arc::new(Logger::new(command.name()));

    let result = Context::from_opts(&args.global, log.clone())
        .and_then(|ctx| body(&ctx, &RegistryPathSource));

    if let Err(err) = &result {
        log.error(&format!("{err:#}"));
    }
    log.print_footer();
    result
}
