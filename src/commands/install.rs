//! Command: generate the config file and hook it into `~/.bashrc`.
use anyhow::{Context as _, Result};

use super::{Context, generate};
use crate::cygpath::locate_tool;
use crate::install::{InstallPlan, resolve_home};
use crate::logging::Log;
use crate::resources::{Resource, ResourceChange, ResourceState};
use crate::source::PathSource;

/// Run the install command.
///
/// # Errors
///
/// Returns an error naming the failing stage if generation, home
/// resolution, or writing either file fails.
pub fn run(ctx: &Context, source: &dyn PathSource) -> Result<()> {
    let generated = generate(ctx, source)?;
    let log = ctx.log.as_ref();
    let executor = ctx.executor.as_ref();

    log.stage("Locating MSYS2 home");
    let printenv = locate_tool(
        &ctx.settings.msys_bin(),
        "printenv",
        ctx.fs_ops.as_ref(),
        executor,
    )
    .context("locating printenv failed")?;
    let home = resolve_home(executor, &printenv, &generated.cygpath)
        .context("resolving the MSYS2 home directory failed")?;
    log.info(&format!("home: {}", home.display()));

    log.stage("Installing config");
    let plan = InstallPlan::new(&home, &ctx.settings.config_file_name, generated.text);
    log.debug(&format!("config file: {}", plan.config.path.display()));
    log.debug(&format!("startup file: {}", plan.startup.path.display()));

    if ctx.dry_run {
        preview(&plan.config, log)?;
        preview(&plan.startup, log)?;
        return Ok(());
    }

    let report = plan.apply().context("installing the config failed")?;
    log.info(&format!("wrote {}", plan.config.path.display()));
    match report.startup {
        ResourceChange::Applied => log.info(&format!(
            "added `{}` to {}",
            plan.startup.line,
            plan.startup.path.display()
        )),
        ResourceChange::AlreadyCorrect => log.debug(&format!(
            "{} already sources the config",
            plan.startup.path.display()
        )),
    }
    Ok(())
}

/// Log what applying `resource` would do.
fn preview(resource: &dyn Resource, log: &dyn Log) -> Result<()> {
    match resource.current_state()? {
        ResourceState::Correct => {
            log.info(&format!("{} is up to date", resource.description()));
        }
        ResourceState::Missing => {
            log.dry_run(&format!("would create {}", resource.description()));
        }
        ResourceState::Incorrect { current } => {
            log.dry_run(&format!(
                "would update {} ({current})",
                resource.description()
            ));
        }
    }
    Ok(())
}
