//! Subcommand orchestration and the shared generation pipeline.
pub mod install;
pub mod show;
pub mod version;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::classify::{Classification, classify, windows_apps_dir};
use crate::cli::GlobalOpts;
use crate::config::{Settings, default_settings_path};
use crate::cygpath::{self, Direction};
use crate::exec::{Executor, SystemExecutor};
use crate::logging::Log;
use crate::operations::{FileSystemOps, SystemFileSystemOps};
use crate::render::{RenderInput, render, windows_parent};
use crate::source::{Environment, PathSource, read_path_list};

/// Everything a command needs, with the system seams injectable.
pub struct Context {
    /// Settings after CLI overrides.
    pub settings: Settings,
    /// Logger for progress and diagnostics.
    pub log: Arc<dyn Log>,
    /// Whether to preview changes instead of writing files.
    pub dry_run: bool,
    /// Process runner for `cygpath` and `printenv`.
    pub executor: Arc<dyn Executor>,
    /// Filesystem probes used by the classifier and tool lookup.
    pub fs_ops: Arc<dyn FileSystemOps>,
    /// Environment used for `%VAR%` expansion and `LOCALAPPDATA`.
    pub env: Environment,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("settings", &self.settings)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .field("executor", &self.executor)
            .field("fs_ops", &self.fs_ops)
            .field("env", &"<Environment>")
            .finish()
    }
}

impl Context {
    /// Build a context that talks to the real system.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be loaded.
    pub fn from_opts(global: &GlobalOpts, log: Arc<dyn Log>) -> Result<Self> {
        let settings = load_settings(global)?;
        log.debug(&format!("msys root: {}", settings.msys_root.display()));
        Ok(Self {
            settings,
            log,
            dry_run: global.dry_run,
            executor: Arc::new(SystemExecutor),
            fs_ops: Arc::new(SystemFileSystemOps),
            env: Environment::capture(),
        })
    }
}

/// Load the settings file and apply command-line overrides.
///
/// The default location may be absent (defaults apply); a file named with
/// `--config` must exist.
///
/// # Errors
///
/// Returns an error if an explicit settings file is missing, or if the file
/// cannot be read or parsed.
pub fn load_settings(global: &GlobalOpts) -> Result<Settings> {
    let path = match &global.config {
        Some(path) if !path.exists() => {
            anyhow::bail!("settings file not found: {}", path.display());
        }
        Some(path) => path.clone(),
        None => default_settings_path(),
    };

    let mut settings = Settings::load(&path)
        .with_context(|| format!("loading settings from {}", path.display()))?;
    if let Some(root) = &global.msys_root {
        settings.msys_root.clone_from(root);
    }
    if global.no_expand {
        settings.expand_vars = false;
    }
    Ok(settings)
}

/// Output of [`generate`].
#[derive(Debug, Clone)]
pub struct Generated {
    /// Rendered config text.
    pub text: String,
    /// The `cygpath` binary that was used, reused to resolve the home directory.
    pub cygpath: PathBuf,
    /// How the PATH directories were sorted.
    pub classification: Classification,
}

fn log_bucket(log: &dyn Log, name: &str, dirs: &[String]) {
    for dir in dirs {
        log.debug(&format!("{name}: {dir}"));
    }
}

/// Read, classify, convert and render: everything up to the install step.
///
/// # Errors
///
/// Returns an error naming the failing stage if the PATH cannot be read,
/// `cygpath` cannot be found, or a conversion fails.
pub fn generate(ctx: &Context, source: &dyn PathSource) -> Result<Generated> {
    let log = ctx.log.as_ref();
    let executor = ctx.executor.as_ref();

    log.stage("Reading Windows PATH");
    let dirs = read_path_list(source, ctx.settings.expand_vars, &ctx.env)
        .context("reading the Windows PATH failed")?;
    if dirs.is_empty() {
        log.warn("both user and system PATH are empty");
    }
    log_bucket(log, "entry", &dirs);
    log.info(&format!("{} PATH entries", dirs.len()));

    log.stage("Classifying directories");
    let windows_apps = ctx.env.get("LOCALAPPDATA").map(windows_apps_dir);
    if windows_apps.is_none() {
        log.debug("LOCALAPPDATA is not set; WindowsApps will not be excluded");
    }
    let classification = classify(
        &dirs,
        &ctx.settings.rules,
        ctx.fs_ops.as_ref(),
        windows_apps.as_deref(),
    );
    log_bucket(log, "prepend", &classification.prepend);
    log_bucket(log, "append", &classification.append);
    log_bucket(log, "dropped", &classification.dropped);
    if let Some(dir) = &classification.vscode {
        log.debug(&format!("vscode: {dir}"));
    }
    if let Some(dir) = &classification.ssh {
        log.debug(&format!("ssh: {dir}"));
    }
    log.info(&format!(
        "{} prepend, {} append, {} dropped",
        classification.prepend.len(),
        classification.append.len(),
        classification.dropped.len()
    ));

    let mut prepend = classification.prepend.clone();
    if let Some(ssh) = &classification.ssh {
        prepend.push(ssh.clone());
    }

    log.stage("Converting paths");
    let cygpath = cygpath::locate_tool(
        &ctx.settings.msys_bin(),
        "cygpath",
        ctx.fs_ops.as_ref(),
        executor,
    )
    .context("locating cygpath failed")?;
    log.debug(&format!("cygpath: {}", cygpath.display()));

    let prepend = cygpath::convert(executor, &cygpath, &prepend, Direction::ToPosix)
        .context("converting prepend directories failed")?;
    let append = cygpath::convert(
        executor,
        &cygpath,
        &classification.append,
        Direction::ToPosix,
    )
    .context("converting append directories failed")?;
    log_bucket(log, "posix prepend", &prepend);
    log_bucket(log, "posix append", &append);

    let vscode = classification.vscode.as_deref();
    let vscode_root = match vscode.map(|dir| (dir, windows_parent(dir))) {
        Some((_, Some(parent))) => Some(
            cygpath::convert_one(executor, &cygpath, parent, Direction::ToPosix)
                .context("converting the VS Code directory failed")?,
        ),
        Some((dir, None)) => {
            log.warn(&format!("ignoring VS Code directory without a parent: {dir}"));
            None
        }
        None => None,
    };

    log.stage("Rendering config");
    let input = RenderInput {
        prepend,
        append,
        vscode_root,
        rsync_rsh: classification
            .ssh
            .is_some()
            .then(|| ctx.settings.rsync_rsh.clone()),
    };
    let text = render(&input);
    for line in text.lines() {
        log.debug(line);
    }

    Ok(Generated {
        text,
        cygpath,
        classification,
    })
}

#[cfg(test)]
pub mod test_helpers {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use super::Context;
    use crate::config::Settings;
    use crate::exec::test_helpers::MockExecutor;
    use crate::logging::test_helpers::RecordingLog;
    use crate::operations::MockFileSystemOps;
    use crate::source::Environment;

    /// `C:\msys64\usr\bin\<name>.exe` built with the host separator for the file name.
    #[must_use]
    pub fn msys_tool(name: &str) -> PathBuf {
        Settings::default().msys_bin().join(format!("{name}.exe"))
    }

    /// Join with the host separator, matching what the classifier probes.
    #[must_use]
    pub fn join(dir: &str, name: &str) -> PathBuf {
        Path::new(dir).join(name)
    }

    /// A context over mocks; the returned log is shared with the context.
    #[must_use]
    pub fn make_context(
        executor: MockExecutor,
        fs: MockFileSystemOps,
        dry_run: bool,
    ) -> (Context, Arc<RecordingLog>, Arc<MockExecutor>) {
        let log = Arc::new(RecordingLog::default());
        let executor = Arc::new(executor);
        let ctx = Context {
            settings: Settings::default(),
            log: log.clone(),
            dry_run,
            executor: executor.clone(),
            fs_ops: Arc::new(fs),
            env: Environment::from_pairs([
                ("LOCALAPPDATA", r"C:\Users\me\AppData\Local"),
                ("SystemRoot", r"C:\Windows"),
            ]),
        };
        (ctx, log, executor)
    }
}
