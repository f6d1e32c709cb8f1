// Shared helpers for integration tests.
//
// Builds a fake Windows machine inside a temporary directory: an MSYS2 tree
// with `cygpath.exe` and `printenv.exe` stubs, a few PATH directories with
// sentinel executables, and an MSYS2 home. Process execution and the registry
// are replaced by in-memory doubles so the full pipeline runs on any host.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use winpath_bashrc::commands::Context;
use winpath_bashrc::config::Settings;
use winpath_bashrc::exec::{ExecResult, Executor};
use winpath_bashrc::logging::Log;
use winpath_bashrc::operations::SystemFileSystemOps;
use winpath_bashrc::source::{Environment, PathSource, Scope};

/// Prefix the fake `cygpath -ua` puts in front of every converted path.
pub const POSIX_PREFIX: &str = "/c";

/// Fake MSYS2 utilities: `cygpath -ua` prefixes [`POSIX_PREFIX`],
/// `cygpath -wa` maps the MSYS2 home to the fixture's home directory, and
/// `printenv HOME` reports `/home/me`.
#[derive(Debug)]
pub struct FakeMsys {
    home: PathBuf,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeMsys {
    pub fn new(home: &Path) -> Self {
        Self {
            home: home.to_path_buf(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every `(program file stem, args)` pair seen so far.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    fn ok(stdout: String) -> ExecResult {
        ExecResult {
            stdout,
            stderr: String::new(),
            success: true,
            code: Some(0),
        }
    }

    fn fail(stderr: &str) -> ExecResult {
        ExecResult {
            stdout: String::new(),
            stderr: stderr.to_string(),
            success: false,
            code: Some(1),
        }
    }
}

impl Executor for FakeMsys {
    fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        let name = Path::new(program)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.calls.lock().unwrap().push((
            name.clone(),
            args.iter().map(ToString::to_string).collect(),
        ));

        let result = match (name.as_str(), args) {
            ("printenv", ["HOME"]) => Self::ok("/home/me\n".to_string()),
            ("cygpath", ["-ua", paths @ ..]) => Self::ok(
                paths
                    .iter()
                    .map(|p| format!("{POSIX_PREFIX}{}\n", p.replace('\\', "/")))
                    .collect(),
            ),
            ("cygpath", ["-wa", "/home/me"]) => Self::ok(format!("{}\n", self.home.display())),
            _ => Self::fail("unexpected invocation"),
        };
        Ok(result)
    }

    fn which(&self, _program: &str) -> Option<PathBuf> {
        None
    }
}

/// Registry stand-in returning fixed `Path` values.
#[derive(Debug, Default)]
pub struct FakeRegistry {
    pub system: Option<String>,
    pub user: Option<String>,
}

impl PathSource for FakeRegistry {
    fn read(&self, scope: Scope) -> anyhow::Result<Option<String>> {
        Ok(match scope {
            Scope::System => self.system.clone(),
            Scope::User => self.user.clone(),
        })
    }
}

/// Log that discards everything except dry-run messages.
#[derive(Debug, Default)]
pub struct QuietLog {
    pub dry_runs: Mutex<Vec<String>>,
}

impl Log for QuietLog {
    fn stage(&self, _msg: &str) {}
    fn info(&self, _msg: &str) {}
    fn debug(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
    fn dry_run(&self, msg: &str) {
        self.dry_runs.lock().unwrap().push(msg.to_string());
    }
}

/// A fake Windows machine backed by a [`tempfile::TempDir`].
pub struct Machine {
    pub root: tempfile::TempDir,
}

impl Machine {
    /// Create the MSYS2 tree, the home directory, and the LOCALAPPDATA tree.
    pub fn new() -> Self {
        let machine = Self {
            root: tempfile::tempdir().expect("create temp dir"),
        };
        machine.file("msys64/usr/bin/cygpath.exe");
        machine.file("msys64/usr/bin/printenv.exe");
        machine.dir("home");
        machine.dir("Local/Microsoft/WindowsApps");
        machine
    }

    /// Absolute path of `rel` inside the machine.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    /// Same as [`path`](Self::path), as a PATH entry string.
    pub fn entry(&self, rel: &str) -> String {
        self.path(rel).to_string_lossy().into_owned()
    }

    /// Create directory `rel`.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        std::fs::create_dir_all(&path).expect("create dir");
        path
    }

    /// Create empty file `rel` and its parents.
    pub fn file(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, "").expect("write file");
        path
    }

    pub fn home(&self) -> PathBuf {
        self.path("home")
    }

    /// Join machine-relative entries into a registry `Path` value.
    pub fn path_value(&self, rels: &[&str]) -> String {
        rels.iter()
            .map(|rel| self.entry(rel))
            .collect::<Vec<_>>()
            .join(";")
    }

    /// A context over the real filesystem with faked processes.
    pub fn context(&self, dry_run: bool) -> (Context, Arc<FakeMsys>, Arc<QuietLog>) {
        let executor = Arc::new(FakeMsys::new(&self.home()));
        let log = Arc::new(QuietLog::default());
        let settings = Settings {
            msys_root: self.path("msys64"),
            ..Settings::default()
        };
        let ctx = Context {
            settings,
            log: log.clone(),
            dry_run,
            executor: executor.clone(),
            fs_ops: Arc::new(SystemFileSystemOps),
            env: Environment::from_pairs([("LOCALAPPDATA", self.entry("Local"))]),
        };
        (ctx, executor, log)
    }
}
