//! External process execution behind an injectable [`Executor`] trait.
use anyhow::{Context as _, Result};
use std::path::PathBuf;
use std::process::{Command, Output};

use crate::error::ExecError;

/// Result of a command execution.
#[derive(Debug, Clone, Default)]
pub struct ExecResult {
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, if the process was not terminated by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Abstraction over running external programs.
///
/// Production code uses [`SystemExecutor`]; tests substitute a scripted
/// double so that the pipeline never spawns `cygpath` or `printenv`.
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run a command and return its output. Fails if the command exits non-zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exits non-zero.
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let result = self.run_unchecked(program, args)?;
        if !result.success {
            return Err(ExecError::Failed {
                program: program.to_string(),
                exit_code: result.code.unwrap_or(-1),
                stderr: result.stderr.trim().to_string(),
            }
            .into());
        }
        Ok(result)
    }

    /// Run a command, allowing failure (returns result without bailing).
    ///
    /// # Errors
    ///
    /// Returns an error only if the process cannot be spawned.
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Resolve `program` against `PATH`.
    fn which(&self, program: &str) -> Option<PathBuf>;
}

/// [`Executor`] that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("failed to execute: {program}"))?;

        Ok(ExecResult::from(output))
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

#[cfg(test)]
pub mod test_helpers {
    use super::{ExecResult, Executor};
    use std::collections::VecDeque;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// A scripted executor for unit tests.
    ///
    /// Responses are consumed in FIFO order. When the queue is empty any call
    /// returns a failed response with `"unexpected call"` on stderr. Every
    /// invocation is recorded so tests can assert on the arguments passed.
    #[derive(Debug, Default)]
    pub struct MockExecutor {
        responses: Mutex<VecDeque<ExecResult>>,
        calls: Mutex<Vec<(String, Vec<String>)>>,
        which_result: Option<PathBuf>,
    }

    impl MockExecutor {
        /// Create a mock with a single successful response.
        #[must_use]
        pub fn ok(stdout: &str) -> Self {
            Self::default().then_ok(stdout)
        }

        /// Queue another successful response.
        #[must_use]
        pub fn then_ok(self, stdout: &str) -> Self {
            self.push(ExecResult {
                stdout: stdout.to_string(),
                stderr: String::new(),
                success: true,
                code: Some(0),
            })
        }

        /// Queue a failed response with the given exit code and stderr.
        #[must_use]
        pub fn then_fail(self, code: i32, stderr: &str) -> Self {
            self.push(ExecResult {
                stdout: String::new(),
                stderr: stderr.to_string(),
                success: false,
                code: Some(code),
            })
        }

        /// Set the value returned by every [`Executor::which`] call.
        #[must_use]
        pub fn with_which(mut self, path: impl Into<PathBuf>) -> Self {
            self.which_result = Some(path.into());
            self
        }

        /// Every `(program, args)` pair seen so far.
        #[must_use]
        pub fn calls(&self) -> Vec<(String, Vec<String>)> {
            self.calls
                .lock()
                .map_or_else(|_| vec![], |guard| guard.clone())
        }

        fn push(self, result: ExecResult) -> Self {
            if let Ok(mut guard) = self.responses.lock() {
                guard.push_back(result);
            }
            self
        }
    }

    impl Executor for MockExecutor {
        fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
            if let Ok(mut guard) = self.calls.lock() {
                guard.push((
                    program.to_string(),
                    args.iter().map(ToString::to_string).collect(),
                ));
            }
            Ok(self
                .responses
                .lock()
                .ok()
                .and_then(|mut guard| guard.pop_front())
                .unwrap_or_else(|| ExecResult {
                    stdout: String::new(),
                    stderr: "unexpected call".to_string(),
                    success: false,
                    code: Some(1),
                }))
        }

        fn which(&self, _: &str) -> Option<PathBuf> {
            self.which_result.clone()
        }
    }
}
