//! Batch path conversion through MSYS2's `cygpath`.
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::error::ConvertError;
use crate::exec::Executor;
use crate::operations::FileSystemOps;

/// Conversion direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `C:\foo` → `/c/foo` (`cygpath -ua`).
    ToPosix,
    /// `/c/foo` → `C:\foo` (`cygpath -wa`).
    ToWindows,
}

impl Direction {
    const fn flag(self) -> &'static str {
        match self {
            Self::ToPosix => "-ua",
            Self::ToWindows => "-wa",
        }
    }
}

/// Find `<msys_bin>\<name>.exe`, falling back to a `PATH` lookup.
///
/// # Errors
///
/// Returns [`ConvertError::MissingTool`] if neither location has the tool.
pub fn locate_tool(
    msys_bin: &Path,
    name: &str,
    fs: &dyn FileSystemOps,
    executor: &dyn Executor,
) -> Result<PathBuf> {
    let bundled = msys_bin.join(format!("{name}.exe"));
    if fs.is_file(&bundled) {
        return Ok(bundled);
    }
    executor.which(name).ok_or_else(|| {
        ConvertError::MissingTool {
            name: name.to_string(),
            searched: msys_bin.to_path_buf(),
        }
        .into()
    })
}

/// Convert `paths` with a single `cygpath` invocation.
///
/// An empty batch never spawns the tool. The output has exactly one entry per
/// input, in input order.
///
/// # Errors
///
/// Returns [`ConvertError::Failed`] if `cygpath` exits non-zero and
/// [`ConvertError::LineCountMismatch`] if its output does not line up with
/// the input.
pub fn convert(
    executor: &dyn Executor,
    cygpath: &Path,
    paths: &[String],
    direction: Direction,
) -> Result<Vec<String>> {
    if paths.is_empty() {
        return Ok(Vec::new());
    }

    let program = cygpath.to_string_lossy();
    let mut args = Vec::with_capacity(paths.len() + 1);
    args.push(direction.flag());
    args.extend(paths.iter().map(String::as_str));

    let result = executor.run_unchecked(&program, &args)?;
    if !result.success {
        return Err(ConvertError::Failed {
            program: program.into_owned(),
            exit_code: result.code.unwrap_or(-1),
            stderr: result.stderr.trim().to_string(),
        }
        .into());
    }

    let converted: Vec<String> = result.stdout.lines().map(String::from).collect();
    if converted.len() != paths.len() {
        return Err(ConvertError::LineCountMismatch {
            program: program.into_owned(),
            expected: paths.len(),
            actual: converted.len(),
        }
        .into());
    }
    Ok(converted)
}

/// Convert a single path.
///
/// # Errors
///
/// See [`convert`].
pub fn convert_one(
    executor: &dyn Executor,
    cygpath: &Path,
    path: &str,
    direction: Direction,
) -> Result<String> {
    convert(executor, cygpath, &[path.to_string()], direction)?
        .pop()
        .ok_or_else(|| {
            ConvertError::LineCountMismatch {
                program: cygpath.to_string_lossy().into_owned(),
                expected: 1,
                actual: 0,
            }
            .into()
        })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::exec::test_helpers::MockExecutor;
    use crate::operations::MockFileSystemOps;

    fn cygpath() -> PathBuf {
        PathBuf::from(r"C:\msys64\usr\bin\cygpath.exe")
    }

    fn paths(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_batch_does_not_invoke_tool() {
        let executor = MockExecutor::default();
        let out = convert(&executor, &cygpath(), &[], Direction::ToPosix).unwrap();
        assert!(out.is_empty());
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn batch_is_one_invocation_in_order() {
        let executor = MockExecutor::ok("/c/Windows/System32\n/c/Python311/Scripts\n");
        let input = paths(&[r"C:\Windows\System32", r"C:\Python311\Scripts"]);

        let out = convert(&executor, &cygpath(), &input, Direction::ToPosix).unwrap();

        assert_eq!(out, vec!["/c/Windows/System32", "/c/Python311/Scripts"]);
        let calls = executor.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, r"C:\msys64\usr\bin\cygpath.exe");
        assert_eq!(
            calls[0].1,
            vec!["-ua", r"C:\Windows\System32", r"C:\Python311\Scripts"]
        );
    }

    #[test]
    fn to_windows_uses_wa_flag() {
        let executor = MockExecutor::ok("C:\\msys64\\home\\me\r\n");
        let out = convert_one(&executor, &cygpath(), "/home/me", Direction::ToWindows).unwrap();
        assert_eq!(out, r"C:\msys64\home\me");
        assert_eq!(executor.calls()[0].1[0], "-wa");
    }

    #[test]
    fn non_zero_exit_is_fatal_with_stderr() {
        let executor = MockExecutor::default().then_fail(1, "cygpath: can't convert empty path\n");
        let err = convert(&executor, &cygpath(), &paths(&["x"]), Direction::ToPosix).unwrap_err();
        let convert_err = err.downcast_ref::<ConvertError>().unwrap();
        assert!(matches!(
            convert_err,
            ConvertError::Failed { exit_code: 1, stderr, .. } if stderr == "cygpath: can't convert empty path"
        ));
    }

    #[test]
    fn short_output_is_rejected() {
        let executor = MockExecutor::ok("/c/a\n");
        let err = convert(
            &executor,
            &cygpath(),
            &paths(&[r"C:\a", r"C:\b"]),
            Direction::ToPosix,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConvertError>(),
            Some(ConvertError::LineCountMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn locate_prefers_bundled_tool() {
        let bin = PathBuf::from(r"C:\msys64\usr\bin");
        let fs = MockFileSystemOps::new().with_file(bin.join("cygpath.exe"));
        let executor = MockExecutor::default().with_which("/usr/bin/cygpath");
        let found = locate_tool(&bin, "cygpath", &fs, &executor).unwrap();
        assert_eq!(found, bin.join("cygpath.exe"));
    }

    #[test]
    fn locate_falls_back_to_path() {
        let bin = PathBuf::from(r"C:\msys64\usr\bin");
        let executor = MockExecutor::default().with_which("/usr/bin/cygpath");
        let found = locate_tool(&bin, "cygpath", &MockFileSystemOps::new(), &executor).unwrap();
        assert_eq!(found, PathBuf::from("/usr/bin/cygpath"));
    }

    #[test]
    fn locate_missing_tool_is_error() {
        let bin = PathBuf::from(r"C:\msys64\usr\bin");
        let err = locate_tool(
            &bin,
            "cygpath",
            &MockFileSystemOps::new(),
            &MockExecutor::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConvertError>(),
            Some(ConvertError::MissingTool { .. })
        ));
    }
}
