//! Filesystem operation abstractions for dependency injection.
//!
//! Provides the [`FileSystemOps`] trait so that the directory classifier can
//! be unit-tested without touching the real filesystem.  Production code uses
//! [`SystemFileSystemOps`]; tests use `MockFileSystemOps`.

use std::path::Path;

/// Abstraction over the filesystem queries used during classification.
///
/// None of the queries can fail: a path that cannot be inspected simply
/// does not match.
pub trait FileSystemOps: Send + Sync + std::fmt::Debug {
    /// Returns `true` if `path` exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a regular file (not a directory or broken symlink).
    fn is_file(&self, path: &Path) -> bool;

    /// Returns `true` if `a` and `b` resolve to the same filesystem object.
    fn same_file(&self, a: &Path, b: &Path) -> bool;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn same_file(&self, a: &Path, b: &Path) -> bool {
        // dunce keeps Windows paths free of the `\\?\` prefix so both sides compare alike.
        match (dunce::canonicalize(a), dunce::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

/// Mock [`FileSystemOps`] for unit tests.
///
/// Pre-configure existing paths, regular files and aliased directories with
/// the builder-style methods.
///
/// # Example
///
/// ```ignore
/// let fs = MockFileSystemOps::new()
///     .with_file(r"C:\Python311\python.exe")
///     .with_alias(r"C:\Users\me\AppData\Local\Microsoft\WindowsApps", r"C:\WinApps");
/// ```
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockFileSystemOps {
    existing: Vec<std::path::PathBuf>,
    files: Vec<std::path::PathBuf>,
    aliases: Vec<(std::path::PathBuf, std::path::PathBuf)>,
}

#[cfg(test)]
impl MockFileSystemOps {
    /// Create an empty mock with nothing configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path` as existing without making it a file.
    #[must_use]
    pub fn with_existing(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        let p = path.into();
        if !self.existing.contains(&p) {
            self.existing.push(p);
        }
        self
    }

    /// Mark `path` as a regular file (also marks it as existing).
    #[must_use]
    pub fn with_file(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        let p = path.into();
        if !self.files.contains(&p) {
            self.files.push(p.clone());
        }
        self.with_existing(p)
    }

    /// Declare that `a` and `b` are the same object (both are marked as existing).
    #[must_use]
    pub fn with_alias(
        mut self,
        a: impl Into<std::path::PathBuf>,
        b: impl Into<std::path::PathBuf>,
    ) -> Self {
        let (a, b) = (a.into(), b.into());
        self.aliases.push((a.clone(), b.clone()));
        self.with_existing(a).with_existing(b)
    }
}

#[cfg(test)]
impl FileSystemOps for MockFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        self.existing.iter().any(|p| p == path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.iter().any(|p| p == path)
    }

    fn same_file(&self, a: &Path, b: &Path) -> bool {
        if !self.exists(a) || !self.exists(b) {
            return false;
        }
        a == b
            || self
                .aliases
                .iter()
                .any(|(x, y)| (x == a && y == b) || (x == b && y == a))
    }
}
