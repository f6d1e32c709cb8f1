//! Sorting PATH directories into the buckets that drive the generated config.
use std::path::{Path, PathBuf};

use crate::config::Rules;
use crate::operations::FileSystemOps;

/// Where each PATH directory ends up.
///
/// Every classified directory lands in exactly one of `prepend`, `append`,
/// `dropped`, or one of the two single-valued slots (a later match replaces
/// an earlier one in a slot; the replaced directory is then no longer part
/// of the result).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Directories placed ahead of `$PATH` (interpreters, package managers).
    pub prepend: Vec<String>,
    /// Directories placed after `$PATH`.
    pub append: Vec<String>,
    /// VS Code launcher directory (`...\Microsoft VS Code\bin`).
    pub vscode: Option<String>,
    /// Directory holding the Windows SSH client.
    pub ssh: Option<String>,
    /// App execution alias directories, excluded entirely.
    pub dropped: Vec<String>,
}

impl Classification {
    /// Number of directories held across all buckets and slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prepend.len()
            + self.append.len()
            + self.dropped.len()
            + usize::from(self.vscode.is_some())
            + usize::from(self.ssh.is_some())
    }

    /// Returns `true` when nothing was classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Location of the WindowsApps execution-alias directory for `local_app_data`.
#[must_use]
pub fn windows_apps_dir(local_app_data: &str) -> PathBuf {
    Path::new(local_app_data).join("Microsoft").join("WindowsApps")
}

/// Case-insensitive substring test with `/` and `\` treated alike.
fn contains_marker(dir: &str, marker: &str) -> bool {
    if marker.is_empty() {
        return false;
    }
    let fold = |s: &str| s.replace('/', "\\").to_lowercase();
    fold(dir).contains(&fold(marker))
}

fn has_executable(fs: &dyn FileSystemOps, dir: &str, name: &str) -> bool {
    !name.is_empty() && fs.is_file(&Path::new(dir).join(name))
}

/// Classify `dirs` in order; the first matching rule wins for each directory.
///
/// 1. same filesystem object as `windows_apps` → dropped
/// 2. text contains the VS Code marker → `vscode` slot
/// 3. holds the SSH executable → `ssh` slot
/// 4. holds any prepend executable → `prepend`
/// 5. otherwise → `append`
#[must_use]
pub fn classify(
    dirs: &[String],
    rules: &Rules,
    fs: &dyn FileSystemOps,
    windows_apps: Option<&Path>,
) -> Classification {
    let mut out = Classification::default();

    for dir in dirs {
        let path = Path::new(dir);

        if let Some(apps) = windows_apps
            && fs.exists(path)
            && fs.same_file(apps, path)
        {
            out.dropped.push(dir.clone());
            continue;
        }

        if contains_marker(dir, &rules.vscode_marker) {
            out.vscode = Some(dir.clone());
            continue;
        }

        if has_executable(fs, dir, &rules.ssh_executable) {
            out.ssh = Some(dir.clone());
            continue;
        }

        if rules
            .prepend_executables
            .iter()
            .any(|exe| has_executable(fs, dir, exe))
        {
            out.prepend.push(dir.clone());
            continue;
        }

        out.append.push(dir.clone());
    }

    out
}
