//! Rendering the bash fragment that mirrors the Windows PATH.
use std::fmt::Write as _;

/// First line of every generated file.
pub const HEADER: &str =
    "# Generated by winpath-bashrc. Do not edit; changes are overwritten on the next run.";

/// Everything the renderer needs, already in POSIX form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderInput {
    /// Directories to put ahead of `$PATH`.
    pub prepend: Vec<String>,
    /// Directories to put after `$PATH`.
    pub append: Vec<String>,
    /// VS Code installation directory (the parent of its `bin` directory).
    pub vscode_root: Option<String>,
    /// Value for `RSYNC_RSH`, set when a Windows SSH client was found.
    pub rsync_rsh: Option<String>,
}

/// Escape `value` for use inside a bash double-quoted string.
///
/// Backslash, double quote, dollar sign and backtick are the only characters
/// bash treats specially between double quotes.
#[must_use]
pub fn escape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Quote `value` as a single literal bash word.
#[must_use]
pub fn double_quote(value: &str) -> String {
    format!("\"{}\"", escape_double_quoted(value))
}

/// Return the parent of a Windows directory path (`C:\a\b` → `C:\a`).
///
/// Accepts both separators; returns `None` for a path without a parent.
#[must_use]
pub fn windows_parent(dir: &str) -> Option<&str> {
    let trimmed = dir.trim_end_matches(['\\', '/']);
    let (parent, _) = trimmed.rsplit_once(['\\', '/'])?;
    if parent.is_empty() {
        return None;
    }
    if parent.ends_with(':') {
        // Keep the separator of a drive root.
        return trimmed.get(..=parent.len());
    }
    Some(parent)
}

/// Render the config text. The result depends only on `input`.
#[must_use]
pub fn render(input: &RenderInput) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{HEADER}");

    if !input.prepend.is_empty() {
        let _ = writeln!(
            out,
            "PATH=\"{}:$PATH\"",
            escape_double_quoted(&input.prepend.join(":"))
        );
    }
    if !input.append.is_empty() {
        let _ = writeln!(
            out,
            "PATH=\"$PATH:{}\"",
            escape_double_quoted(&input.append.join(":"))
        );
    }

    if let Some(root) = &input.vscode_root {
        let _ = write!(
            out,
            "function code() {{\n\
             \x20   local VSCODE_PATH={}\n\
             \x20   VSCODE_DEV= \\\n\
             \x20   ELECTRON_RUN_AS_NODE=1 \\\n\
             \x20   \"${{VSCODE_PATH}}/Code.exe\" \\\n\
             \x20   \"$(cygpath -w \"${{VSCODE_PATH}}/resources/app/out/cli.js\")\" \\\n\
             \x20   \"$@\"\n\
             }}\n",
            double_quote(root)
        );
    }

    if let Some(rsh) = &input.rsync_rsh {
        let _ = writeln!(out, "export RSYNC_RSH={}", double_quote(rsh));
    }

    out
}
