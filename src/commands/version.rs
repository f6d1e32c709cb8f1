//! Command: print version information.
use std::io::Write;

use anyhow::Result;

/// Version string: `WINPATH_BASHRC_VERSION` from the build, else the crate version.
#[must_use]
pub const fn version() -> &'static str {
    match option_env!("WINPATH_BASHRC_VERSION") {
        Some(version) => version,
        None => env!("CARGO_PKG_VERSION"),
    }
}

/// Write `winpath-bashrc <version>` to `out`.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn run(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "winpath-bashrc {}", version())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn prints_name_and_version() {
        let mut out = Vec::new();
        run(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("winpath-bashrc "));
        assert!(text.ends_with('\n'));
        assert!(!version().is_empty());
    }
}
