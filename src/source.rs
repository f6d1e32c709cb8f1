//! Reading the user and system `Path` values and turning them into one
//! ordered list of directories.
use std::collections::HashMap;
use std::fmt;

use anyhow::Result;

/// Which `Path` value to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `HKEY_CURRENT_USER\Environment`.
    User,
    /// `HKEY_LOCAL_MACHINE\...\Session Manager\Environment`.
    System,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::System => write!(f, "system"),
        }
    }
}

/// Source of the raw, semicolon-delimited `Path` strings.
#[cfg_attr(test, mockall::automock)]
pub trait PathSource {
    /// Read the raw `Path` value for `scope`.
    ///
    /// Returns `Ok(None)` when the key or the value does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than "not found".
    fn read(&self, scope: Scope) -> Result<Option<String>>;
}

/// [`PathSource`] backed by the Windows registry.
///
/// Values are returned unexpanded, exactly as stored (`REG_EXPAND_SZ` values
/// keep their `%VAR%` references).
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistryPathSource;

/// Registry subkey holding the per-user environment (under `HKEY_CURRENT_USER`).
#[cfg(windows)]
const USER_ENVIRONMENT_SUBKEY: &str = "Environment";

/// Registry subkey holding the machine environment (under `HKEY_LOCAL_MACHINE`).
#[cfg(windows)]
const SYSTEM_ENVIRONMENT_SUBKEY: &str =
    r"SYSTEM\CurrentControlSet\Control\Session Manager\Environment";

impl PathSource for RegistryPathSource {
    fn read(&self, scope: Scope) -> Result<Option<String>> {
        #[cfg(windows)]
        {
            use winreg::RegKey;
            use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};

            use crate::error::SourceError;

            let (root, subkey) = match scope {
                Scope::User => (HKEY_CURRENT_USER, USER_ENVIRONMENT_SUBKEY),
                Scope::System => (HKEY_LOCAL_MACHINE, SYSTEM_ENVIRONMENT_SUBKEY),
            };
            let registry_error = |source| SourceError::Registry {
                scope: scope.to_string(),
                source,
            };

            let key = match RegKey::predef(root).open_subkey(subkey) {
                Ok(key) => key,
                Err(ref e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!("{scope} environment key not found");
                    return Ok(None);
                }
                Err(e) => return Err(registry_error(e).into()),
            };
            match key.get_value::<String, _>("Path") {
                Ok(value) => Ok(Some(value)),
                Err(ref e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!("{scope} Path value not found");
                    Ok(None)
                }
                Err(e) => Err(registry_error(e).into()),
            }
        }
        #[cfg(not(windows))]
        {
            let _ = scope;
            Err(crate::error::PlatformError::Unsupported {
                operation: "reading PATH from the registry".to_string(),
            }
            .into())
        }
    }
}

/// Snapshot of environment variables with Windows lookup semantics
/// (names compare case-insensitively).
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Capture the current process environment.
    #[must_use]
    pub fn capture() -> Self {
        Self::from_pairs(std::env::vars_os().filter_map(|(k, v)| {
            Some((k.into_string().ok()?, v.into_string().ok()?))
        }))
    }

    /// Build an environment from explicit pairs.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into().to_uppercase(), v.into()))
                .collect(),
        }
    }

    /// Look up `name`, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(&name.to_uppercase()).map(String::as_str)
    }
}

/// Expand `%NAME%` references in `value`.
///
/// Unknown names and a lone `%` are left verbatim, so `100%` and
/// `%NOT_SET%\bin` pass through unchanged.
#[must_use]
pub fn expand_vars(value: &str, env: &Environment) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some((before, after)) = rest.split_once('%') {
        out.push_str(before);
        let Some((name, tail)) = after.split_once('%') else {
            out.push('%');
            out.push_str(after);
            return out;
        };
        match env.get(name).filter(|_| !name.is_empty()) {
            Some(expanded) => {
                out.push_str(expanded);
                rest = tail;
            }
            None => {
                out.push('%');
                out.push_str(name);
                out.push('%');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Returns `true` for a bare drive designator such as `C:`.
fn is_drive(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some(':'), None) if letter.is_ascii_alphabetic()
    )
}

/// Strip trailing path separators, keeping the separator of a drive root.
#[must_use]
pub fn normalize_entry(entry: &str) -> &str {
    let trimmed = entry.trim_end_matches(['\\', '/']);
    if is_drive(trimmed) && trimmed.len() < entry.len() {
        return entry.get(..3).unwrap_or(trimmed);
    }
    trimmed
}

/// Split a raw `Path` value into normalized, non-empty entries.
fn split_entries(raw: &str, expand: bool, env: &Environment) -> Vec<String> {
    raw.split(';')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let expanded = if expand {
                expand_vars(segment, env)
            } else {
                segment.to_string()
            };
            normalize_entry(&expanded).to_string()
        })
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Read both `Path` values and combine them: system entries first, then user
/// entries. Missing values count as empty.
///
/// # Errors
///
/// Returns an error if the source fails for a reason other than a missing
/// key or value.
pub fn read_path_list(
    source: &dyn PathSource,
    expand: bool,
    env: &Environment,
) -> Result<Vec<String>> {
    let system = source.read(Scope::System)?.unwrap_or_default();
    let user = source.read(Scope::User)?.unwrap_or_default();

    let mut combined = split_entries(&system, expand, env);
    combined.extend(split_entries(&user, expand, env));
    Ok(combined)
}
