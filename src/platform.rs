//! Locating the Steam installation directory.
//!
//! # Platform-Specific Behavior
//!
//! ## Windows
//! - Reads `InstallPath` from the registry with `reg query`
//! - The 32-bit view (`WOW6432Node`) is checked before the native key
//!
//! ## Linux
//! - `~/.steam/steam` (symlink maintained by the Steam runtime)
//! - `~/.local/share/Steam`
//! - `~/.var/app/com.valvesoftware.Steam/data/Steam` (Flatpak)
//!
//! ## macOS
//! - `~/Library/Application Support/Steam`

use crate::config::ScanConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Registry keys holding Steam's `InstallPath`, in lookup order.
pub const REGISTRY_KEYS: [&str; 2] = [
    r"HKLM\SOFTWARE\WOW6432Node\Valve\Steam",
    r"HKLM\SOFTWARE\Valve\Steam",
];

/// Registry value holding the install directory.
pub const INSTALL_PATH_VALUE: &str = "InstallPath";

/// Finds the Steam base directory.
///
/// Returns `Ok(None)` when Steam is simply not installed and
/// `Err(PlatformUnsupported)` when this platform has no way to look it up.
/// A configured override wins over platform lookup but must exist on disk.
pub fn resolve_base_path(config: &ScanConfig) -> Result<Option<PathBuf>> {
    if let Some(dir) = &config.steam_dir {
        if dir.is_dir() {
            debug!("Using configured Steam directory {:?}", dir);
            return Ok(Some(dir.clone()));
        }
        debug!("Configured Steam directory {:?} does not exist", dir);
        return Ok(None);
    }

    let candidates = platform_candidates()?;
    Ok(first_existing(candidates))
}

/// Returns the first candidate that is non-empty and exists as a directory.
fn first_existing(candidates: Vec<PathBuf>) -> Option<PathBuf> {
    candidates
        .into_iter()
        .filter(|path| !path.as_os_str().is_empty())
        .find(|path| {
            let exists = path.is_dir();
            if !exists {
                debug!("Steam candidate {:?} does not exist", path);
            }
            exists
        })
}

#[cfg(target_os = "windows")]
fn platform_candidates() -> Result<Vec<PathBuf>> {
    Ok(REGISTRY_KEYS
        .iter()
        .filter_map(|key| query_registry(key, INSTALL_PATH_VALUE))
        .map(PathBuf::from)
        .collect())
}

#[cfg(target_os = "linux")]
fn platform_candidates() -> Result<Vec<PathBuf>> {
    let Some(home) = dirs::home_dir() else {
        return Ok(Vec::new());
    };
    Ok(vec![
        home.join(".steam").join("steam"),
        home.join(".local").join("share").join("Steam"),
        home.join(".var")
            .join("app")
            .join("com.valvesoftware.Steam")
            .join("data")
            .join("Steam"),
    ])
}

#[cfg(target_os = "macos")]
fn platform_candidates() -> Result<Vec<PathBuf>> {
    let Some(home) = dirs::home_dir() else {
        return Ok(Vec::new());
    };
    Ok(vec![home
        .join("Library")
        .join("Application Support")
        .join("Steam")])
}

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
fn platform_candidates() -> Result<Vec<PathBuf>> {
    Err(crate::error::LibraryError::PlatformUnsupported)
}

/// Runs `reg query <key> /v <value>` and returns the value's data.
#[cfg(target_os = "windows")]
fn query_registry(key: &str, value: &str) -> Option<String> {
    use std::process::Command;

    let output = match Command::new("reg").args(["query", key, "/v", value]).output() {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!("Failed to run reg query for {}: {}", key, e);
            return None;
        }
    };

    if !output.status.success() {
        debug!("reg query found no {} under {}", value, key);
        return None;
    }

    parse_reg_query_output(&String::from_utf8_lossy(&output.stdout), value)
}

/// Extracts the data of `value` from `reg query` output.
///
/// The relevant line looks like
/// `    InstallPath    REG_SZ    C:\Program Files (x86)\Steam`.
pub fn parse_reg_query_output(output: &str, value: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let name = parts.next()?;
        if !name.eq_ignore_ascii_case(value) {
            return None;
        }
        let rest = parts.next()?.trim_start();
        let (kind, data) = rest.split_once(char::is_whitespace)?;
        if !kind.starts_with("REG_") {
            return None;
        }
        let data = data.trim();
        (!data.is_empty()).then(|| data.to_string())
    })
}

/// Directory holding manifests for a library root.
pub fn steamapps_dir(library: &Path) -> PathBuf {
    library.join("steamapps")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const REG_OUTPUT: &str = concat!(
        "\r\nHKEY_LOCAL_MACHINE\\SOFTWARE\\WOW6432Node\\Valve\\Steam\r\n",
        "    InstallPath    REG_SZ    C:\\Program Files (x86)\\Steam\r\n\r\n",
    );

    #[test]
    fn parses_reg_sz_value() {
        assert_eq!(
            parse_reg_query_output(REG_OUTPUT, "InstallPath").as_deref(),
            Some(r"C:\Program Files (x86)\Steam")
        );
    }

    #[test]
    fn value_name_is_case_insensitive() {
        assert!(parse_reg_query_output(REG_OUTPUT, "installpath").is_some());
    }

    #[test]
    fn missing_or_empty_value() {
        assert_eq!(parse_reg_query_output(REG_OUTPUT, "SteamExe"), None);
        let empty = "    InstallPath    REG_SZ    \r\n";
        assert_eq!(parse_reg_query_output(empty, "InstallPath"), None);
        assert_eq!(parse_reg_query_output("", "InstallPath"), None);
    }

    #[test]
    fn configured_dir_wins() {
        let tmp = TempDir::new().unwrap();
        let config = ScanConfig::default().with_steam_dir(tmp.path());
        let resolved = resolve_base_path(&config).unwrap();
        assert_eq!(resolved.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn configured_dir_must_exist() {
        let tmp = TempDir::new().unwrap();
        let config = ScanConfig::default().with_steam_dir(tmp.path().join("gone"));
        assert_eq!(resolve_base_path(&config).unwrap(), None);
    }

    #[test]
    fn first_existing_skips_missing_and_empty() {
        let tmp = TempDir::new().unwrap();
        let found = first_existing(vec![
            PathBuf::new(),
            tmp.path().join("missing"),
            tmp.path().to_path_buf(),
        ]);
        assert_eq!(found.as_deref(), Some(tmp.path()));
    }
}
