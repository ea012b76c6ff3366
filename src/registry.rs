//! Installed app registry for a Steam installation.
//!
//! Ties the pieces together: find the Steam directory, list its library
//! folders, scan each folder's manifests and merge the results.
//!
//! Library folders are scanned one at a time in the order
//! [`list_library_paths`] returns them, base installation first. When the
//! same app id shows up in more than one folder the first one scanned wins.
//! Nothing is cached; every call reads the filesystem again.

use crate::app::{InstalledApp, LibraryInfo};
use crate::config::ScanConfig;
use crate::error::{LibraryError, Result};
use crate::library::list_library_paths;
use crate::manifest::scan_library;
use crate::platform::resolve_base_path;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Scans the Steam installation using settings from the environment.
pub fn collect() -> Result<LibraryInfo> {
    collect_with(&ScanConfig::from_env())
}

/// Scans the Steam installation found via `config`.
///
/// Fails with [`LibraryError::NotFound`] when Steam cannot be located and
/// [`LibraryError::PlatformUnsupported`] when this platform cannot look it
/// up. Every other problem only shrinks the result.
pub fn collect_with(config: &ScanConfig) -> Result<LibraryInfo> {
    let base = resolve_base_path(config)?.ok_or(LibraryError::NotFound)?;
    info!("Scanning Steam installation at {:?}", base);
    Ok(collect_from(&base, config))
}

/// Scans a known Steam base directory.
pub fn collect_from(base: &Path, config: &ScanConfig) -> LibraryInfo {
    let mut apps = Vec::new();

    for library in list_library_paths(base) {
        let mut found = scan_library(&library, config);
        debug!("Found {} apps in {:?}", found.len(), library);
        apps.append(&mut found);
    }

    let info = LibraryInfo::from_apps(dedupe_and_sort(apps));
    info!("Found {} installed apps", info.count);
    info
}

/// Drops repeated ids, keeping the earliest, then sorts by name.
///
/// Names compare case-insensitively; the sort is stable so apps with equal
/// names keep their scan order.
pub fn dedupe_and_sort(apps: Vec<InstalledApp>) -> Vec<InstalledApp> {
    let mut seen = HashSet::new();
    let mut unique: Vec<InstalledApp> =
        apps.into_iter().filter(|app| seen.insert(app.id)).collect();
    unique.sort_by_cached_key(|app| app.name.to_lowercase());
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn app(id: u32, name: &str, dir: &str) -> InstalledApp {
        InstalledApp {
            id,
            name: name.to_string(),
            install_dir: PathBuf::from(dir),
            size_on_disk: 1,
            last_updated: None,
            state_flags: None,
        }
    }

    #[test]
    fn first_duplicate_wins() {
        let apps = vec![
            app(570, "Dota 2", "/base"),
            app(400, "Portal", "/base"),
            app(570, "Dota 2", "/extra"),
        ];
        let unique = dedupe_and_sort(apps);
        assert_eq!(unique.len(), 2);
        let dota = unique.iter().find(|a| a.id == 570).unwrap();
        assert_eq!(dota.install_dir, PathBuf::from("/base"));
    }

    #[test]
    fn sorts_by_name_ignoring_case() {
        let apps = vec![
            app(1, "portal", "/a"),
            app(2, "Counter-Strike", "/a"),
            app(3, "dota 2", "/a"),
            app(4, "Among Us", "/a"),
        ];
        let names: Vec<String> = dedupe_and_sort(apps).into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Among Us", "Counter-Strike", "dota 2", "portal"]);
    }

    #[test]
    fn equal_names_keep_scan_order() {
        let apps = vec![app(20, "Same", "/a"), app(10, "same", "/a")];
        let ids: Vec<u32> = dedupe_and_sort(apps).into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![20, 10]);
    }

    #[test]
    fn missing_installation_is_not_found() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = ScanConfig::default().with_steam_dir(tmp.path().join("no-steam"));
        assert!(matches!(collect_with(&config), Err(LibraryError::NotFound)));
    }

    #[test]
    fn empty_installation() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = ScanConfig::default().with_steam_dir(tmp.path());
        let info = collect_with(&config).unwrap();
        assert!(info.is_empty());
        assert_eq!(info.total_size, 0);
    }
}
