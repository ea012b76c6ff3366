//! Reading `appmanifest_<id>.acf` files from a library folder.

use crate::app::InstalledApp;
use crate::config::ScanConfig;
use crate::platform::steamapps_dir;
use crate::vdf::{self, Key};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// `appmanifest_570.acf` → `570`
static MANIFEST_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^appmanifest_(\d+)\.acf$").unwrap());

/// Extracts the app id from a manifest file name.
pub fn manifest_app_id(file_name: &str) -> Option<u32> {
    MANIFEST_FILE
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|id| *id > 0)
}

/// Builds an app from manifest text.
///
/// `name` and `installdir` are required; without either the manifest is
/// ignored. Numeric fields that are missing or malformed fall back to 0
/// (`SizeOnDisk`) or `None`.
pub fn parse_manifest(id: u32, text: &str, library: &Path) -> Option<InstalledApp> {
    let name = vdf::string_field(text, Key::Name)?;
    let install_dir = vdf::string_field(text, Key::InstallDir)?;

    Some(InstalledApp {
        id,
        name,
        install_dir: steamapps_dir(library).join("common").join(install_dir),
        size_on_disk: vdf::numeric_field(text, Key::SizeOnDisk).unwrap_or(0),
        last_updated: vdf::numeric_field(text, Key::LastUpdated),
        state_flags: vdf::numeric_field(text, Key::StateFlags),
    })
}

/// Scans `<library>/steamapps` for installed apps.
///
/// Returns an empty list when the folder is missing or unreadable. Files
/// that fail to read are skipped without aborting the scan. Results are
/// ordered by id, then by file name, so `appmanifest_0570.acf` comes
/// before `appmanifest_570.acf` on every platform.
pub fn scan_library(library: &Path, config: &ScanConfig) -> Vec<InstalledApp> {
    let dir = steamapps_dir(library);
    if !dir.is_dir() {
        debug!("No steamapps folder in {:?}", library);
        return Vec::new();
    }

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to read directory {:?}: {}", dir, e);
            return Vec::new();
        }
    };

    let mut apps = Vec::new();

    for entry in entries.flatten() {
        let Ok(file_name) = entry.file_name().into_string() else {
            continue;
        };
        let Some(id) = manifest_app_id(&file_name) else {
            continue;
        };

        if config.is_reserved(id) {
            continue;
        }

        let path = entry.path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read manifest {:?}: {}", path, e);
                continue;
            }
        };

        match parse_manifest(id, &text, library) {
            Some(app) => apps.push((file_name, app)),
            None => debug!("Manifest {:?} has no name or installdir", path),
        }
    }

    // read_dir order is platform dependent
    apps.sort_by(|(a_file, a), (b_file, b)| a.id.cmp(&b.id).then_with(|| a_file.cmp(b_file)));
    apps.into_iter().map(|(_, app)| app).collect()
}
