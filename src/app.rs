use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `StateFlags` bit set once every depot of an app is downloaded.
const STATE_FULLY_INSTALLED: u32 = 0x4;

/// An application found in one of the Steam library folders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledApp {
    pub id: u32,
    pub name: String,
    pub install_dir: PathBuf,
    pub size_on_disk: u64,
    pub last_updated: Option<i64>,
    pub state_flags: Option<u32>,
}

impl InstalledApp {
    /// Returns true when the manifest reports a complete install.
    /// Apps without `StateFlags` are treated as installed.
    pub fn is_fully_installed(&self) -> bool {
        self.state_flags
            .map(|flags| flags & STATE_FULLY_INSTALLED != 0)
            .unwrap_or(true)
    }
}

/// Result of a full library scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryInfo {
    pub apps: Vec<InstalledApp>,
    pub total_size: u64,
    pub count: usize,
}

impl LibraryInfo {
    /// Builds the summary from an already deduplicated, sorted list.
    pub fn from_apps(apps: Vec<InstalledApp>) -> Self {
        let total_size = apps.iter().map(|app| app.size_on_disk).sum();
        let count = apps.len();
        Self {
            apps,
            total_size,
            count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    pub fn find(&self, id: u32) -> Option<&InstalledApp> {
        self.apps.iter().find(|app| app.id == id)
    }

    /// Case-insensitive substring match on the app name.
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&InstalledApp> {
        let needle = query.trim().to_lowercase();
        self.apps
            .iter()
            .filter(|app| needle.is_empty() || app.name.to_lowercase().contains(&needle))
            .collect()
    }
}
