use std::path::PathBuf;

/// Environment variable that points the scanner at a specific Steam directory.
pub const STEAM_DIR_ENV: &str = "STEAMDEPOT_STEAM_DIR";

/// Steam's own housekeeping apps, never listed as games.
/// 228980: Steamworks Common Redistributables
/// 1070560: Steam Linux Runtime
pub const RESERVED_APP_IDS: [u32; 2] = [228980, 1070560];

/// Options for a library scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Use this directory instead of asking the platform where Steam lives.
    pub steam_dir: Option<PathBuf>,
    /// App ids skipped during manifest scanning.
    pub reserved_ids: Vec<u32>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            steam_dir: None,
            reserved_ids: RESERVED_APP_IDS.to_vec(),
        }
    }
}

impl ScanConfig {
    /// Default options plus the `STEAMDEPOT_STEAM_DIR` override, if set and non-empty.
    pub fn from_env() -> Self {
        let steam_dir = std::env::var_os(STEAM_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self {
            steam_dir,
            ..Self::default()
        }
    }

    pub fn with_steam_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.steam_dir = Some(dir.into());
        self
    }

    pub fn is_reserved(&self, id: u32) -> bool {
        self.reserved_ids.contains(&id)
    }
}
