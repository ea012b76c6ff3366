//! Library folder discovery from `steamapps/libraryfolders.vdf`.

use crate::platform::steamapps_dir;
use crate::vdf;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const LIBRARY_FOLDERS_FILE: &str = "libraryfolders.vdf";

/// Lists every library root for a Steam installation.
///
/// The base path always comes first, followed by each `"path"` entry in
/// `libraryfolders.vdf` that exists on disk. Duplicates are kept; the
/// aggregator resolves them by app id. A missing or unreadable descriptor
/// yields just the base path.
pub fn list_library_paths(base: &Path) -> Vec<PathBuf> {
    let mut paths = vec![base.to_path_buf()];
    let descriptor = steamapps_dir(base).join(LIBRARY_FOLDERS_FILE);

    if !descriptor.exists() {
        debug!("No library descriptor at {:?}", descriptor);
        return paths;
    }

    let text = match fs::read_to_string(&descriptor) {
        Ok(text) => text,
        Err(e) => {
            warn!("Failed to read library descriptor {:?}: {}", descriptor, e);
            return paths;
        }
    };

    for raw in vdf::library_paths(&text) {
        let path = PathBuf::from(&raw);
        if path.exists() {
            paths.push(path);
        } else {
            debug!("Skipping missing library folder {:?}", path);
        }
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_descriptor(base: &Path, body: &str) {
        let steamapps = base.join("steamapps");
        fs::create_dir_all(&steamapps).unwrap();
        fs::write(steamapps.join(LIBRARY_FOLDERS_FILE), body).unwrap();
    }

    fn vdf_path(path: &Path) -> String {
        path.to_string_lossy().replace('\\', "\\\\")
    }

    #[test]
    fn base_only_without_descriptor() {
        let base = TempDir::new().unwrap();
        assert_eq!(list_library_paths(base.path()), vec![base.path().to_path_buf()]);
    }

    #[test]
    fn includes_existing_extra_libraries() {
        let base = TempDir::new().unwrap();
        let extra = TempDir::new().unwrap();
        let body = format!(
            "\"libraryfolders\"\n{{\n\
             \t\"0\"\n\t{{\n\t\t\"path\"\t\t\"{}\"\n\t}}\n\
             \t\"1\"\n\t{{\n\t\t\"path\"\t\t\"{}\"\n\t}}\n\
             }}\n",
            vdf_path(extra.path()),
            vdf_path(&base.path().join("nowhere")),
        );
        write_descriptor(base.path(), &body);

        let paths = list_library_paths(base.path());
        assert_eq!(paths, vec![base.path().to_path_buf(), extra.path().to_path_buf()]);
    }

    #[test]
    fn base_listed_again_is_not_removed() {
        let base = TempDir::new().unwrap();
        let body = format!(
            "\"libraryfolders\"\n{{\n\t\"0\"\n\t{{\n\t\t\"path\"\t\t\"{}\"\n\t}}\n}}\n",
            vdf_path(base.path())
        );
        write_descriptor(base.path(), &body);

        let paths = list_library_paths(base.path());
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], paths[1]);
    }

    #[test]
    fn unreadable_descriptor_degrades_to_base() {
        let base = TempDir::new().unwrap();
        // A directory where the file should be makes read_to_string fail.
        fs::create_dir_all(base.path().join("steamapps").join(LIBRARY_FOLDERS_FILE)).unwrap();
        assert_eq!(list_library_paths(base.path()), vec![base.path().to_path_buf()]);
    }
}
