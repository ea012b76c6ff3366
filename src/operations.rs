//! Actions a launcher can take on an installed app.
//!
//! Everything here hands a URI or path to the operating system's default
//! handler and returns immediately:
//! - Launch: `steam://rungameid/<id>`
//! - Store page: `https://store.steampowered.com/app/<id>/`
//! - Validate / uninstall: delegated to the Steam client via `steam://` URIs
//! - Install folder: opened in the file manager
//!
//! Steam's own files are never modified from here.

use crate::InstalledApp;
use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

pub fn launch_uri(id: u32) -> String {
    format!("steam://rungameid/{}", id)
}

pub fn store_url(id: u32) -> String {
    format!("https://store.steampowered.com/app/{}/", id)
}

pub fn validate_uri(id: u32) -> String {
    format!("steam://validate/{}", id)
}

pub fn uninstall_uri(id: u32) -> String {
    format!("steam://uninstall/{}", id)
}

/// Starts the app through the Steam client.
pub fn launch_app(id: u32) -> Result<()> {
    open_target(&launch_uri(id))
}

/// Opens the app's store page in the default browser.
pub fn open_store_page(id: u32) -> Result<()> {
    open_target(&store_url(id))
}

/// Asks the Steam client to verify the app's files.
pub fn validate_app(id: u32) -> Result<()> {
    open_target(&validate_uri(id))
}

/// Asks the Steam client to uninstall the app. Steam shows its own confirmation.
pub fn request_uninstall(id: u32) -> Result<()> {
    open_target(&uninstall_uri(id))
}

/// Opens the app's install directory in the file manager.
pub fn open_install_dir(app: &InstalledApp) -> Result<()> {
    if !app.install_dir.exists() {
        bail!("Install directory does not exist: {:?}", app.install_dir);
    }
    open_path(&app.install_dir)
}

fn open_path(path: &Path) -> Result<()> {
    let target = path
        .to_str()
        .context(format!("Install directory is not valid UTF-8: {:?}", path))?;
    open_target(target)
}

/// Hands a URI or path to the platform's default handler without waiting for it.
pub fn open_target(target: &str) -> Result<()> {
    let (program, args) = opener_command(target);
    debug!("Opening {} with {}", target, program);

    Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context(format!("Failed to open {}", target))?;

    Ok(())
}

/// Program and arguments that open `target` with the default handler.
pub fn opener_command(target: &str) -> (&'static str, Vec<String>) {
    #[cfg(target_os = "windows")]
    {
        // The empty string is the window title `start` expects first.
        ("cmd", vec!["/C".into(), "start".into(), String::new(), target.into()])
    }

    #[cfg(target_os = "macos")]
    {
        ("open", vec![target.into()])
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        ("xdg-open", vec![target.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn uris() {
        assert_eq!(launch_uri(570), "steam://rungameid/570");
        assert_eq!(store_url(570), "https://store.steampowered.com/app/570/");
        assert_eq!(validate_uri(570), "steam://validate/570");
        assert_eq!(uninstall_uri(570), "steam://uninstall/570");
    }

    #[test]
    fn opener_passes_target_last() {
        let (_, args) = opener_command("steam://rungameid/570");
        assert_eq!(args.last().map(String::as_str), Some("steam://rungameid/570"));
    }

    #[test]
    fn missing_install_dir_is_an_error() {
        let app = InstalledApp {
            id: 570,
            name: "Dota 2".to_string(),
            install_dir: PathBuf::from("/definitely/not/here/dota 2 beta"),
            size_on_disk: 0,
            last_updated: None,
            state_flags: None,
        };
        assert!(open_install_dir(&app).is_err());
    }
}
