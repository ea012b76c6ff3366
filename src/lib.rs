//! SteamDepot Core Library
//!
//! Finds the local Steam installation and lists the apps installed across all
//! of its library folders, for display in a launcher UI.
//!
//! # Architecture
//!
//! This library is designed to be consumed via FFI by native launcher
//! frontends (`ffi` module), and by the `steamdepot` command-line tool.
//!
//! # Core Features Implemented
//!
//! ## Installation Discovery (`platform`, `library` modules)
//! - `resolve_base_path()` - Registry lookup on Windows, well-known folders elsewhere
//! - `list_library_paths()` - Extra library folders from `libraryfolders.vdf`
//!
//! ## App Scanning (`manifest`, `registry` modules)
//! - `scan_library()` - Parse `appmanifest_<id>.acf` files in one library folder
//! - `collect()` - Scan every library folder, drop duplicate ids, sort by name
//!
//! ## Presentation (`format`, `artwork`, `operations` modules)
//! - `format_size()`, `format_relative_time()` - Display strings
//! - `header_image()` - Local or CDN artwork for an app
//! - `launch_app()`, `open_store_page()` - Hand off to Steam or the browser
//!
//! ## Data Structures (`app` module)
//! - `InstalledApp` - One installed app read from its manifest
//! - `LibraryInfo` - Sorted, deduplicated apps with count and total size

pub mod app;
pub mod artwork;
pub mod config;
pub mod error;
pub mod ffi;
pub mod format;
pub mod library;
pub mod manifest;
pub mod operations;
pub mod platform;
pub mod registry;
pub mod vdf;

pub use app::{InstalledApp, LibraryInfo};
pub use config::ScanConfig;
pub use error::LibraryError;
pub use format::{format_relative_time, format_size};
pub use registry::{collect, collect_from, collect_with};
