//! FFI (Foreign Function Interface) bindings for the launcher UI.
//!
//! This module exposes the library scan, the display formatters and the
//! launch actions through C-compatible functions.
//!
//! # Memory Management
//!
//! - Rust allocates memory and returns pointers to the host
//! - The calling code MUST call the corresponding `_free` functions to prevent leaks
//! - Strings are null-terminated UTF-8
//!
//! # Usage from C
//!
//! ```c
//! CScanStatus status;
//! CAppList *apps = steamdepot_scan_apps(&status);
//! if (status == CScanStatus_NotFound) { /* show "Steam not installed" */ }
//! for (int i = 0; i < steamdepot_app_list_count(apps); i++) {
//!     CApp *app = steamdepot_app_list_get(apps, i);
//!     /* use app->name, app->size_label ... */
//!     steamdepot_free_app(app);
//! }
//! steamdepot_free_app_list(apps);
//! ```

use crate::artwork::header_image;
use crate::config::ScanConfig;
use crate::error::LibraryError;
use crate::format::{format_last_updated, format_relative_time, format_size};
use crate::operations::{
    launch_app, open_install_dir, open_store_page, open_target, request_uninstall, validate_app,
};
use crate::platform::resolve_base_path;
use crate::registry::collect_from;
use crate::LibraryInfo;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::path::PathBuf;
use std::ptr;
use tracing::error;

// ============================================================================
// C-Compatible Types
// ============================================================================

/// Opaque handle to a scan result
pub struct CAppList {
    info: LibraryInfo,
    base: PathBuf,
}

/// C-compatible app information
#[repr(C)]
pub struct CApp {
    pub id: u32,
    pub name: *mut c_char,
    pub install_dir: *mut c_char,
    pub size_on_disk: u64,
    /// e.g. "11.18 GB"
    pub size_label: *mut c_char,
    /// Unix seconds, 0 if the manifest has none
    pub last_updated: i64,
    /// e.g. "3 days ago" or "Unknown"
    pub last_updated_label: *mut c_char,
    /// -1 if the manifest has none
    pub state_flags: i64,
    /// file:// or https:// URL of the header image
    pub header_url: *mut c_char,
}

/// Outcome of a scan
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CScanStatus {
    Success = 0,
    NotFound = 1,
    PlatformUnsupported = 2,
}

/// Result code for operations
#[repr(C)]
pub enum CResultCode {
    Success = 0,
    Error = 1,
}

// ============================================================================
// Library Scanning
// ============================================================================

/// Scan the Steam installation for installed apps.
/// Writes the outcome to `status` when it is not null and returns null unless
/// the scan succeeded. An installation without apps is a success with an
/// empty list.
/// Caller MUST call steamdepot_free_app_list() when done.
#[no_mangle]
pub extern "C" fn steamdepot_scan_apps(status: *mut CScanStatus) -> *mut CAppList {
    let (code, list) = match scan() {
        Ok(list) => (CScanStatus::Success, Box::into_raw(Box::new(list))),
        Err(e) => {
            error!("Error scanning Steam library: {}", e);
            let code = match e {
                LibraryError::NotFound => CScanStatus::NotFound,
                LibraryError::PlatformUnsupported => CScanStatus::PlatformUnsupported,
            };
            (code, ptr::null_mut())
        }
    };

    if !status.is_null() {
        unsafe {
            *status = code;
        }
    }
    list
}

fn scan() -> Result<CAppList, LibraryError> {
    let config = ScanConfig::from_env();
    let base = resolve_base_path(&config)?.ok_or(LibraryError::NotFound)?;
    let info = collect_from(&base, &config);
    Ok(CAppList { info, base })
}

/// Get the number of apps in a list.
#[no_mangle]
pub extern "C" fn steamdepot_app_list_count(list: *const CAppList) -> c_int {
    if list.is_null() {
        return 0;
    }
    unsafe { (*list).info.count as c_int }
}

/// Get the combined size on disk of every app in a list.
#[no_mangle]
pub extern "C" fn steamdepot_app_list_total_size(list: *const CAppList) -> u64 {
    if list.is_null() {
        return 0;
    }
    unsafe { (*list).info.total_size }
}

/// Get app information at a specific index.
/// Returns a CApp struct. Caller MUST call steamdepot_free_app() when done.
#[no_mangle]
pub extern "C" fn steamdepot_app_list_get(list: *const CAppList, index: c_int) -> *mut CApp {
    if list.is_null() || index < 0 {
        return ptr::null_mut();
    }

    let list = unsafe { &*list };
    let Some(app) = list.info.apps.get(index as usize) else {
        return ptr::null_mut();
    };

    let c_app = Box::new(CApp {
        id: app.id,
        name: string_to_c_char(&app.name),
        install_dir: string_to_c_char(&app.install_dir.to_string_lossy()),
        size_on_disk: app.size_on_disk,
        size_label: string_to_c_char(&format_size(app.size_on_disk)),
        last_updated: app.last_updated.unwrap_or(0),
        last_updated_label: string_to_c_char(&format_last_updated(app.last_updated)),
        state_flags: app.state_flags.map(i64::from).unwrap_or(-1),
        header_url: string_to_c_char(&header_image(&list.base, app.id).url()),
    });

    Box::into_raw(c_app)
}

/// Free a list returned by steamdepot_scan_apps().
#[no_mangle]
pub extern "C" fn steamdepot_free_app_list(list: *mut CAppList) {
    if !list.is_null() {
        unsafe {
            let _ = Box::from_raw(list);
        }
    }
}

/// Free a CApp struct returned by steamdepot_app_list_get().
#[no_mangle]
pub extern "C" fn steamdepot_free_app(app: *mut CApp) {
    if !app.is_null() {
        unsafe {
            let a = Box::from_raw(app);
            free_c_char(a.name);
            free_c_char(a.install_dir);
            free_c_char(a.size_label);
            free_c_char(a.last_updated_label);
            free_c_char(a.header_url);
        }
    }
}

/// Serialize a scan result as JSON.
/// Caller MUST call steamdepot_free_string() when done.
#[no_mangle]
pub extern "C" fn steamdepot_app_list_json(list: *const CAppList) -> *mut c_char {
    if list.is_null() {
        return ptr::null_mut();
    }

    let info = unsafe { &(*list).info };
    match serde_json::to_string(info) {
        Ok(json) => string_to_c_char(&json),
        Err(e) => {
            error!("Error serializing app list: {}", e);
            ptr::null_mut()
        }
    }
}

// ============================================================================
// App Actions
// ============================================================================

/// Launch an app through the Steam client.
#[no_mangle]
pub extern "C" fn steamdepot_launch_app(id: u32) -> CResultCode {
    to_result_code(launch_app(id), "launching app")
}

/// Open an app's store page in the default browser.
#[no_mangle]
pub extern "C" fn steamdepot_open_store_page(id: u32) -> CResultCode {
    to_result_code(open_store_page(id), "opening store page")
}

/// Ask the Steam client to verify an app's files.
#[no_mangle]
pub extern "C" fn steamdepot_validate_app(id: u32) -> CResultCode {
    to_result_code(validate_app(id), "validating app")
}

/// Ask the Steam client to uninstall an app. Steam asks the user to confirm.
#[no_mangle]
pub extern "C" fn steamdepot_request_uninstall(id: u32) -> CResultCode {
    to_result_code(request_uninstall(id), "requesting uninstall")
}

/// Open the install directory of the app at `index` in the file manager.
#[no_mangle]
pub extern "C" fn steamdepot_open_install_dir(list: *const CAppList, index: c_int) -> CResultCode {
    if list.is_null() || index < 0 {
        return CResultCode::Error;
    }

    let list = unsafe { &*list };
    let Some(app) = list.info.apps.get(index as usize) else {
        return CResultCode::Error;
    };
    to_result_code(open_install_dir(app), "opening install directory")
}

/// Open an http(s) URL in the default browser.
#[no_mangle]
pub extern "C" fn steamdepot_open_url(url: *const c_char) -> CResultCode {
    let Some(url) = c_char_to_str(url) else {
        return CResultCode::Error;
    };
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        error!("Refusing to open non-http URL: {}", url);
        return CResultCode::Error;
    }
    to_result_code(open_target(url), "opening URL")
}

fn to_result_code(result: anyhow::Result<()>, action: &str) -> CResultCode {
    match result {
        Ok(()) => CResultCode::Success,
        Err(e) => {
            error!("Error {}: {:#}", action, e);
            CResultCode::Error
        }
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Format a byte count, e.g. "1.5 KB".
/// Caller MUST call steamdepot_free_string() when done.
#[no_mangle]
pub extern "C" fn steamdepot_format_size(bytes: u64) -> *mut c_char {
    string_to_c_char(&format_size(bytes))
}

/// Format a Unix timestamp relative to now, e.g. "Yesterday".
/// Caller MUST call steamdepot_free_string() when done.
#[no_mangle]
pub extern "C" fn steamdepot_format_relative_time(epoch_seconds: i64) -> *mut c_char {
    string_to_c_char(&format_relative_time(epoch_seconds))
}

// ============================================================================
// String Management
// ============================================================================

/// Free a string returned by FFI functions.
#[no_mangle]
pub extern "C" fn steamdepot_free_string(s: *mut c_char) {
    free_c_char(s);
}

// ============================================================================
// Helper Functions
// ============================================================================

fn string_to_c_char(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(c_str) => c_str.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

fn c_char_to_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s).to_str().ok() }
}

fn free_c_char(s: *mut c_char) {
    if !s.is_null() {
        unsafe {
            let _ = CString::from_raw(s);
        }
    }
}
