//! Fatal conditions of a library scan.
//!
//! Only these abort a scan. Unreadable manifests, missing library folders and
//! manifests without a name are logged and skipped instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Steam installation lookup is not supported on this platform")]
    PlatformUnsupported,

    #[error("Steam installation not found")]
    NotFound,
}

pub type Result<T> = std::result::Result<T, LibraryError>;
