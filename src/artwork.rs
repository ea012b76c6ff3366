//! Header artwork for apps, for display in the launcher list.
//!
//! The Steam client keeps downloaded artwork under `appcache/librarycache`.
//! Older clients store flat files (`570_header.jpg`); newer ones use a folder
//! per app (`570/header.jpg`). When neither exists the public CDN URL is used.

use std::path::{Path, PathBuf};

const CDN_BASE: &str = "https://cdn.cloudflare.steamstatic.com/steam/apps";

/// Where a header image can be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artwork {
    Local(PathBuf),
    Remote(String),
}

impl Artwork {
    /// `file://` URL for local images, the CDN URL otherwise.
    pub fn url(&self) -> String {
        match self {
            Artwork::Local(path) => format!("file://{}", path.display()),
            Artwork::Remote(url) => url.clone(),
        }
    }
}

pub fn library_cache_dir(base: &Path) -> PathBuf {
    base.join("appcache").join("librarycache")
}

pub fn header_cdn_url(id: u32) -> String {
    format!("{}/{}/header.jpg", CDN_BASE, id)
}

/// Finds the header image for `id`, preferring the client's local cache.
pub fn header_image(base: &Path, id: u32) -> Artwork {
    let cache = library_cache_dir(base);
    let candidates = [
        cache.join(format!("{}_header.jpg", id)),
        cache.join(id.to_string()).join("header.jpg"),
    ];

    candidates
        .into_iter()
        .find(|path| path.is_file())
        .map(Artwork::Local)
        .unwrap_or_else(|| Artwork::Remote(header_cdn_url(id)))
}
