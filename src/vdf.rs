//! Field extraction for Valve's KeyValues text files (`.vdf`, `.acf`).
//!
//! The files nest `"Key" "Value"` pairs inside `"Key" { ... }` blocks. Only a
//! handful of flat keys are ever needed, so values are pulled out by pattern
//! rather than by building the full tree.
//!
//! Keys are matched case-insensitively; Steam itself has written both
//! `"installdir"` and `"InstallDir"` over the years.

use regex::Regex;
use std::sync::LazyLock;

/// Builds a pattern for the first `"<key>" "<value>"` pair.
fn value_pattern(key: &str) -> Regex {
    Regex::new(&format!(r#"(?i)"{}"\s+"((?:[^"\\]|\\.)*)""#, regex::escape(key))).unwrap()
}

/// `"path"  "D:\\SteamLibrary"` lines in `libraryfolders.vdf`.
static LIBRARY_PATH: LazyLock<Regex> = LazyLock::new(|| value_pattern("path"));

static NAME: LazyLock<Regex> = LazyLock::new(|| value_pattern("name"));
static INSTALL_DIR: LazyLock<Regex> = LazyLock::new(|| value_pattern("installdir"));
static SIZE_ON_DISK: LazyLock<Regex> = LazyLock::new(|| value_pattern("SizeOnDisk"));
static LAST_UPDATED: LazyLock<Regex> = LazyLock::new(|| value_pattern("LastUpdated"));
static STATE_FLAGS: LazyLock<Regex> = LazyLock::new(|| value_pattern("StateFlags"));

/// The manifest keys the scanner reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Name,
    InstallDir,
    SizeOnDisk,
    LastUpdated,
    StateFlags,
}

impl Key {
    fn pattern(self) -> &'static Regex {
        match self {
            Key::Name => &*NAME,
            Key::InstallDir => &*INSTALL_DIR,
            Key::SizeOnDisk => &*SIZE_ON_DISK,
            Key::LastUpdated => &*LAST_UPDATED,
            Key::StateFlags => &*STATE_FLAGS,
        }
    }
}

/// Undo KeyValues string escaping (`\\` and `\"`).
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Returns the unescaped value of the first `"key" "value"` pair.
pub fn string_field(text: &str, key: Key) -> Option<String> {
    key.pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| unescape(m.as_str()))
}

/// Like [`string_field`], but the value must be a base-10 number that fits `T`.
/// Anything else counts as absent.
pub fn numeric_field<T: std::str::FromStr>(text: &str, key: Key) -> Option<T> {
    let raw = string_field(text, key)?;
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Every `"path"` value in a `libraryfolders.vdf`, in file order.
pub fn library_paths(text: &str) -> Vec<String> {
    LIBRARY_PATH
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| unescape(m.as_str()))
        .filter(|value| !value.is_empty())
        .collect()
}
