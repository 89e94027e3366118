use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use walkdir::DirEntry;

pub const DEFAULT_EXTENSIONS: [&str; 2] = ["txt", "text"];

/// Set of file name suffixes that mark a path as a text file.
///
/// Suffixes are kept lowercase and without the leading dot; matching is
/// ASCII case-insensitive against the final segment of the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Extensions {
    suffixes: Vec<String>,
}

impl Default for Extensions {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

impl From<Vec<String>> for Extensions {
    fn from(list: Vec<String>) -> Self {
        Self::new(list)
    }
}

impl From<Extensions> for Vec<String> {
    fn from(extensions: Extensions) -> Self {
        extensions.suffixes
    }
}

impl Extensions {
    pub fn new<I, S>(list: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut suffixes: Vec<String> = Vec::new();
        for ext in list {
            let ext = ext.as_ref().trim().trim_start_matches('.');
            if ext.is_empty() {
                continue;
            }
            let ext = ext.to_ascii_lowercase();
            if !suffixes.contains(&ext) {
                suffixes.push(ext);
            }
        }
        Self { suffixes }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.suffixes
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    /// Name-only half of the predicate: does the final segment end in one
    /// of the suffixes? A name like `report.txt.html` only has `.html` as its
    /// suffix and does not match.
    pub fn matches_name(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.as_encoded_bytes();

        self.suffixes.iter().any(|ext| {
            let ext = ext.as_bytes();
            let Some(dot) = name.len().checked_sub(ext.len() + 1) else {
                return false;
            };
            name[dot] == b'.' && name[dot + 1..].eq_ignore_ascii_case(ext)
        })
    }

    /// Full predicate: a regular file (after following links) with a
    /// matching suffix. Missing paths and metadata errors are `false`.
    pub fn matches(&self, path: &Path) -> bool {
        self.matches_name(path) && is_regular_file(path)
    }

    /// Same predicate for an entry the walker already resolved, without
    /// another stat. Follows links only if the walk does.
    pub fn is_match_file(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_file() && self.matches_name(entry.path())
    }
}

fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.is_file())
}

/// Returns true if `path` is a regular file ending in `.txt` or `.text`,
/// compared case-insensitively.
pub fn is_text(path: &Path) -> bool {
    Extensions::default().matches(path)
}

/// Name-only check for a `.txt` or `.text` suffix; does not touch the filesystem.
pub fn has_text_extension(path: &Path) -> bool {
    Extensions::default().matches_name(path)
}
