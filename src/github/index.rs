// src/github/index.rs
// =============================================================================
// Builds the language index: "rust" -> SHA of Rust.gitignore
//
// How it works:
// 1. List the root tree of github/gitignore@main (not recursive, so the
//    Global/ and community/ folders show up as single "tree" entries)
// 2. Keep plain files ("blob") whose path contains ".gitignore"
// 3. Strip the ".gitignore" suffix and lowercase what's left
//
// Rust concepts:
// - BTreeMap: a sorted map, so listing languages is deterministic
// - strip_suffix: returns Option<&str>, None when the suffix is absent
// =============================================================================

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::client::{TemplateSource, TreeEntry, REPO_BRANCH};
use crate::error::AppError;

/// Filename marker identifying template files in the tree listing.
pub const TEMPLATE_MARKER: &str = ".gitignore";

/// Lowercase language name -> blob SHA.
///
/// Built once per run and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageIndex {
    entries: BTreeMap<String, String>,
}

impl LanguageIndex {
    /// Derives the index from tree entries.
    ///
    /// When two entries produce the same key the later one wins.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a TreeEntry>,
    {
        let mut index = BTreeMap::new();

        for entry in entries {
            if entry.kind != "blob" {
                continue;
            }

            if !entry.path.contains(TEMPLATE_MARKER) {
                continue;
            }

            index.insert(language_key(&entry.path), entry.sha.clone());
        }

        Self { entries: index }
    }

    /// SHA for a language, compared case-insensitively.
    pub fn lookup(&self, language: &str) -> Option<&str> {
        self.entries
            .get(&language.to_lowercase())
            .map(String::as_str)
    }

    /// Language names in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// "Rust.gitignore" -> "rust"
//
// A path that merely contains the marker (e.g. "x.gitignore.bak") keeps its
// full name, lowercased.
fn language_key(path: &str) -> String {
    path.strip_suffix(TEMPLATE_MARKER)
        .unwrap_or(path)
        .to_lowercase()
}

/// Lists the template repository and builds the language index.
pub async fn build_index<S>(source: &S) -> Result<LanguageIndex, AppError>
where
    S: TemplateSource + ?Sized,
{
    let tree = source
        .get_tree(REPO_BRANCH)
        .await
        .map_err(AppError::RemoteIndex)?;

    if tree.truncated {
        warn!(tree = %tree.sha, "tree listing was truncated by GitHub; some languages may be missing");
    }

    let index = LanguageIndex::from_entries(&tree.entries);
    if index.is_empty() {
        warn!(tree = %tree.sha, "no templates found in tree listing");
    }
    debug!(tree = %tree.sha, entries = tree.entries.len(), languages = index.len(), "built language index");

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, kind: &str, sha: &str) -> TreeEntry {
        TreeEntry {
            path: path.to_string(),
            kind: kind.to_string(),
            sha: sha.to_string(),
        }
    }

    #[test]
    fn test_keys_are_stripped_and_lowercased() {
        let entries = vec![
            entry("Go.gitignore", "blob", "sha-1"),
            entry("Python.gitignore", "blob", "sha-2"),
            entry("VisualStudio.gitignore", "blob", "sha-3"),
        ];

        let index = LanguageIndex::from_entries(&entries);
        assert_eq!(index.len(), 3);
        assert_eq!(index.lookup("go"), Some("sha-1"));
        assert_eq!(index.lookup("python"), Some("sha-2"));
        assert_eq!(index.lookup("visualstudio"), Some("sha-3"));
    }

    #[test]
    fn test_non_blobs_and_unmarked_files_are_excluded() {
        let entries = vec![
            entry("Global", "tree", "sha-tree"),
            entry("Weird.gitignore", "tree", "sha-dir"),
            entry("README.md", "blob", "sha-readme"),
            entry("LICENSE", "blob", "sha-license"),
            entry("Rust.gitignore", "blob", "sha-rust"),
        ];

        let index = LanguageIndex::from_entries(&entries);
        assert_eq!(index.languages().collect::<Vec<_>>(), vec!["rust"]);
    }

    #[test]
    fn test_marker_not_at_end_keeps_full_path() {
        let entries = vec![entry("Old.gitignore.bak", "blob", "sha-bak")];

        let index = LanguageIndex::from_entries(&entries);
        assert_eq!(index.lookup("old.gitignore.bak"), Some("sha-bak"));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let entries = vec![
            entry("Go.gitignore", "blob", "first"),
            entry("GO.gitignore", "blob", "second"),
        ];

        let index = LanguageIndex::from_entries(&entries);
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("go"), Some("second"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let entries = vec![entry("Python.gitignore", "blob", "sha-2")];

        let index = LanguageIndex::from_entries(&entries);
        assert_eq!(index.lookup("PyThOn"), Some("sha-2"));
        assert_eq!(index.lookup("nosuchlang"), None);
    }
}
