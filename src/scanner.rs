//! Line-oriented corpus scanning.
//!
//! The scanner treats documentation and code alike as regex-scannable text.
//! That is deliberately low-precision: distinguishing a real property
//! reference from a method call that happens to look like one is the job of
//! the pass structure in [`crate::reconcile`], not of a full parser.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{AuditError, Result};
use crate::filter::SearchFilter;

/// A single observation of a key in a scanned file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Path of the file, relative to the scan root.
    pub file: PathBuf,
    /// 1-based physical line number, blank lines included, so it matches an
    /// editor's gutter.
    pub line_number: usize,
    /// The raw line text.
    pub line: String,
    /// The substring captured by the `key` group.
    pub matched: String,
}

/// Keys mapped to every location they were observed at.
///
/// Backed by a [`BTreeMap`], so iteration is always sorted by key regardless
/// of the order locations were inserted in. Locations within a key keep
/// insertion order: traversal order, then line order within a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult(BTreeMap<String, Vec<Location>>);

impl ScanResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Append a location to a key, creating the entry on first encounter.
    pub fn insert(&mut self, key: String, location: Location) {
        self.0.entry(key).or_default().push(location);
    }

    /// Insert a full entry, replacing any existing locations for the key.
    pub fn insert_entry(&mut self, key: String, locations: Vec<Location>) {
        self.0.insert(key, locations);
    }

    /// Locations recorded for a key, if any.
    pub fn get(&self, key: &str) -> Option<&[Location]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// Whether the key was observed at least once.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no key was observed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<Location>> {
        self.0.iter()
    }

    /// Keys-only set difference: entries of `self` whose key is absent from
    /// `other`, with `self`'s locations preserved. A key present in `other`
    /// is dropped entirely; there is no location-level diffing.
    pub fn difference(&self, other: &ScanResult) -> ScanResult {
        ScanResult(
            self.0
                .iter()
                .filter(|(key, _)| !other.contains_key(key))
                .map(|(key, locations)| (key.clone(), locations.clone()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a ScanResult {
    type Item = (&'a String, &'a Vec<Location>);
    type IntoIter = btree_map::Iter<'a, String, Vec<Location>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Scans a file tree line by line for key references.
#[derive(Debug)]
pub struct Searcher {
    root: PathBuf,
    regex: Regex,
    filter: SearchFilter,
}

impl Searcher {
    /// Build a searcher over `root`. The pattern must contain a
    /// `(?P<key>...)` named capture group; the capture is the candidate key.
    pub fn new(root: impl Into<PathBuf>, pattern: &str, filter: SearchFilter) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| AuditError::InvalidRegex {
            pattern: pattern.to_string(),
            source,
        })?;
        if !regex.capture_names().flatten().any(|name| name == "key") {
            return Err(AuditError::MissingKeyGroup { pattern: pattern.to_string() });
        }
        Ok(Self { root: root.into(), regex, filter })
    }

    /// Scan every included file under the root and accumulate key locations.
    ///
    /// Traversal is sorted by file name, so the result is identical across
    /// runs even though filesystem enumeration order is not. An unreadable
    /// file aborts the scan; partial results are never returned.
    pub fn find(&self) -> Result<ScanResult> {
        let mut result = ScanResult::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path =
                    e.path().map(Path::to_path_buf).unwrap_or_else(|| self.root.clone());
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                AuditError::Io { path, source }
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative =
                entry.path().strip_prefix(&self.root).unwrap_or(entry.path()).to_path_buf();
            if !self.filter.is_included_file(&relative) {
                continue;
            }
            self.scan_file(entry.path(), &relative, &mut result)?;
        }
        debug!("Scan of {} found {} keys", self.root.display(), result.len());
        Ok(result)
    }

    fn scan_file(&self, path: &Path, relative: &Path, result: &mut ScanResult) -> Result<()> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| AuditError::Io { path: path.to_path_buf(), source })?;
        for (idx, line) in content.lines().enumerate() {
            for captures in self.regex.captures_iter(line) {
                let Some(key) = captures.name("key") else { continue };
                let key = key.as_str();
                if !self.filter.is_accepted_property(key) {
                    continue;
                }
                result.insert(
                    key.to_string(),
                    Location {
                        file: relative.to_path_buf(),
                        line_number: idx + 1,
                        line: line.to_string(),
                        matched: key.to_string(),
                    },
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn searcher(root: &Path, pattern: &str) -> Searcher {
        let filter = SearchFilter::new("**/*.txt", &[], Vec::new()).unwrap();
        Searcher::new(root, pattern, filter).unwrap()
    }

    #[test]
    fn test_rejects_regex_without_key_group() {
        let dir = TempDir::new().unwrap();
        let filter = SearchFilter::new("**/*", &[], Vec::new()).unwrap();
        let err = Searcher::new(dir.path(), r"ogham\.[a-z.]+", filter).unwrap_err();
        assert!(matches!(err, AuditError::MissingKeyGroup { .. }));
    }

    #[test]
    fn test_rejects_invalid_regex() {
        let dir = TempDir::new().unwrap();
        let filter = SearchFilter::new("**/*", &[], Vec::new()).unwrap();
        let err = Searcher::new(dir.path(), r"(?P<key>[", filter).unwrap_err();
        assert!(matches!(err, AuditError::InvalidRegex { .. }));
    }

    #[test]
    fn test_line_numbers_count_blank_lines() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("doc.txt"),
            "ogham.smtp.host first\n\nogham.smtp.host again\n\n\nogham.smtp.host last\n",
        )
        .unwrap();

        let result = searcher(dir.path(), r"(?P<key>ogham\.[a-z.]+)").find().unwrap();
        let locations = result.get("ogham.smtp.host").unwrap();
        assert_eq!(locations.len(), 3);
        let numbers: Vec<usize> = locations.iter().map(|l| l.line_number).collect();
        assert_eq!(numbers, vec![1, 3, 6]);
    }

    #[test]
    fn test_multiple_matches_per_line_each_get_a_location() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("doc.txt"), "ogham.a.b and ogham.c.d and ogham.a.b\n").unwrap();

        let result = searcher(dir.path(), r"(?P<key>ogham\.[a-z.]+)").find().unwrap();
        assert_eq!(result.get("ogham.a.b").unwrap().len(), 2);
        assert_eq!(result.get("ogham.c.d").unwrap().len(), 1);
    }

    #[test]
    fn test_keys_are_sorted_and_traversal_is_deterministic() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("z.txt"), "ogham.zz.key here\n").unwrap();
        fs::write(dir.path().join("a.txt"), "ogham.aa.key here\n").unwrap();

        let s = searcher(dir.path(), r"(?P<key>ogham\.[a-z.]+)");
        let first = s.find().unwrap();
        let second = s.find().unwrap();
        assert_eq!(first, second);
        let keys: Vec<&String> = first.keys().collect();
        assert_eq!(keys, vec!["ogham.aa.key", "ogham.zz.key"]);
    }

    #[test]
    fn test_excluded_files_are_not_scanned() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("doc.txt"), "ogham.kept.key\n").unwrap();
        fs::write(dir.path().join("skip.txt"), "ogham.dropped.key\n").unwrap();

        let excluded = vec!["skip.txt".to_string()];
        let filter = SearchFilter::new("**/*.txt", &excluded, Vec::new()).unwrap();
        let result =
            Searcher::new(dir.path(), r"(?P<key>ogham\.[a-z.]+)", filter).unwrap().find().unwrap();
        assert!(result.contains_key("ogham.kept.key"));
        assert!(!result.contains_key("ogham.dropped.key"));
    }

    #[test]
    fn test_rejected_keys_are_not_recorded() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("doc.txt"), "ogham.kept.key ogham.dropped.key\n").unwrap();

        let filter = SearchFilter::new(
            "**/*.txt",
            &[],
            vec![crate::matcher::RuleMatcher::exact("ogham.dropped.key")],
        )
        .unwrap();
        let result =
            Searcher::new(dir.path(), r"(?P<key>ogham\.[a-z.]+)", filter).unwrap().find().unwrap();
        assert!(result.contains_key("ogham.kept.key"));
        assert!(!result.contains_key("ogham.dropped.key"));
    }

    #[test]
    fn test_difference_is_keys_only() {
        let mut left = ScanResult::new();
        let loc = Location {
            file: PathBuf::from("a.txt"),
            line_number: 1,
            line: "x".to_string(),
            matched: "x".to_string(),
        };
        left.insert("shared.key".to_string(), loc.clone());
        left.insert("only.left".to_string(), loc.clone());

        let mut right = ScanResult::new();
        // Different location for the same key; the key still cancels out.
        right.insert(
            "shared.key".to_string(),
            Location {
                file: PathBuf::from("b.txt"),
                line_number: 9,
                line: "y".to_string(),
                matched: "y".to_string(),
            },
        );

        let diff = left.difference(&right);
        assert_eq!(diff.len(), 1);
        assert_eq!(diff.get("only.left").unwrap(), &[loc]);
    }
}
