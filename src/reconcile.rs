//! Three-pass corpus reconciliation and docs/code cross-referencing.
//!
//! One generic pipeline handles both sides of the audit. A corpus is scanned
//! three times over the same files with progressively stricter filtering, and
//! set differences between the passes explain why a key was dropped:
//!
//! 1. **maximal** — broad candidate regex, no exclusions at all: the widest
//!    superset, including false positives such as method calls that look
//!    like dotted keys.
//! 2. **heuristic** — strict, delimiter-anchored regex plus structural file
//!    exclusions, but no manual key rules.
//! 3. **final** — heuristic plus the manually curated exclusion rules: the
//!    authoritative set used for cross-referencing.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::filter::SearchFilter;
use crate::matcher::RuleMatcher;
use crate::scanner::{Location, ScanResult, Searcher};

/// Everything needed to scan one corpus: where to look, what a key looks
/// like, and what to ignore.
#[derive(Debug, Clone)]
pub struct CorpusConfig {
    /// Directory the scan starts from.
    pub root: PathBuf,
    /// Include glob for candidate files, e.g. `**/*.adoc`.
    pub include_glob: String,
    /// Broad regex for the maximal pass. Its `key` language must be a
    /// superset of `property_pattern`'s, or the pass chain loses its
    /// superset guarantee.
    pub candidate_pattern: String,
    /// Strict regex for the heuristic and final passes.
    pub property_pattern: String,
    /// Gitignore-style structural file exclusions, applied from the
    /// heuristic pass on.
    pub structural_excludes: Vec<String>,
    /// Manually curated key exclusions, applied in the final pass only.
    pub manual_matchers: Vec<RuleMatcher>,
}

/// Outcome of the three scan passes over one corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusScan {
    /// The authoritative key set (final pass).
    pub properties: ScanResult,
    /// Keys present in the maximal pass but dropped by structural filtering.
    pub automatically_skipped: ScanResult,
    /// Keys that survived structural filtering but were dropped by a manual
    /// rule. Surfaced so a maintainer can check the rule is still warranted.
    pub manually_skipped: ScanResult,
}

/// Run the maximal, heuristic and final passes over one corpus.
pub fn scan_corpus(config: &CorpusConfig) -> Result<CorpusScan> {
    info!("Scanning {} ({})", config.root.display(), config.include_glob);

    let unfiltered = SearchFilter::new(&config.include_glob, &[], Vec::new())?;
    let structural =
        SearchFilter::new(&config.include_glob, &config.structural_excludes, Vec::new())?;
    let full = SearchFilter::new(
        &config.include_glob,
        &config.structural_excludes,
        config.manual_matchers.clone(),
    )?;

    let maximal = Searcher::new(&config.root, &config.candidate_pattern, unfiltered)?.find()?;
    let heuristic = Searcher::new(&config.root, &config.property_pattern, structural)?.find()?;
    let properties = Searcher::new(&config.root, &config.property_pattern, full)?.find()?;

    debug!(
        "Passes over {}: maximal {} keys, heuristic {}, final {}",
        config.root.display(),
        maximal.len(),
        heuristic.len(),
        properties.len()
    );

    let automatically_skipped = maximal.difference(&heuristic);
    let manually_skipped = heuristic.difference(&properties);

    info!(
        "Corpus {}: {} properties, {} automatically skipped, {} manually skipped",
        config.root.display(),
        properties.len(),
        automatically_skipped.len(),
        manually_skipped.len()
    );

    Ok(CorpusScan { properties, automatically_skipped, manually_skipped })
}

/// Documentation-versus-code classification of the two final key sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossReference {
    /// Documented keys that do not exist in code (documentation errors).
    pub missing: ScanResult,
    /// Keys present in both corpora, carrying their documentation locations.
    pub documented: ScanResult,
    /// Keys defined in code but never documented, carrying their code
    /// locations.
    pub undocumented: ScanResult,
}

/// Classify the docs and code final sets against each other.
///
/// The location sources are asymmetric on purpose: `documented` reports
/// where the explanation lives (docs), `undocumented` reports where the gap
/// needs fixing (code).
pub fn cross_reference(docs: &CorpusScan, code: &CorpusScan) -> CrossReference {
    let mut missing = ScanResult::new();
    let mut documented = ScanResult::new();
    let mut undocumented = ScanResult::new();

    for (key, doc_locations) in &docs.properties {
        if !code.properties.contains_key(key) {
            missing.insert_entry(key.clone(), doc_locations.clone());
        }
    }

    for (key, code_locations) in &code.properties {
        match docs.properties.get(key) {
            Some(doc_locations) => documented.insert_entry(key.clone(), doc_locations.to_vec()),
            None => undocumented.insert_entry(key.clone(), code_locations.clone()),
        }
    }

    info!(
        "Cross-reference: {} missing, {} documented, {} undocumented",
        missing.len(),
        documented.len(),
        undocumented.len()
    );

    CrossReference { missing, documented, undocumented }
}

/// Find every location where the given keys literally appear quoted in the
/// corpus. Investigation helper on top of the classification, not part of it.
pub fn find_usages(
    keys: &[String],
    config: &CorpusConfig,
) -> Result<BTreeMap<String, Vec<Location>>> {
    let mut usages = BTreeMap::new();
    let filter = SearchFilter::new(&config.include_glob, &config.structural_excludes, Vec::new())?;
    for key in keys {
        let pattern = format!("\"(?P<key>{})\"", regex::escape(key));
        let found = Searcher::new(&config.root, &pattern, filter.clone())?.find()?;
        usages.insert(key.clone(), found.get(key).map(<[Location]>::to_vec).unwrap_or_default());
    }
    Ok(usages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config(root: &std::path::Path) -> CorpusConfig {
        CorpusConfig {
            root: root.to_path_buf(),
            include_glob: "**/*.txt".to_string(),
            candidate_pattern: r"\b(?P<key>ogham\.[a-z0-9.\-]+)\b".to_string(),
            property_pattern: r#"(^|[ "`'|])(?P<key>ogham\.[a-z0-9.\-]+)([ ="`'|]|$)"#.to_string(),
            structural_excludes: Vec::new(),
            manual_matchers: Vec::new(),
        }
    }

    #[test]
    fn test_structural_exclusion_lands_in_automatically_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("kept.txt"), "ogham.kept.key here\n").unwrap();
        fs::write(dir.path().join("noise.txt"), "ogham.noisy.key here\n").unwrap();

        let mut cfg = config(dir.path());
        cfg.structural_excludes = vec!["noise.txt".to_string()];

        let scan = scan_corpus(&cfg).unwrap();
        assert!(scan.properties.contains_key("ogham.kept.key"));
        assert!(!scan.properties.contains_key("ogham.noisy.key"));
        assert!(scan.automatically_skipped.contains_key("ogham.noisy.key"));
        assert!(scan.manually_skipped.is_empty());
    }

    #[test]
    fn test_manual_exclusion_lands_in_manually_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("doc.txt"), "ogham.kept.key and ogham.ignored.key\n").unwrap();

        let mut cfg = config(dir.path());
        cfg.manual_matchers = vec![RuleMatcher::exact("ogham.ignored.key")];

        let scan = scan_corpus(&cfg).unwrap();
        assert!(scan.properties.contains_key("ogham.kept.key"));
        assert!(scan.manually_skipped.contains_key("ogham.ignored.key"));
        assert!(!scan.properties.contains_key("ogham.ignored.key"));
    }

    #[test]
    fn test_cross_reference_location_asymmetry() {
        let dir = TempDir::new().unwrap();
        let docs_dir = dir.path().join("docs");
        let code_dir = dir.path().join("code");
        fs::create_dir_all(&docs_dir).unwrap();
        fs::create_dir_all(&code_dir).unwrap();
        fs::write(docs_dir.join("guide.txt"), "ogham.shared.key explained\n").unwrap();
        fs::write(code_dir.join("impl.txt"), "ogham.shared.key ogham.hidden.key\n").unwrap();

        let docs = scan_corpus(&config(&docs_dir)).unwrap();
        let code = scan_corpus(&config(&code_dir)).unwrap();
        let cross = cross_reference(&docs, &code);

        let documented = cross.documented.get("ogham.shared.key").unwrap();
        assert_eq!(documented[0].file, std::path::PathBuf::from("guide.txt"));
        let undocumented = cross.undocumented.get("ogham.hidden.key").unwrap();
        assert_eq!(undocumented[0].file, std::path::PathBuf::from("impl.txt"));
    }

    #[test]
    fn test_find_usages_reports_quoted_literals_only() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("impl.txt"),
            "uses \"ogham.smtp.host\" directly\nmentions ogham.smtp.host unquoted\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("noise.txt"),
            "also quotes \"ogham.smtp.host\" and \"ogham.other.key\"\n",
        )
        .unwrap();

        let mut cfg = config(dir.path());
        cfg.structural_excludes = vec!["noise.txt".to_string()];
        let keys = vec![
            "ogham.smtp.host".to_string(),
            "ogham.other.key".to_string(),
            "ogham.absent.key".to_string(),
        ];
        let usages = find_usages(&keys, &cfg).unwrap();

        // The excluded file is skipped for every looked-up key.
        let found = &usages["ogham.smtp.host"];
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line_number, 1);
        assert!(usages["ogham.other.key"].is_empty());
        assert!(usages["ogham.absent.key"].is_empty());
    }
}
