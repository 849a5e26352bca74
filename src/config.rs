//! Audit run configuration.
//!
//! The builder resolves everything a run needs up front: it validates the
//! corpus roots, loads the three manual exclusion lists (failing fast if one
//! is missing), and assembles the scan regexes from the configured key
//! prefixes. After `build()` nothing is read from disk except the corpora
//! themselves.

use std::path::PathBuf;

use crate::error::{AuditError, Result};
use crate::exclusions;
use crate::matcher::RuleMatcher;
use crate::reconcile::CorpusConfig;

/// Body of a documentation-side key after its prefix. Must end in an
/// alphanumeric: a captured key ending in `.` or `-` could never pass the
/// broad pattern's trailing word boundary, so the strict passes would no
/// longer scan a subset of the maximal pass.
const DOC_KEY_CHARS: &str = r"[a-z0-9.\-]*[a-z0-9]";
/// Broad code-side pattern: anything inside a quoted placeholder.
const CODE_CANDIDATE_PATTERN: &str = r#""\$\{(?P<key>[^}]+)\}""#;
/// Strict code-side pattern: a well-formed quoted placeholder key.
const CODE_PROPERTY_PATTERN: &str = r#""\$\{(?P<key>[a-zA-Z0-9.\-]*[a-zA-Z0-9])\}""#;

/// Fully resolved configuration for one audit run.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Documentation corpus pipeline configuration.
    pub docs: CorpusConfig,
    /// Code corpus pipeline configuration.
    pub code: CorpusConfig,
}

impl AuditConfig {
    /// Start building a configuration.
    pub fn builder() -> AuditConfigBuilder {
        AuditConfigBuilder::default()
    }
}

/// Builder assembling an [`AuditConfig`].
#[derive(Debug, Clone)]
pub struct AuditConfigBuilder {
    docs_root: PathBuf,
    code_root: PathBuf,
    docs_glob: String,
    code_glob: String,
    key_prefixes: Vec<String>,
    docs_excluded_files: Vec<String>,
    ignore_doc_matches: Option<PathBuf>,
    ignore_props: Option<PathBuf>,
    ignore_files: Option<PathBuf>,
}

impl Default for AuditConfigBuilder {
    fn default() -> Self {
        Self {
            docs_root: PathBuf::from("."),
            code_root: PathBuf::from("."),
            docs_glob: "**/*.adoc".to_string(),
            code_glob: "**/*.java".to_string(),
            key_prefixes: Vec::new(),
            docs_excluded_files: Vec::new(),
            ignore_doc_matches: None,
            ignore_props: None,
            ignore_files: None,
        }
    }
}

impl AuditConfigBuilder {
    /// Root of the documentation tree.
    pub fn docs_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.docs_root = root.into();
        self
    }

    /// Root of the code tree.
    pub fn code_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.code_root = root.into();
        self
    }

    /// Include glob for documentation files.
    pub fn docs_glob(mut self, glob: impl Into<String>) -> Self {
        self.docs_glob = glob.into();
        self
    }

    /// Include glob for code files.
    pub fn code_glob(mut self, glob: impl Into<String>) -> Self {
        self.code_glob = glob.into();
        self
    }

    /// Key prefixes that identify a property, e.g. `ogham.`. At least one is
    /// required.
    pub fn key_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.key_prefixes = prefixes;
        self
    }

    /// Documentation files always excluded, gitignore syntax.
    pub fn docs_excluded_files(mut self, patterns: Vec<String>) -> Self {
        self.docs_excluded_files = patterns;
        self
    }

    /// Manual list of documentation matches to ignore (bare keys, exact
    /// matching).
    pub fn ignore_doc_matches(mut self, path: impl Into<PathBuf>) -> Self {
        self.ignore_doc_matches = Some(path.into());
        self
    }

    /// Manual list of property declarations to ignore (written in `${key}`
    /// placeholder syntax).
    pub fn ignore_props(mut self, path: impl Into<PathBuf>) -> Self {
        self.ignore_props = Some(path.into());
        self
    }

    /// Manual list of code files to ignore (gitignore syntax).
    pub fn ignore_files(mut self, path: impl Into<PathBuf>) -> Self {
        self.ignore_files = Some(path.into());
        self
    }

    /// Validate the roots, load the manual lists and produce the two corpus
    /// configurations.
    pub fn build(self) -> Result<AuditConfig> {
        if !self.docs_root.is_dir() {
            return Err(AuditError::Config(format!(
                "documentation root {} is not a directory",
                self.docs_root.display()
            )));
        }
        if self.key_prefixes.is_empty() {
            return Err(AuditError::Config("at least one key prefix is required".to_string()));
        }

        let docs_manual: Vec<RuleMatcher> = match &self.ignore_doc_matches {
            Some(path) => {
                exclusions::load_rules(path)?.into_iter().map(RuleMatcher::exact).collect()
            }
            None => Vec::new(),
        };

        let docs = CorpusConfig {
            root: self.docs_root.clone(),
            include_glob: self.docs_glob.clone(),
            candidate_pattern: docs_candidate_pattern(&self.key_prefixes),
            property_pattern: docs_property_pattern(&self.key_prefixes),
            structural_excludes: self.docs_excluded_files.clone(),
            manual_matchers: docs_manual,
        };
        let code = self.build_code()?;

        Ok(AuditConfig { docs, code })
    }

    /// Build only the code-side corpus configuration.
    ///
    /// Commands that never touch the documentation tree use this so they do
    /// not depend on documentation settings (root, key prefixes, manual doc
    /// lists) being valid.
    pub fn build_code(self) -> Result<CorpusConfig> {
        if !self.code_root.is_dir() {
            return Err(AuditError::Config(format!(
                "code root {} is not a directory",
                self.code_root.display()
            )));
        }

        let code_manual: Vec<RuleMatcher> = match &self.ignore_props {
            Some(path) => {
                exclusions::load_rules(path)?.into_iter().map(RuleMatcher::declaration).collect()
            }
            None => Vec::new(),
        };
        let code_excluded_files = match &self.ignore_files {
            Some(path) => exclusions::load_rules(path)?,
            None => Vec::new(),
        };

        Ok(CorpusConfig {
            root: self.code_root,
            include_glob: self.code_glob,
            candidate_pattern: CODE_CANDIDATE_PATTERN.to_string(),
            property_pattern: CODE_PROPERTY_PATTERN.to_string(),
            structural_excludes: code_excluded_files,
            manual_matchers: code_manual,
        })
    }
}

fn escaped_prefixes(prefixes: &[String]) -> String {
    prefixes.iter().map(|p| regex::escape(p)).collect::<Vec<_>>().join("|")
}

/// Broad documentation pattern: any prefixed dotted token at word
/// boundaries. Over-matches by design; also catches method calls.
fn docs_candidate_pattern(prefixes: &[String]) -> String {
    format!(r"\b(?P<key>({}){})\b", escaped_prefixes(prefixes), DOC_KEY_CHARS)
}

/// Strict documentation pattern: a prefixed key surrounded by prose or
/// markup delimiters (space, quotes, backticks, table bars) or line edges.
fn docs_property_pattern(prefixes: &[String]) -> String {
    format!(
        r#"(^|[ "`'|])(?P<key>({}){})([ ="`'|]|$)"#,
        escaped_prefixes(prefixes),
        DOC_KEY_CHARS
    )
}
