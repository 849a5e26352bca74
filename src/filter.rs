//! File- and key-level filtering for corpus scans.

use std::path::Path;

use globset::{Glob, GlobMatcher};
use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::{AuditError, Result};
use crate::matcher::RuleMatcher;

/// Decides which files a scan reads and which candidate keys it keeps.
///
/// Files pass when they match the include glob and are not matched by any
/// gitignore-style exclusion pattern (negation with a leading `!` re-includes,
/// later patterns override earlier ones). Keys pass when no manual rule
/// matches them.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    include: GlobMatcher,
    excluded_files: Gitignore,
    matchers: Vec<RuleMatcher>,
}

impl SearchFilter {
    /// Build a filter from an include glob, gitignore-style exclusion
    /// patterns and manual key matchers.
    pub fn new(
        include_glob: &str,
        excluded_files: &[String],
        matchers: Vec<RuleMatcher>,
    ) -> Result<Self> {
        let include = Glob::new(include_glob)
            .map_err(|e| AuditError::InvalidPattern {
                pattern: include_glob.to_string(),
                details: e.to_string(),
            })?
            .compile_matcher();

        let mut builder = GitignoreBuilder::new("");
        for pattern in excluded_files {
            builder.add_line(None, pattern).map_err(|e| AuditError::InvalidPattern {
                pattern: pattern.clone(),
                details: e.to_string(),
            })?;
        }
        let excluded_files = builder.build().map_err(|e| AuditError::InvalidPattern {
            pattern: excluded_files.join(", "),
            details: e.to_string(),
        })?;

        Ok(Self { include, excluded_files, matchers })
    }

    /// Whether a path (relative to the scan root) is read at all.
    pub fn is_included_file(&self, relative: &Path) -> bool {
        self.include.is_match(relative)
            && !self.excluded_files.matched_path_or_any_parents(relative, false).is_ignore()
    }

    /// Whether a candidate key survives the manual exclusion rules.
    ///
    /// Exclusion is a union: any single matching rule suppresses the key.
    pub fn is_accepted_property(&self, key: &str) -> bool {
        !self.matchers.iter().any(|rule| rule.matches(key))
    }
}
