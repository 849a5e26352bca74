//! Loading of manual exclusion lists.
//!
//! Lists are plain UTF-8 files with one rule per line. Blank lines and lines
//! whose first non-whitespace character is `#` are ignored. A missing list
//! file is fatal for the run: an absent list and an empty list mean very
//! different things, so the former is never silently treated as the latter.

use std::path::Path;

use tracing::debug;

use crate::error::{AuditError, Result};

const COMMENT_MARKER: char = '#';

fn read_list_file(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(AuditError::ExclusionFileNotFound { path: path.to_path_buf() });
    }
    std::fs::read_to_string(path)
        .map_err(|source| AuditError::Io { path: path.to_path_buf(), source })
}

/// Load raw rule strings from an exclusion list file, in file order.
pub fn load_rules(path: &Path) -> Result<Vec<String>> {
    let content = read_list_file(path)?;
    let rules: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
        .map(str::to_string)
        .collect();
    debug!("Loaded {} rules from {}", rules.len(), path.display());
    Ok(rules)
}

/// Load `key=value` default-value rules from an exclusion list file.
///
/// Every non-comment, non-blank line must contain at least one `=`; the line
/// is split on the first occurrence and both sides are trimmed. A surviving
/// line without `=` aborts the run with a diagnostic naming the file and
/// line.
pub fn load_default_values(path: &Path) -> Result<Vec<(String, String)>> {
    let content = read_list_file(path)?;
    let mut defaults = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(AuditError::MalformedDefaultRule {
                path: path.to_path_buf(),
                line: idx + 1,
                text: line.to_string(),
            });
        };
        defaults.push((key.trim().to_string(), value.trim().to_string()));
    }
    debug!("Loaded {} default-value rules from {}", defaults.len(), path.display());
    Ok(defaults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_list(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_rules_skips_comments_and_blanks() {
        let dir = TempDir::new().unwrap();
        let path = write_list(
            &dir,
            ".ignore-props",
            "# header comment\n\nogham.internal.secret\n   # indented comment\n  mail.debug  \n",
        );

        let rules = load_rules(&path).unwrap();
        assert_eq!(rules, vec!["ogham.internal.secret", "mail.debug"]);
    }

    #[test]
    fn test_load_rules_preserves_file_order() {
        let dir = TempDir::new().unwrap();
        let path = write_list(&dir, ".ignore-files", "zebra.java\nalpha.java\n");

        let rules = load_rules(&path).unwrap();
        assert_eq!(rules, vec!["zebra.java", "alpha.java"]);
    }

    #[test]
    fn test_load_rules_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = load_rules(&missing).unwrap_err();
        assert!(matches!(err, AuditError::ExclusionFileNotFound { path } if path == missing));
    }

    #[test]
    fn test_load_default_values() {
        let dir = TempDir::new().unwrap();
        let path = write_list(
            &dir,
            ".defaults",
            "# defaults\nogham.smtp.port = 25\nogham.smtp.host=localhost\n",
        );

        let defaults = load_default_values(&path).unwrap();
        assert_eq!(
            defaults,
            vec![
                ("ogham.smtp.port".to_string(), "25".to_string()),
                ("ogham.smtp.host".to_string(), "localhost".to_string()),
            ]
        );
    }

    #[test]
    fn test_load_default_values_splits_on_first_equals() {
        let dir = TempDir::new().unwrap();
        let path = write_list(&dir, ".defaults", "ogham.template.prefix=a=b\n");

        let defaults = load_default_values(&path).unwrap();
        assert_eq!(defaults, vec![("ogham.template.prefix".to_string(), "a=b".to_string())]);
    }

    #[test]
    fn test_load_default_values_missing_separator() {
        let dir = TempDir::new().unwrap();
        let path = write_list(&dir, ".defaults", "# ok\nogham.smtp.port = 25\nbroken-line\n");

        let err = load_default_values(&path).unwrap_err();
        match err {
            AuditError::MalformedDefaultRule { line, text, .. } => {
                assert_eq!(line, 3);
                assert_eq!(text, "broken-line");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
