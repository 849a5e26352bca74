//! Rule matchers deciding whether a candidate key is excluded.

/// A manual exclusion rule applied to candidate keys.
///
/// Documentation-side lists hold bare keys and use [`RuleMatcher::Exact`];
/// code-side lists are written in the literal placeholder syntax found in
/// source (`${key}`) and use [`RuleMatcher::Declaration`], so a bare key in
/// that list never excludes anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleMatcher {
    /// Matches a candidate equal to the rule string, case-sensitive.
    Exact(String),
    /// Matches a candidate whose `${candidate}` form equals the rule string.
    Declaration(String),
}

impl RuleMatcher {
    /// Build an exact-string rule.
    pub fn exact(rule: impl Into<String>) -> Self {
        RuleMatcher::Exact(rule.into())
    }

    /// Build a declaration-syntax rule.
    pub fn declaration(rule: impl Into<String>) -> Self {
        RuleMatcher::Declaration(rule.into())
    }

    /// Whether this rule excludes the candidate key. No side effects.
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            RuleMatcher::Exact(rule) => candidate == rule,
            RuleMatcher::Declaration(rule) => format!("${{{candidate}}}") == *rule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_case_sensitive_and_whole_string() {
        let rule = RuleMatcher::exact("foo.bar");
        assert!(rule.matches("foo.bar"));
        assert!(!rule.matches("foo.barbaz"));
        assert!(!rule.matches("foo.ba"));
        assert!(!rule.matches("Foo.bar"));
    }

    #[test]
    fn test_declaration_match_requires_placeholder_wrapping() {
        let rule = RuleMatcher::declaration("${foo.bar}");
        assert!(rule.matches("foo.bar"));
        assert!(!rule.matches("bar"));
        assert!(!rule.matches("${foo.bar}"));
    }

    #[test]
    fn test_bare_key_rule_never_matches_as_declaration() {
        let rule = RuleMatcher::declaration("foo.bar");
        assert!(!rule.matches("foo.bar"));
    }
}
