//! Write-policy enforcement for candidate files.
//!
//! [`WritePolicy`] evaluates candidate paths against glob ignore patterns
//! *before* conflict resolution; an ignored file never reaches the decision
//! engine and is never written.
//!
//! Patterns are matched against the candidate's *relative* path with
//! forward-slash separators.

use tracing::debug;

// ---------------------------------------------------------------------------
// Decision enum
// ---------------------------------------------------------------------------

/// The outcome of evaluating a candidate path against the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    /// No pattern matched -- hand the file to the conflict engine.
    Evaluate,
    /// Path matches an ignore pattern -- drop the candidate entirely.
    Ignored { pattern: String },
}

impl PolicyDecision {
    /// `true` if the file should proceed to conflict resolution.
    pub fn should_evaluate(&self) -> bool {
        matches!(self, Self::Evaluate)
    }
}

// ---------------------------------------------------------------------------
// WritePolicy
// ---------------------------------------------------------------------------

/// Evaluates candidate paths against ignore patterns.
///
/// Cheap to clone; all data is owned strings.
#[derive(Debug, Clone, Default)]
pub struct WritePolicy {
    /// Glob patterns to exclude. Matched against the relative path.
    ignore_patterns: Vec<String>,
}

impl WritePolicy {
    pub fn new(ignore_patterns: Vec<String>) -> Self {
        Self { ignore_patterns }
    }

    /// Whether the policy has any constraints at all.
    pub fn has_constraints(&self) -> bool {
        !self.ignore_patterns.is_empty()
    }

    /// Evaluate a candidate's relative path.
    pub fn evaluate(&self, rel_path: &str) -> PolicyDecision {
        let path = rel_path.replace('\\', "/");
        for pattern in &self.ignore_patterns {
            if glob_match::glob_match(pattern, &path) {
                debug!(
                    path = rel_path,
                    pattern = pattern.as_str(),
                    "candidate matches ignore pattern"
                );
                return PolicyDecision::Ignored {
                    pattern: pattern.clone(),
                };
            }
        }
        PolicyDecision::Evaluate
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_constraints_evaluates_everything() {
        let policy = WritePolicy::default();
        assert!(!policy.has_constraints());
        assert_eq!(policy.evaluate("src/main.rs"), PolicyDecision::Evaluate);
    }

    #[test]
    fn test_ignore_pattern_star_ext() {
        let policy = WritePolicy::new(vec!["*.log".into()]);
        assert!(policy.has_constraints());
        assert!(matches!(
            policy.evaluate("app.log"),
            PolicyDecision::Ignored { .. }
        ));
        assert_eq!(policy.evaluate("app.txt"), PolicyDecision::Evaluate);
    }

    #[test]
    fn test_ignore_pattern_double_star() {
        let policy = WritePolicy::new(vec!["node_modules/**".into()]);
        assert!(matches!(
            policy.evaluate("node_modules/pkg/index.js"),
            PolicyDecision::Ignored { .. }
        ));
        assert_eq!(policy.evaluate("src/index.js"), PolicyDecision::Evaluate);
    }

    #[test]
    fn test_ignore_pattern_nested_ext() {
        let policy = WritePolicy::new(vec!["**/*.snap".into()]);
        assert!(matches!(
            policy.evaluate("tests/fixtures/output.snap"),
            PolicyDecision::Ignored { .. }
        ));
        assert_eq!(policy.evaluate("tests/output.rs"), PolicyDecision::Evaluate);
    }

    #[test]
    fn test_first_matching_pattern_reported() {
        let policy = WritePolicy::new(vec!["*.tmp".into(), "**/*.tmp".into()]);
        match policy.evaluate("data.tmp") {
            PolicyDecision::Ignored { pattern } => assert_eq!(pattern, "*.tmp"),
            other => panic!("expected Ignored, got {:?}", other),
        }
    }

    #[test]
    fn test_backslash_paths_normalized() {
        let policy = WritePolicy::new(vec!["build/**".into()]);
        assert!(matches!(
            policy.evaluate("build\\out\\main.o"),
            PolicyDecision::Ignored { .. }
        ));
    }

    #[test]
    fn test_should_evaluate_helper() {
        assert!(PolicyDecision::Evaluate.should_evaluate());
        assert!(!PolicyDecision::Ignored {
            pattern: "*.log".into()
        }
        .should_evaluate());
    }
}
