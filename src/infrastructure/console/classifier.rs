//! Outcome classification.
//!
//! An exit status alone does not decide success on a console: interactive
//! shells sometimes swallow statuses, and git prints well-known benign
//! complaints ("nothing to commit") with a nonzero exit. Classification
//! combines the status with a configurable substring table.

/// Result of one command run through the completion protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// The command as shown in logs and results (secrets masked).
    pub command: String,

    /// Captured output that appeared before the sentinel line.
    pub output: String,

    /// Exit status extracted from the sentinel line.
    pub exit_code: Option<i32>,

    /// Final verdict for this command.
    pub success: bool,

    /// Why the command counts as failed, when it does.
    pub failure_reason: Option<String>,
}

impl CommandOutcome {
    /// Last `max_lines` of the captured output, for compact error display.
    pub fn output_tail(&self, max_lines: usize) -> String {
        let lines: Vec<&str> = self
            .output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect();
        let start = lines.len().saturating_sub(max_lines);
        lines[start..].join("\n")
    }
}

/// Configurable success/failure classification table.
///
/// Patterns are matched case-insensitively as plain substrings. Benign
/// patterns are checked first: output matching one is a success no matter
/// what the exit status says.
#[derive(Debug, Clone)]
pub struct OutcomeClassifier {
    failure_patterns: Vec<String>,
    benign_patterns: Vec<String>,
}

impl Default for OutcomeClassifier {
    fn default() -> Self {
        Self {
            failure_patterns: vec![
                "error:".to_string(),
                "failed:".to_string(),
                "fatal:".to_string(),
                "permission denied".to_string(),
                "command not found".to_string(),
                "no such file".to_string(),
                "cannot access".to_string(),
                "could not resolve host".to_string(),
            ],
            benign_patterns: vec![
                "nothing to commit".to_string(),
                "nothing added to commit".to_string(),
            ],
        }
    }
}

impl OutcomeClassifier {
    /// Create a classifier with the default tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a failure substring.
    pub fn with_failure_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.failure_patterns.push(pattern.into().to_lowercase());
        self
    }

    /// Add a benign substring.
    pub fn with_benign_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.benign_patterns.push(pattern.into().to_lowercase());
        self
    }

    /// Classify a finished command.
    pub fn classify(&self, command: &str, exit_code: i32, output: &str) -> CommandOutcome {
        let lowered = output.to_lowercase();

        let benign = self
            .benign_patterns
            .iter()
            .find(|pattern| lowered.contains(pattern.as_str()));

        let (success, failure_reason) = if benign.is_some() {
            (true, None)
        } else if exit_code != 0 {
            (false, Some(format!("exit status {exit_code}")))
        } else if let Some(pattern) = self
            .failure_patterns
            .iter()
            .find(|pattern| lowered.contains(pattern.as_str()))
        {
            (false, Some(format!("output matched \"{pattern}\"")))
        } else {
            (true, None)
        };

        CommandOutcome {
            command: command.to_string(),
            output: output.to_string(),
            exit_code: Some(exit_code),
            success,
            failure_reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_zero_status_is_success() {
        let classifier = OutcomeClassifier::new();
        let outcome = classifier.classify("git pull origin main", 0, "Already up to date.\n");
        assert!(outcome.success);
        assert!(outcome.failure_reason.is_none());
        assert_eq!(outcome.exit_code, Some(0));
    }

    #[test]
    fn test_zero_status_with_failure_substring_is_failure() {
        let classifier = OutcomeClassifier::new();
        let outcome = classifier.classify(
            "git pull origin main",
            0,
            "fatal: unable to access 'https://github.com/alice/blog.git'\n",
        );
        assert!(!outcome.success);
        assert_eq!(
            outcome.failure_reason.as_deref(),
            Some("output matched \"fatal:\"")
        );

        // Network-layer failures sometimes come back with a clean status.
        let outcome = classifier.classify(
            "git pull origin main",
            0,
            "Could not resolve host: github.com\n",
        );
        assert!(!outcome.success);
    }

    #[test]
    fn test_nonzero_status_is_failure() {
        let classifier = OutcomeClassifier::new();
        let outcome = classifier.classify("git push origin main", 1, "rejected\n");
        assert!(!outcome.success);
        assert_eq!(outcome.failure_reason.as_deref(), Some("exit status 1"));
    }

    #[test]
    fn test_nothing_to_commit_is_success_despite_nonzero_status() {
        let classifier = OutcomeClassifier::new();
        let outcome = classifier.classify(
            "git commit -m 'update'",
            1,
            "On branch main\nnothing to commit, working tree clean\n",
        );
        assert!(outcome.success);
        assert!(outcome.failure_reason.is_none());
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let classifier = OutcomeClassifier::new();
        let outcome = classifier.classify("ls /missing", 0, "ls: Cannot Access '/missing'\n");
        assert!(!outcome.success);

        let outcome = classifier.classify("git commit", 1, "NOTHING TO COMMIT\n");
        assert!(outcome.success);
    }

    #[test]
    fn test_custom_patterns() {
        let classifier = OutcomeClassifier::new()
            .with_failure_pattern("merge conflict")
            .with_benign_pattern("already up to date");

        let outcome = classifier.classify("git pull", 0, "Merge Conflict in src/lib.rs\n");
        assert!(!outcome.success);

        let outcome = classifier.classify("git pull", 1, "Already up to date.\n");
        assert!(outcome.success);
    }

    #[test]
    fn test_output_tail() {
        let classifier = OutcomeClassifier::new();
        let outcome = classifier.classify("cmd", 1, "one\n\ntwo\nthree\nfour\n");
        assert_eq!(outcome.output_tail(2), "three\nfour");
        assert_eq!(outcome.output_tail(10), "one\ntwo\nthree\nfour");
    }
}
