//! Error category classification.
//!
//! Categories decide how the binary reports a failure: configuration and
//! usage problems get a hint pointing at the offending input, system errors
//! are reported as-is.

use std::fmt;

/// High-level categorization of errors for reporting decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Invalid command-line usage.
    /// Not retryable until the user corrects the arguments.
    User,

    /// Missing or malformed configuration files.
    Configuration,

    /// Terminal setup or teardown failed.
    Terminal,

    /// OS/filesystem errors (permissions, missing directories).
    System,
}

impl ErrorCategory {
    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::User => "user",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Terminal => "terminal",
            ErrorCategory::System => "system",
        }
    }

    /// Returns a hint describing how the user can recover.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::User => "Run `cardstack --help` to see the accepted flags.",
            ErrorCategory::Configuration => {
                "Fix or remove the config file; defaults are used when it is absent."
            }
            ErrorCategory::Terminal => "Run `reset` if the terminal was left in a bad state.",
            ErrorCategory::System => "Check file permissions and available disk space.",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_a_hint() {
        for category in [
            ErrorCategory::User,
            ErrorCategory::Configuration,
            ErrorCategory::Terminal,
            ErrorCategory::System,
        ] {
            assert!(!category.recovery_hint().is_empty());
            assert_eq!(category.to_string(), category.as_str());
        }
    }
}
