//! Unified error type for the ambient parts of the crate.
//!
//! The stack itself never fails: bad configuration is clamped and missing
//! content degrades to empty slots. Errors only come from loading config
//! files, parsing arguments and driving the terminal.

use std::path::PathBuf;

use thiserror::Error;

use super::category::ErrorCategory;

#[derive(Debug, Error)]
pub enum CardStackError {
    #[error("could not determine the home directory")]
    NoHomeDirectory,

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value {value:?} for {flag}: {reason}")]
    InvalidArgument {
        flag: String,
        value: String,
        reason: String,
    },

    #[error("missing value for {0}")]
    MissingArgument(String),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl CardStackError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CardStackError::InvalidArgument { .. } | CardStackError::MissingArgument(_) => {
                ErrorCategory::User
            }
            CardStackError::ConfigRead { .. }
            | CardStackError::ConfigParse { .. }
            | CardStackError::ConfigWrite { .. } => ErrorCategory::Configuration,
            CardStackError::Terminal(_) => ErrorCategory::Terminal,
            CardStackError::NoHomeDirectory => ErrorCategory::System,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            CardStackError::NoHomeDirectory => "SYS_NO_HOME",
            CardStackError::ConfigRead { .. } => "CFG_READ",
            CardStackError::ConfigParse { .. } => "CFG_PARSE",
            CardStackError::ConfigWrite { .. } => "CFG_WRITE",
            CardStackError::InvalidArgument { .. } => "ARG_INVALID",
            CardStackError::MissingArgument(_) => "ARG_MISSING",
            CardStackError::Terminal(_) => "TERM_IO",
        }
    }

    /// Get a user-friendly error message including a recovery hint.
    pub fn user_message(&self) -> String {
        format!("{}\n{}", self, self.category().recovery_hint())
    }

    pub(crate) fn invalid_argument(
        flag: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CardStackError::InvalidArgument {
            flag: flag.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
