use std::error::Error;
use std::fmt::{Display, Formatter};

/// Dotenv Error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotenvError {
    /// No environment file could be located or read.
    InvalidPath(String),
    /// Environment file was read but could not be parsed.
    InvalidFile(String),
    /// One or more variables failed validation, one message per failing variable.
    Validation(Vec<String>),
    /// Validation pattern is not a valid regular expression.
    InvalidPattern(String),
}

impl DotenvError {
    pub(crate) fn parse_fail(cause: &str, subject: &str) -> Self {
        let line = subject.split('\n').next().unwrap_or_default();
        DotenvError::InvalidFile(format!(
            "Failed to parse dotenv file due to {}. Failed at [{}].",
            cause, line
        ))
    }

    /// Check whether no environment file could be found.
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, DotenvError::InvalidPath(_))
    }
}

impl Display for DotenvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DotenvError::InvalidPath(msg) => f.write_str(msg),
            DotenvError::InvalidFile(msg) => f.write_str(msg),
            DotenvError::Validation(failures) => write!(
                f,
                "One or more environment variables failed assertions: {}.",
                failures.join(", ")
            ),
            DotenvError::InvalidPattern(msg) => write!(f, "Invalid pattern: {}", msg),
        }
    }
}

impl Error for DotenvError {}

impl From<regex::Error> for DotenvError {
    fn from(err: regex::Error) -> Self {
        DotenvError::InvalidPattern(err.to_string())
    }
}
