//! Structured error types shared across FUQ crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure code and message, plus where it happened and an optional fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Kebab-case code such as `log-missing` or `column-mismatch`.
    pub code: String,
    /// One-line description.
    pub message: String,
    /// Where it happened: log path, replicate index, column names.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Suggested fix, shown after the context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with no context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records one `key=value` location detail.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a suggested fix.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Error returned by every fallible FUQ operation, grouped by where it arose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum FuqError {
    /// Invalid study configuration (unsupported quantity, unknown key, bad option).
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Missing or malformed simulation log, or a missing thermo column.
    #[error("log error: {0}")]
    Log(ErrorInfo),
    /// Filesystem errors outside of log reading.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Template rendering or job launch failures.
    #[error("submit error: {0}")]
    Submit(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

/// Renders as `message [code] key=value ...; hint: ...`.
impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.message, self.code)?;
        for (key, value) in &self.context {
            write!(f, " {key}={value}")?;
        }
        match &self.hint {
            Some(hint) => write!(f, "; hint: {hint}"),
            None => Ok(()),
        }
    }
}

impl FuqError {
    /// Payload regardless of family.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            FuqError::Config(info)
            | FuqError::Log(info)
            | FuqError::Io(info)
            | FuqError::Submit(info)
            | FuqError::Serde(info) => info,
        }
    }

    /// Kebab-case code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }
}
