//! Structured error types shared across the biodiversity effect crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`BefError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (indices, lengths, offending values).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the biodiversity effect engine and its consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum BefError {
    /// Input vectors have mismatched lengths or too few species.
    #[error("shape error: {0}")]
    Shape(ErrorInfo),
    /// A monoculture yield, expected relative yield or relative yield total
    /// used as a divisor is zero.
    #[error("division by zero: {0}")]
    DivisionByZero(ErrorInfo),
    /// An input or intermediate value is NaN or infinite.
    #[error("non-finite value: {0}")]
    NonFinite(ErrorInfo),
    /// A yield is negative while the active policy requires non-negative yields.
    #[error("negative yield: {0}")]
    NegativeYield(ErrorInfo),
    /// Expected relative yields violate the active policy (negative entries or
    /// a total away from one).
    #[error("expected relative yield error: {0}")]
    ExpectedYield(ErrorInfo),
    /// Sweep or landscape plan is malformed.
    #[error("plan error: {0}")]
    Plan(ErrorInfo),
    /// Serialization, filesystem and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl BefError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            BefError::Shape(info)
            | BefError::DivisionByZero(info)
            | BefError::NonFinite(info)
            | BefError::NegativeYield(info)
            | BefError::ExpectedYield(info)
            | BefError::Plan(info)
            | BefError::Serde(info) => info,
        }
    }

    /// Returns true for the numeric-domain families raised by the engine.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            BefError::DivisionByZero(_)
                | BefError::NonFinite(_)
                | BefError::NegativeYield(_)
                | BefError::ExpectedYield(_)
        )
    }
}
