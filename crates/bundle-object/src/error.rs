use serde_json::Value;
use thiserror::Error;

/// Errors produced while resolving or invoking a method.
///
/// Running off the end of a clash chain is deliberately absent: indexed
/// dispatch reports that as a value, not as an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CallError {
    /// No entry (or no delegate) answers the requested name.
    #[error("method not found: {0}")]
    MethodNotFound(String),

    /// A method received an argument it cannot work with.
    #[error("invalid argument to '{method}': {reason}")]
    InvalidArgument { method: String, reason: String },

    /// A domain method refused the call (for example an overdraft).
    #[error("call rejected: {0}")]
    Rejected(String),

    /// The `attributes` method returned something other than a JSON object.
    #[error("attributes must return an object, got {0}")]
    InvalidAttributes(String),

    /// A chain was constructed with fewer than two members.
    #[error("a clash chain needs at least two members, got {0}")]
    ChainTooShort(usize),
}

impl CallError {
    /// Create a `MethodNotFound` error for `name`.
    pub fn method_not_found(name: impl Into<String>) -> Self {
        Self::MethodNotFound(name.into())
    }

    /// Create an `InvalidArgument` error.
    pub fn invalid_argument(method: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            method: method.into(),
            reason: reason.into(),
        }
    }

    /// The offending method name, if this error carries one.
    pub fn method_name(&self) -> Option<&str> {
        match self {
            Self::MethodNotFound(name) => Some(name),
            Self::InvalidArgument { method, .. } => Some(method),
            _ => None,
        }
    }
}

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, CallError>;

/// What every callable returns.
pub type MethodResult = Result<Value>;
