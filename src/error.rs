//! Error types for curryq.
//!
//! Two layers of failure exist. [`CallError`] is what a callable reports when
//! its own body fails. [`CurryError`] is what the engine reports to callers of
//! `apply`: either a misuse of the chain, or a callable failure propagated
//! unchanged.

use thiserror::Error;

use crate::value::ValueType;

/// Errors raised by a callable while it runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    /// The body reported a failure of its own.
    #[error("Function '{function}' failed: {message}")]
    Failed {
        function: String,
        message: String,
    },

    /// An argument had a type no signature accepts at its position.
    #[error("Function '{function}' expected {expected} at position {position}, got {got}")]
    ArgumentType {
        function: String,
        position: usize,
        expected: String,
        got: ValueType,
    },

    /// No signature takes this many arguments.
    #[error("Function '{function}' expected {expected} arguments, got {got}")]
    ArgumentCount {
        function: String,
        expected: usize,
        got: usize,
    },
}

impl CallError {
    /// Creates a generic failure for `function`.
    #[must_use]
    pub fn failed(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            function: function.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while defining a callable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// The builder was given an empty name.
    #[error("Function name cannot be empty")]
    EmptyName,

    /// The builder was given no signature.
    #[error("Function '{function}' declares no signatures")]
    NoSignatures {
        function: String,
    },

    /// The builder was given no body.
    #[error("Function '{function}' has no body")]
    MissingBody {
        function: String,
    },
}

/// Top-level error type for curry chains.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurryError {
    /// The chain was used in a way its current state does not allow.
    #[error("Invalid operation: {reason}")]
    InvalidOperation {
        reason: String,
    },

    /// The underlying callable failed after being invoked.
    #[error("Call failed: {0}")]
    Call(#[from] CallError),
}

impl CurryError {
    /// Creates an invalid-operation error.
    #[must_use]
    pub fn invalid_operation(reason: impl Into<String>) -> Self {
        Self::InvalidOperation {
            reason: reason.into(),
        }
    }

    /// Returns true if this is an invalid-operation error.
    #[must_use]
    pub const fn is_invalid_operation(&self) -> bool {
        matches!(self, Self::InvalidOperation { .. })
    }

    /// Returns true if this error came from the callable itself.
    #[must_use]
    pub const fn is_call(&self) -> bool {
        matches!(self, Self::Call(_))
    }

    /// Returns the callable's error, if that is what this is.
    #[must_use]
    pub const fn as_call(&self) -> Option<&CallError> {
        match self {
            Self::Call(e) => Some(e),
            Self::InvalidOperation { .. } => None,
        }
    }
}

/// Result type alias for curry operations.
pub type CurryResult<T> = Result<T, CurryError>;
