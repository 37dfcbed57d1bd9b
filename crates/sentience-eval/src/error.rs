//! Error and diagnostic types for the Sentience evaluator.
//!
//! Evaluation itself never fails on program content: every problem with the
//! tree or its conditions degrades to a [`Diagnostic`] trace line. The only
//! hard failures are a broken trace sink and unreadable configuration.

use std::fmt;
use std::io;
use thiserror::Error;

/// Hard evaluator errors.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Writing a trace line to the sink failed.
    #[error("trace sink write failed: {0}")]
    Sink(#[from] io::Error),

    /// A configuration document could not be decoded.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;

/// A soft error, surfaced only through the trace.
///
/// `Display` renders the exact trace text (without indentation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Dispatch reached a node kind with no defined handling.
    UnknownNode { kind: String },
    /// An `if` condition matched none of the recognized policies.
    ConditionUnsupported { condition: String },
    /// A `context includes` condition found nothing in short-term memory.
    ContextMiss { key: String },
    /// A `loss` condition was assumed true instead of being evaluated.
    StubbedCondition { condition: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode { kind } => write!(f, "Unknown node: {kind}"),
            Self::ConditionUnsupported { condition } => {
                write!(f, "Condition not supported: {condition}")
            }
            Self::ContextMiss { key } => write!(f, "[context miss: \"{key}\"]"),
            Self::StubbedCondition { .. } => write!(f, "[stub eval: assuming loss > 0.1]"),
        }
    }
}
