//! Errors raised while loading or writing AST documents.

use thiserror::Error;

/// Failure to move a node tree across the JSON boundary.
#[derive(Debug, Error)]
pub enum AstError {
    /// The document is not valid JSON.
    #[error("invalid AST document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed, but its root node is not a `Program`.
    #[error("expected a Program root, found {0}")]
    NotAProgram(String),
}
