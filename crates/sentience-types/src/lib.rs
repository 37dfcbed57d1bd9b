//! Shared types for the Sentience agent language.
//!
//! This crate defines the AST node types handed to the evaluator by an
//! external parser, together with the JSON load helpers and their errors.

mod error;
pub mod ast;

pub use error::AstError;

/// Result type used when loading AST documents.
pub type Result<T> = std::result::Result<T, AstError>;
