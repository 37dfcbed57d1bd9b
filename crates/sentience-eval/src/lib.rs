//! Sentience tree-walking evaluator.
//!
//! Walks a parsed agent program depth-first, mutating a per-run
//! [`AgentContext`] (short/long-term memory, symbolic links, latent index)
//! and writing one indented trace line per executed statement to an
//! injected sink.

pub mod condition;
pub mod config;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod latent;

pub use condition::Condition;
pub use config::LatentConfig;
pub use context::{AgentContext, Tier, INIT_KEY};
pub use error::{Diagnostic, EvalError, EvalResult};
pub use evaluator::{evaluate, Interpreter, INDENT_UNIT};
pub use latent::{cosine_similarity, HashedEmbeddingIndex, SimilarityIndex};
