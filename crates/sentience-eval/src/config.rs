//! Latent index configuration.

use crate::error::EvalResult;
use serde::{Deserialize, Serialize};

/// Tuning for the default latent similarity index.
///
/// Every field has a default, so a partial JSON document is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatentConfig {
    /// Width of the hashed embedding vectors.
    pub dimensions: usize,
    /// Maximum number of results returned by a similarity query.
    pub top_k: usize,
    /// Results scoring at or below this are dropped.
    pub min_score: f32,
}

impl Default for LatentConfig {
    fn default() -> Self {
        Self {
            dimensions: 256,
            top_k: 5,
            min_score: 0.0,
        }
    }
}

impl LatentConfig {
    /// Decode from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> EvalResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
