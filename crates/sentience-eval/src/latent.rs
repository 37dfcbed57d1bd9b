//! Latent memory: similarity search over remembered text.
//!
//! The evaluator only relies on [`SimilarityIndex`]; hosts with a real
//! embedding backend can plug one in through
//! [`AgentContext::with_index`](crate::AgentContext::with_index).
//!
//! The default [`HashedEmbeddingIndex`] embeds text with signed feature
//! hashing: every lowercase alphanumeric token is hashed with SHA-256 into
//! one of `dimensions` buckets, and entries are ranked by cosine similarity
//! to the query vector. Hashing is content-addressed, so rankings are the
//! same on every platform and every run.

use crate::config::LatentConfig;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

/// A store of keyed text that answers similarity queries.
pub trait SimilarityIndex: fmt::Debug {
    /// Insert or replace the entry under `key`.
    fn insert(&mut self, key: &str, text: &str);

    /// Remove the entry under `key`. Returns `true` if it existed.
    fn remove(&mut self, key: &str) -> bool;

    /// The text stored under `key`.
    fn get(&self, key: &str) -> Option<&str>;

    /// Keys of the entries closest to `query`, best first.
    fn similar_to(&self, query: &str) -> Vec<String>;

    /// Number of stored entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cosine similarity of two equal-length vectors; `0.0` if either is zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[derive(Debug, Clone)]
struct LatentEntry {
    text: String,
    vector: Vec<f32>,
}

/// Default in-process latent index.
#[derive(Debug, Clone)]
pub struct HashedEmbeddingIndex {
    config: LatentConfig,
    entries: BTreeMap<String, LatentEntry>,
}

impl HashedEmbeddingIndex {
    pub fn new(config: LatentConfig) -> Self {
        Self {
            config,
            entries: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &LatentConfig {
        &self.config
    }

    /// Embed `text` as a signed bag-of-tokens vector.
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let dims = self.config.dimensions.max(1);
        let mut vector = vec![0.0f32; dims];
        for token in tokenize(text) {
            let digest = Sha256::digest(token.as_bytes());
            let mut bucket = [0u8; 8];
            bucket.copy_from_slice(&digest[..8]);
            let slot = (u64::from_le_bytes(bucket) % dims as u64) as usize;
            let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
            vector[slot] += sign;
        }
        vector
    }
}

impl Default for HashedEmbeddingIndex {
    fn default() -> Self {
        Self::new(LatentConfig::default())
    }
}

impl SimilarityIndex for HashedEmbeddingIndex {
    fn insert(&mut self, key: &str, text: &str) {
        // The key is embedded alongside the text so entries are findable by name.
        let vector = self.embed(&format!("{key} {text}"));
        self.entries.insert(
            key.to_string(),
            LatentEntry {
                text: text.to_string(),
                vector,
            },
        );
    }

    fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.text.as_str())
    }

    fn similar_to(&self, query: &str) -> Vec<String> {
        let probe = self.embed(query);
        let mut scored: Vec<(&str, f32)> = self
            .entries
            .iter()
            .map(|(key, entry)| (key.as_str(), cosine_similarity(&probe, &entry.vector)))
            .filter(|(_, score)| *score > self.config.min_score)
            .collect();
        // BTreeMap iteration is key-ordered, and the sort is stable, so ties keep key order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored
            .into_iter()
            .take(self.config.top_k)
            .map(|(key, _)| key.to_string())
            .collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}
