//! AgentContext, the per-run memory store.
//!
//! Holds short- and long-term key/value memory, symbolic links between
//! keys, the latent similarity index, and a reference to the agent most
//! recently entered. One context is created per program run and mutated
//! throughout traversal.

use crate::config::LatentConfig;
use crate::latent::{HashedEmbeddingIndex, SimilarityIndex};
use sentience_types::ast::AgentStatement;
use std::collections::HashMap;

/// Key written by `mem <region>` to mark a region as initialized.
pub const INIT_KEY: &str = "__init__";

/// A memory tier addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Short,
    Long,
    Latent,
}

impl Tier {
    /// Resolve a tier name as used by `mem` and `mem.<tier>[...]`.
    pub fn from_name(name: &str) -> Option<Tier> {
        match name {
            "short" => Some(Tier::Short),
            "long" => Some(Tier::Long),
            "latent" => Some(Tier::Latent),
            _ => None,
        }
    }

    /// Resolve the destination of `embed ... -> target`.
    ///
    /// Only `mem.long` selects the long tier; everything else lands in short.
    pub fn from_embed_target(target: &str) -> Tier {
        match target {
            "mem.long" => Tier::Long,
            _ => Tier::Short,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Short => "short",
            Tier::Long => "long",
            Tier::Latent => "latent",
        }
    }
}

/// Runtime memory and agent state for a single program run.
///
/// `'ast` ties [`current_agent`](Self::current_agent) to the program tree
/// being evaluated.
#[derive(Debug)]
pub struct AgentContext<'ast> {
    /// The agent most recently entered. Last write wins; never restored
    /// when an agent block ends.
    pub current_agent: Option<&'ast AgentStatement>,
    pub mem_short: HashMap<String, String>,
    pub mem_long: HashMap<String, String>,
    /// Symbolic associations. Each `link` writes both directions, but a later
    /// link may overwrite one side and leave the pair asymmetric.
    pub links: HashMap<String, String>,
    latent: Box<dyn SimilarityIndex>,
    /// Region markers for the latent tier, kept out of the index.
    latent_markers: HashMap<String, String>,
}

impl<'ast> AgentContext<'ast> {
    /// Create a context backed by the default latent index.
    pub fn new() -> Self {
        Self::with_config(LatentConfig::default())
    }

    /// Create a context whose default latent index uses `config`.
    pub fn with_config(config: LatentConfig) -> Self {
        Self::with_index(Box::new(HashedEmbeddingIndex::new(config)))
    }

    /// Create a context backed by a custom similarity index.
    pub fn with_index(latent: Box<dyn SimilarityIndex>) -> Self {
        Self {
            current_agent: None,
            mem_short: HashMap::new(),
            mem_long: HashMap::new(),
            links: HashMap::new(),
            latent,
            latent_markers: HashMap::new(),
        }
    }

    /// Record `agent` as the current agent.
    pub fn enter_agent(&mut self, agent: &'ast AgentStatement) {
        self.current_agent = Some(agent);
    }

    /// Name of the current agent, if any has been entered.
    pub fn current_agent_name(&self) -> Option<&str> {
        self.current_agent.map(|a| a.name.as_str())
    }

    // ── Tiered memory ─────────────────────────────────────────────────────

    /// Write `value` under `key` in `tier`.
    ///
    /// Long-term writes are also indexed in latent memory. The
    /// [`INIT_KEY`] region marker is never indexed, so similarity queries
    /// cannot return it.
    pub fn set(&mut self, tier: Tier, key: &str, value: impl Into<String>) {
        let value = value.into();
        tracing::trace!(tier = tier.as_str(), key, value = value.as_str(), "mem write");
        let marker = key == INIT_KEY;
        match tier {
            Tier::Short => {
                self.mem_short.insert(key.to_string(), value);
            }
            Tier::Long => {
                if !marker {
                    self.latent.insert(key, &value);
                }
                self.mem_long.insert(key.to_string(), value);
            }
            Tier::Latent if marker => {
                self.latent_markers.insert(key.to_string(), value);
            }
            Tier::Latent => self.latent.insert(key, &value),
        }
    }

    /// Read `key` from `tier`; absent keys read as the empty string.
    pub fn get(&self, tier: Tier, key: &str) -> &str {
        let found = match tier {
            Tier::Short => self.mem_short.get(key).map(String::as_str),
            Tier::Long => self.mem_long.get(key).map(String::as_str),
            Tier::Latent => self
                .latent_markers
                .get(key)
                .map(String::as_str)
                .or_else(|| self.latent.get(key)),
        };
        found.unwrap_or("")
    }

    /// Write through a tier name. Unknown tier names are ignored.
    pub fn set_mem(&mut self, tier: &str, key: &str, value: impl Into<String>) {
        match Tier::from_name(tier) {
            Some(tier) => self.set(tier, key, value),
            None => tracing::warn!(tier, key, "write to unknown memory tier ignored"),
        }
    }

    /// Read through a tier name. Unknown tiers and absent keys read as empty.
    pub fn get_mem(&self, tier: &str, key: &str) -> &str {
        Tier::from_name(tier).map_or("", |t| self.get(t, key))
    }

    /// `true` if any short-term key or value contains `needle`.
    pub fn context_includes(&self, needle: &str) -> bool {
        self.mem_short
            .iter()
            .any(|(k, v)| k.contains(needle) || v.contains(needle))
    }

    // ── Links ─────────────────────────────────────────────────────────────

    /// Associate `a` and `b` in both directions, overwriting any previous
    /// partner of either. Earlier partners keep their now one-sided entry.
    pub fn link(&mut self, a: &str, b: &str) {
        self.links.insert(a.to_string(), b.to_string());
        self.links.insert(b.to_string(), a.to_string());
    }

    /// The partner most recently linked to `key`.
    pub fn linked(&self, key: &str) -> Option<&str> {
        self.links.get(key).map(String::as_str)
    }

    // ── Latent ────────────────────────────────────────────────────────────

    /// Latent memory keys most similar to `query`, best first.
    pub fn similar_to(&self, query: &str) -> Vec<String> {
        self.latent.similar_to(query)
    }

    /// The similarity index backing the latent tier.
    pub fn latent(&self) -> &dyn SimilarityIndex {
        self.latent.as_ref()
    }
}

impl Default for AgentContext<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_read_empty() {
        let ctx = AgentContext::new();
        assert_eq!(ctx.get(Tier::Short, "nope"), "");
        assert_eq!(ctx.get_mem("long", "nope"), "");
        assert_eq!(ctx.get_mem("latent", "nope"), "");
    }

    #[test]
    fn unknown_tier_is_ignored() {
        let mut ctx = AgentContext::new();
        ctx.set_mem("episodic", "k", "v");
        assert_eq!(ctx.get_mem("episodic", "k"), "");
        assert!(ctx.mem_short.is_empty());
        assert!(ctx.mem_long.is_empty());
        assert!(ctx.latent().is_empty());
    }

    #[test]
    fn named_tiers_route_to_their_maps() {
        let mut ctx = AgentContext::new();
        ctx.set_mem("short", "a", "1");
        ctx.set_mem("long", "b", "2");
        assert_eq!(ctx.mem_short.get("a").map(String::as_str), Some("1"));
        assert_eq!(ctx.mem_long.get("b").map(String::as_str), Some("2"));
        assert!(!ctx.mem_short.contains_key("b"));
    }

    #[test]
    fn long_writes_are_indexed_in_latent() {
        let mut ctx = AgentContext::new();
        ctx.set(Tier::Long, "fact", "water boils at one hundred degrees");
        assert_eq!(ctx.get(Tier::Latent, "fact"), "water boils at one hundred degrees");
        assert_eq!(ctx.similar_to("water boils"), vec!["fact".to_string()]);
    }

    #[test]
    fn latent_tier_round_trips_through_index() {
        let mut ctx = AgentContext::new();
        ctx.set_mem("latent", "motto", "stay curious");
        assert_eq!(ctx.get_mem("latent", "motto"), "stay curious");
        assert_eq!(ctx.latent().len(), 1);
        assert_eq!(ctx.similar_to("curious"), vec!["motto".to_string()]);
        assert!(ctx.mem_short.is_empty() && ctx.mem_long.is_empty());
    }

    #[test]
    fn region_markers_stay_out_of_latent_index() {
        let mut ctx = AgentContext::new();
        ctx.set_mem("long", INIT_KEY, "1");
        ctx.set_mem("latent", INIT_KEY, "1");
        assert_eq!(ctx.get_mem("long", INIT_KEY), "1");
        assert_eq!(ctx.get_mem("latent", INIT_KEY), "1");
        assert!(ctx.latent().is_empty());
        assert!(ctx.similar_to("init").is_empty());
    }

    #[test]
    fn short_writes_are_not_indexed() {
        let mut ctx = AgentContext::new();
        ctx.set(Tier::Short, "scratch", "temporary note");
        assert!(ctx.latent().is_empty());
    }

    #[test]
    fn context_includes_scans_keys_and_values() {
        let mut ctx = AgentContext::new();
        ctx.set(Tier::Short, "alpha-key", "v");
        ctx.set(Tier::Short, "other", "contains beta inside");
        assert!(ctx.context_includes("alpha"));
        assert!(ctx.context_includes("beta"));
        assert!(!ctx.context_includes("gamma"));
    }

    #[test]
    fn context_includes_ignores_long_memory() {
        let mut ctx = AgentContext::new();
        ctx.set(Tier::Long, "alpha", "alpha");
        assert!(!ctx.context_includes("alpha"));
    }

    #[test]
    fn link_writes_both_directions() {
        let mut ctx = AgentContext::new();
        ctx.link("x", "y");
        assert_eq!(ctx.linked("x"), Some("y"));
        assert_eq!(ctx.linked("y"), Some("x"));
    }

    #[test]
    fn relinking_leaves_old_partner_one_sided() {
        let mut ctx = AgentContext::new();
        ctx.link("a", "b");
        ctx.link("c", "a");
        assert_eq!(ctx.linked("a"), Some("c"));
        assert_eq!(ctx.linked("c"), Some("a"));
        assert_eq!(ctx.linked("b"), Some("a"));
    }

    #[test]
    fn embed_target_defaults_to_short() {
        assert_eq!(Tier::from_embed_target("mem.long"), Tier::Long);
        assert_eq!(Tier::from_embed_target("mem.short"), Tier::Short);
        assert_eq!(Tier::from_embed_target("mem.latent"), Tier::Short);
        assert_eq!(Tier::from_embed_target("long"), Tier::Short);
    }
}
