//! The `if` condition policy.
//!
//! Conditions are raw text, classified by a fixed priority chain rather than
//! parsed as expressions:
//!
//! 1. text containing `loss` is assumed true (placeholder for a numeric
//!    threshold check such as `loss > 0.1`);
//! 2. text starting with `context includes ` tests short-term memory for the
//!    quoted needle;
//! 3. anything else is unsupported and never runs its body.

/// Substring that selects the stubbed loss check.
pub const LOSS_MARKER: &str = "loss";

/// Prefix of a short-term memory containment check.
pub const CONTEXT_INCLUDES_PREFIX: &str = "context includes ";

/// A classified `if` condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition<'a> {
    /// Always true. Checked before every other form.
    LossStub,
    /// True iff a short-term key or value contains the needle.
    ContextIncludes(&'a str),
    /// No recognized form.
    Unsupported,
}

impl<'a> Condition<'a> {
    pub fn parse(text: &'a str) -> Self {
        if text.contains(LOSS_MARKER) {
            return Condition::LossStub;
        }
        match text.strip_prefix(CONTEXT_INCLUDES_PREFIX) {
            Some(rest) => Condition::ContextIncludes(
                rest.trim_matches(|c: char| matches!(c, '"' | '\'' | ' ')),
            ),
            None => Condition::Unsupported,
        }
    }
}
