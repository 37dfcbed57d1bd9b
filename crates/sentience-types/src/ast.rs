//! AST node types for the Sentience agent language.
//!
//! Nodes are produced once by an external parser and consumed read-only by
//! the evaluator. Block-shaped statements own their child statements; no
//! node holds a reference to runtime state.
//!
//! On the wire a node is a JSON object tagged by a `type` field carrying the
//! variant name (`"AgentStatement"`, `"IfStatement"`, ...). Objects with an
//! unrecognized tag, or a payload that does not fit their tag, load as
//! [`Node::Unknown`] so the evaluator can surface them instead of the load
//! failing.

use crate::{AstError, Result};
use serde::{Deserialize, Serialize};

// ══════════════════════════════════════════════════════════════════════════════
// Node
// ══════════════════════════════════════════════════════════════════════════════

/// One parsed statement or block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    /// Root: an ordered list of top-level statements.
    Program(Program),
    /// `agent Name { body }`
    #[serde(rename = "AgentStatement")]
    Agent(AgentStatement),
    /// `mem short`
    #[serde(rename = "MemStatement")]
    Mem(MemStatement),
    /// `on input(param) { body }`
    #[serde(rename = "OnInputStatement")]
    OnInput(OnInputStatement),
    /// `reflect { body }`
    #[serde(rename = "ReflectStatement")]
    Reflect(ReflectStatement),
    /// `train { body }`
    #[serde(rename = "TrainStatement")]
    Train(TrainStatement),
    /// `goal: "text"`
    #[serde(rename = "GoalStatement")]
    Goal(GoalStatement),
    /// `embed source -> mem.long`
    #[serde(rename = "EmbedStatement")]
    Embed(EmbedStatement),
    /// `link a <-> b`
    #[serde(rename = "LinkStatement")]
    Link(LinkStatement),
    /// `if condition { body }`
    #[serde(rename = "IfStatement")]
    If(IfStatement),
    /// `enter target`
    #[serde(rename = "EnterStatement")]
    Enter(EnterStatement),
    /// `reflect { mem.short["key"] }`
    #[serde(rename = "ReflectAccessStatement")]
    ReflectAccess(ReflectAccessStatement),
    /// `print "text"`
    #[serde(rename = "PrintStatement")]
    Print(PrintStatement),
    /// `evolve { body }`
    #[serde(rename = "EvolveStatement")]
    Evolve(EvolveStatement),
    /// `reflect { mem.latent similar_to("query") }`
    #[serde(rename = "ReflectLatentStatement")]
    ReflectLatent(ReflectLatentStatement),
    /// A node this version does not know how to execute, kept verbatim.
    #[serde(untagged)]
    Unknown(serde_json::Value),
}

impl Node {
    /// The variant name as it appears in the `type` tag.
    ///
    /// For [`Node::Unknown`] this is whatever tag the producer supplied, or
    /// `<untyped>` when there was none.
    pub fn kind_name(&self) -> &str {
        match self {
            Node::Program(_) => "Program",
            Node::Agent(_) => "AgentStatement",
            Node::Mem(_) => "MemStatement",
            Node::OnInput(_) => "OnInputStatement",
            Node::Reflect(_) => "ReflectStatement",
            Node::Train(_) => "TrainStatement",
            Node::Goal(_) => "GoalStatement",
            Node::Embed(_) => "EmbedStatement",
            Node::Link(_) => "LinkStatement",
            Node::If(_) => "IfStatement",
            Node::Enter(_) => "EnterStatement",
            Node::ReflectAccess(_) => "ReflectAccessStatement",
            Node::Print(_) => "PrintStatement",
            Node::Evolve(_) => "EvolveStatement",
            Node::ReflectLatent(_) => "ReflectLatentStatement",
            Node::Unknown(raw) => raw
                .get("type")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("<untyped>"),
        }
    }

    /// Child statements of a block-shaped node; empty for leaves.
    pub fn body(&self) -> &[Node] {
        match self {
            Node::Program(p) => &p.statements,
            Node::Agent(a) => &a.body,
            Node::OnInput(o) => &o.body,
            Node::Reflect(r) => &r.body,
            Node::Train(t) => &t.body,
            Node::If(i) => &i.body,
            Node::Evolve(e) => &e.body,
            _ => &[],
        }
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "null".to_string())
    }

    /// Deserialize a single node from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Root & Blocks
// ══════════════════════════════════════════════════════════════════════════════

/// A complete program: the top-level statements in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub statements: Vec<Node>,
}

impl Program {
    pub fn new(statements: Vec<Node>) -> Self {
        Self { statements }
    }

    /// Load a program from a JSON document whose root is tagged `Program`.
    pub fn from_json(json: &str) -> Result<Self> {
        match Node::from_json(json)? {
            Node::Program(program) => Ok(program),
            other => Err(AstError::NotAProgram(other.kind_name().to_string())),
        }
    }

    /// Serialize to compact JSON, tagged as a `Program` node.
    pub fn to_json(&self) -> String {
        Node::Program(self.clone()).to_json()
    }
}

/// `agent Name { body }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStatement {
    pub name: String,
    #[serde(default)]
    pub body: Vec<Node>,
}

impl AgentStatement {
    pub fn new(name: impl Into<String>, body: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }
}

/// `on input(param) { body }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnInputStatement {
    pub param: String,
    #[serde(default)]
    pub body: Vec<Node>,
}

impl OnInputStatement {
    pub fn new(param: impl Into<String>, body: Vec<Node>) -> Self {
        Self {
            param: param.into(),
            body,
        }
    }
}

/// `reflect { body }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReflectStatement {
    #[serde(default)]
    pub body: Vec<Node>,
}

/// `train { body }`. Skipped when nested directly inside an agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainStatement {
    #[serde(default)]
    pub body: Vec<Node>,
}

/// `evolve { body }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvolveStatement {
    #[serde(default)]
    pub body: Vec<Node>,
}

/// `if condition { body }`
///
/// The condition is kept as raw text; the evaluator interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStatement {
    pub condition: String,
    #[serde(default)]
    pub body: Vec<Node>,
}

impl IfStatement {
    pub fn new(condition: impl Into<String>, body: Vec<Node>) -> Self {
        Self {
            condition: condition.into(),
            body,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Leaves
// ══════════════════════════════════════════════════════════════════════════════

/// `mem short`: declares a memory region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemStatement {
    pub target: String,
}

/// `goal: "text"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalStatement {
    pub value: String,
}

/// `embed source -> target`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedStatement {
    pub source: String,
    pub target: String,
}

/// `link from <-> to`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkStatement {
    pub from: String,
    pub to: String,
}

/// `enter target`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnterStatement {
    pub target: String,
}

/// `mem.<mem_target>["<key>"]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectAccessStatement {
    pub mem_target: String,
    pub key: String,
}

/// `print "text"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintStatement {
    pub value: String,
}

/// `mem.latent similar_to("query")`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectLatentStatement {
    pub query: String,
}

// ── Conversions ───────────────────────────────────────────────────────────────

macro_rules! into_node {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(stmt: $ty) -> Self {
                    Node::$variant(stmt)
                }
            }
        )*
    };
}

into_node! {
    Program => Program,
    AgentStatement => Agent,
    MemStatement => Mem,
    OnInputStatement => OnInput,
    ReflectStatement => Reflect,
    TrainStatement => Train,
    GoalStatement => Goal,
    EmbedStatement => Embed,
    LinkStatement => Link,
    IfStatement => If,
    EnterStatement => Enter,
    ReflectAccessStatement => ReflectAccess,
    PrintStatement => Print,
    EvolveStatement => Evolve,
    ReflectLatentStatement => ReflectLatent,
}
