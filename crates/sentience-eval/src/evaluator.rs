//! Statement evaluator: walks the node tree and writes the trace.

use crate::condition::Condition;
use crate::context::{AgentContext, Tier, INIT_KEY};
use crate::error::{Diagnostic, EvalResult};
use sentience_types::ast::*;
use std::fmt;
use std::io::{self, Write};

/// Indentation added per nesting level.
pub const INDENT_UNIT: &str = "  ";

/// The tree-walking interpreter.
///
/// Owns the trace sink for the duration of a run and records every soft
/// error it reports. Memory lives in the [`AgentContext`] passed to each
/// call, so one interpreter can drive several contexts in turn.
pub struct Interpreter<W: Write> {
    sink: W,
    diagnostics: Vec<Diagnostic>,
}

impl Interpreter<io::Stdout> {
    /// An interpreter tracing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Interpreter<W> {
    /// An interpreter tracing to `sink`.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            diagnostics: Vec::new(),
        }
    }

    /// Soft errors reported so far, in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The sink trace lines are written to.
    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// Consume the interpreter, returning the sink.
    pub fn into_sink(self) -> W {
        self.sink
    }

    /// Evaluate every top-level statement of `program` at zero indentation.
    pub fn run<'ast>(
        &mut self,
        program: &'ast Program,
        ctx: &mut AgentContext<'ast>,
    ) -> EvalResult<()> {
        self.eval_block(&program.statements, "", ctx)?;
        self.sink.flush()?;
        Ok(())
    }

    // ══════════════════════════════════════════════════════════════════════
    // Dispatch
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate `node` with trace lines prefixed by `indent`.
    ///
    /// Only a failing sink stops traversal; everything else is reported as
    /// a [`Diagnostic`] and evaluation continues.
    pub fn eval<'ast>(
        &mut self,
        node: &'ast Node,
        indent: &str,
        ctx: &mut AgentContext<'ast>,
    ) -> EvalResult<()> {
        tracing::debug!(
            kind = node.kind_name(),
            depth = indent.len() / INDENT_UNIT.len(),
            "eval"
        );
        match node {
            Node::Program(program) => self.eval_block(&program.statements, indent, ctx),
            Node::Agent(agent) => self.eval_agent(agent, indent, ctx),
            Node::Mem(mem) => {
                self.line(indent, format_args!("Init mem: {}", mem.target))?;
                ctx.set_mem(&mem.target, INIT_KEY, "1");
                Ok(())
            }
            Node::OnInput(on_input) => {
                self.line(indent, format_args!("On Input: ({})", on_input.param))?;
                self.eval_block(&on_input.body, &nested(indent), ctx)
            }
            Node::Reflect(reflect) => {
                self.eval_labelled_block("Reflect", &reflect.body, indent, ctx)
            }
            Node::Train(train) => {
                self.eval_labelled_block("Train", &train.body, indent, ctx)
            }
            Node::Evolve(evolve) => {
                self.eval_labelled_block("Evolve", &evolve.body, indent, ctx)
            }
            Node::Goal(goal) => self.line(indent, format_args!("Goal: \"{}\"", goal.value)),
            Node::Embed(embed) => self.eval_embed(embed, indent, ctx),
            Node::Link(link) => {
                self.line(indent, format_args!("Link: {} <-> {}", link.from, link.to))?;
                ctx.link(&link.from, &link.to);
                Ok(())
            }
            Node::If(stmt) => self.eval_if(stmt, indent, ctx),
            Node::Enter(enter) => self.line(indent, format_args!("Enter: {}", enter.target)),
            Node::ReflectAccess(access) => {
                let value = ctx.get_mem(&access.mem_target, &access.key);
                self.line(
                    indent,
                    format_args!("mem.{}[\"{}\"] = \"{}\"", access.mem_target, access.key, value),
                )
            }
            Node::Print(print) => self.line(indent, format_args!("{}", print.value)),
            Node::ReflectLatent(latent) => {
                let results = ctx.similar_to(&latent.query);
                self.line(
                    indent,
                    format_args!(
                        "mem.latent similar_to(\"{}\") → [{}]",
                        latent.query,
                        results.join(" ")
                    ),
                )
            }
            Node::Unknown(_) => self.diagnose(
                indent,
                Diagnostic::UnknownNode {
                    kind: node.kind_name().to_string(),
                },
            ),
        }
    }

    fn eval_block<'ast>(
        &mut self,
        body: &'ast [Node],
        indent: &str,
        ctx: &mut AgentContext<'ast>,
    ) -> EvalResult<()> {
        for stmt in body {
            self.eval(stmt, indent, ctx)?;
        }
        Ok(())
    }

    /// `reflect`, `train` and `evolve` differ only in their header line.
    fn eval_labelled_block<'ast>(
        &mut self,
        label: &str,
        body: &'ast [Node],
        indent: &str,
        ctx: &mut AgentContext<'ast>,
    ) -> EvalResult<()> {
        self.line(indent, format_args!("{label} block:"))?;
        self.eval_block(body, &nested(indent), ctx)
    }

    // ── Agents ───────────────────────────────────────────────────────────

    /// Registers the agent. Train blocks directly in its body are skipped.
    fn eval_agent<'ast>(
        &mut self,
        agent: &'ast AgentStatement,
        indent: &str,
        ctx: &mut AgentContext<'ast>,
    ) -> EvalResult<()> {
        self.line(indent, format_args!("Agent: {}", agent.name))?;
        ctx.enter_agent(agent);

        let inner = nested(indent);
        for stmt in agent.body.iter().filter(|s| !matches!(s, Node::Train(_))) {
            self.eval(stmt, &inner, ctx)?;
        }

        self.line(indent, format_args!("Agent: {} [registered]", agent.name))
    }

    // ── Memory ───────────────────────────────────────────────────────────

    /// Copies the short-term value of `source` into the target tier under
    /// the same key. The short-term entry is left in place.
    fn eval_embed(
        &mut self,
        embed: &EmbedStatement,
        indent: &str,
        ctx: &mut AgentContext<'_>,
    ) -> EvalResult<()> {
        self.line(indent, format_args!("Embed: {} -> {}", embed.source, embed.target))?;
        let value = ctx.get(Tier::Short, &embed.source).to_string();
        ctx.set(Tier::from_embed_target(&embed.target), &embed.source, value);
        Ok(())
    }

    // ── Conditions ───────────────────────────────────────────────────────

    fn eval_if<'ast>(
        &mut self,
        stmt: &'ast IfStatement,
        indent: &str,
        ctx: &mut AgentContext<'ast>,
    ) -> EvalResult<()> {
        self.line(indent, format_args!("If: {}", stmt.condition))?;
        let inner = nested(indent);

        match Condition::parse(&stmt.condition) {
            Condition::LossStub => {
                self.diagnose(
                    &inner,
                    Diagnostic::StubbedCondition {
                        condition: stmt.condition.clone(),
                    },
                )?;
                self.eval_block(&stmt.body, &inner, ctx)
            }
            Condition::ContextIncludes(needle) => {
                if ctx.context_includes(needle) {
                    self.eval_block(&stmt.body, &inner, ctx)
                } else {
                    self.diagnose(
                        &inner,
                        Diagnostic::ContextMiss {
                            key: needle.to_string(),
                        },
                    )
                }
            }
            Condition::Unsupported => self.diagnose(
                indent,
                Diagnostic::ConditionUnsupported {
                    condition: stmt.condition.clone(),
                },
            ),
        }
    }

    // ── Output ───────────────────────────────────────────────────────────

    fn line(&mut self, indent: &str, text: fmt::Arguments<'_>) -> EvalResult<()> {
        writeln!(self.sink, "{indent}{text}")?;
        Ok(())
    }

    fn diagnose(&mut self, indent: &str, diagnostic: Diagnostic) -> EvalResult<()> {
        tracing::warn!(%diagnostic, "soft error");
        self.line(indent, format_args!("{diagnostic}"))?;
        self.diagnostics.push(diagnostic);
        Ok(())
    }
}

/// Evaluate `node` into `sink`, returning the diagnostics reported.
pub fn evaluate<'ast, W: Write>(
    node: &'ast Node,
    indent: &str,
    ctx: &mut AgentContext<'ast>,
    sink: W,
) -> EvalResult<Vec<Diagnostic>> {
    let mut interpreter = Interpreter::new(sink);
    interpreter.eval(node, indent, ctx)?;
    interpreter.sink.flush()?;
    Ok(interpreter.diagnostics)
}

fn nested(indent: &str) -> String {
    format!("{indent}{INDENT_UNIT}")
}
