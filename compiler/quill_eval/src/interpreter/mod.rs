//! Tree-walking interpreter.
//!
//! The interpreter borrows a [`SyntaxTree`] and evaluates it by direct
//! recursion over node kinds. Statements produce output as a side effect
//! and yield `Value::Null`; expressions yield their value. A `return`
//! travels up as [`ControlAction::Return`] until the enclosing function
//! invocation turns it into the call's result.
//!
//! Frames are managed with [`ScopedInterpreter`] guards, so every pushed
//! scope and call frame is popped on all exit paths.

mod builder;
mod expressions;
mod function_call;
mod scope_guard;
mod statements;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use quill_ir::{Name, NodeId, NodeKind, SyntaxTree};
use quill_stack::ensure_sufficient_stack;

use crate::diagnostics::{CallStack, EvalCounters};
use crate::environment::Environment;
use crate::errors::{malformed_node, read_only_violation, ControlAction, EvalError, EvalResult};
use crate::output::SharedOutput;
use crate::precheck::check_structure;
use crate::{EvalMode, Value};

pub struct Interpreter<'a> {
    pub(crate) tree: &'a SyntaxTree,
    pub(crate) env: Environment,
    pub(crate) call_stack: CallStack,
    pub(crate) mode: EvalMode,
    pub(crate) output: SharedOutput,
    pub(crate) counters: EvalCounters,
}

impl<'a> Interpreter<'a> {
    /// Interpreter with the default configuration, writing to stdout.
    pub fn new(tree: &'a SyntaxTree) -> Self {
        InterpreterBuilder::new(tree).build()
    }

    pub fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    pub fn mode(&self) -> &EvalMode {
        &self.mode
    }

    pub fn output(&self) -> &SharedOutput {
        &self.output
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    pub fn counters(&self) -> &EvalCounters {
        &self.counters
    }

    pub(crate) fn intern(&self, name: &str) -> Name {
        self.tree.interner().intern(name)
    }

    /// Evaluate `id` as a program.
    ///
    /// The subtree is checked for missing required slots before anything
    /// runs. A `return` that reaches this level is a
    /// `ReturnPropagationError`.
    pub fn evaluate(&mut self, id: NodeId) -> Result<Value, EvalError> {
        check_structure(self.tree, id)?;
        let result = self.eval(id).map_err(ControlAction::into_error);
        tracing::debug!(
            statements = self.counters.statements_executed,
            calls = self.counters.function_calls,
            ok = result.is_ok(),
            "evaluation finished"
        );
        result
    }

    /// Current value of `name`; undefined names read as null.
    pub fn get_value(&self, name: &str) -> Value {
        self.env.lookup(self.intern(name)).cloned().unwrap_or_default()
    }

    /// Write `name` in the nearest frame that binds it, or bind it in the
    /// innermost frame. With `read_only`, the binding becomes read-only.
    pub fn set_value(&mut self, name: &str, value: Value, read_only: bool) -> Result<(), EvalError> {
        let interned = self.intern(name);
        self.assign(interned, value, read_only)
    }

    /// Mark `name` read-only. Idempotent.
    pub fn set_read_only(&mut self, name: &str) {
        let interned = self.intern(name);
        self.mark_read_only(interned);
    }

    pub fn push_local(&mut self) {
        self.env.push_scope();
    }

    /// Pop the innermost frame. Returns false when only the global frame
    /// remains.
    pub fn pop_local(&mut self) -> bool {
        self.env.pop_scope().is_some()
    }

    pub(crate) fn assign(&mut self, name: Name, value: Value, read_only: bool) -> Result<(), EvalError> {
        self.env
            .set_value(name, value, read_only)
            .map_err(|err| read_only_violation(self.tree.name_str(err.name)))
    }

    pub(crate) fn mark_read_only(&mut self, name: Name) {
        self.env.set_read_only(name);
        tracing::debug!(name = self.tree.name_str(name), "marked read-only");
    }

    pub(crate) fn write(&self, text: &str) {
        self.output.write(text);
    }

    /// Evaluate any node.
    pub(crate) fn eval(&mut self, id: NodeId) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(id))
    }

    fn eval_inner(&mut self, id: NodeId) -> EvalResult {
        let tree = self.tree;
        let span = tree.span(id);
        let result = match tree.kind(id) {
            NodeKind::Block(block) => self.exec_block(&block.statements),
            NodeKind::Raw(raw) => {
                self.write(&raw.text);
                Ok(Value::Null)
            }
            // Code markers and stray keywords have no effect.
            NodeKind::Token(_) => Ok(Value::Null),
            NodeKind::If(_) => self.exec_conditional(id),
            NodeKind::Else(stmt) => self.eval(required(stmt.body, "else statement")?),
            NodeKind::ReadOnly(stmt) => self.exec_readonly(stmt),
            NodeKind::Return(stmt) => self.exec_return(stmt),
            NodeKind::Function(_) => self.eval_function_decl(id),
            NodeKind::Variable(variable) => Ok(self.env.lookup(variable.name).cloned().unwrap_or_default()),
            NodeKind::Literal(literal) => Ok(Value::from_literal(&literal.value)),
            NodeKind::Unary(unary) => self.eval_unary(unary),
            NodeKind::Binary(binary) => self.eval_binary(binary),
            NodeKind::Paren(paren) => self.eval(required(paren.inner, "parenthesized expression")?),
            NodeKind::Call(call) => self.eval_call(call, span),
            NodeKind::Index(index) => self.eval_index(index),
            NodeKind::Assign(assign) => self.eval_assign(assign),
            NodeKind::List(_) => Err(malformed_node("list").into()),
        };
        result.map_err(|mut action| {
            if let ControlAction::Error(err) = &mut action {
                if err.span.is_none() {
                    err.span = Some(span);
                }
            }
            action
        })
    }
}

/// A required slot of a hand-built tree may be empty.
#[inline]
pub(crate) fn required(slot: Option<NodeId>, what: &'static str) -> Result<NodeId, EvalError> {
    slot.ok_or_else(|| malformed_node(what))
}

#[cfg(test)]
mod tests;
