//! `InterpreterBuilder` for configuring an [`Interpreter`].

use super::Interpreter;
use crate::diagnostics::{CallStack, EvalCounters};
use crate::environment::{Environment, Mutability};
use crate::output::{stdout_handler, SharedOutput};
use crate::{EvalMode, Value};
use quill_ir::SyntaxTree;

/// Builder for [`Interpreter`].
///
/// Defaults: [`EvalMode::Render`], output to stdout, no globals.
pub struct InterpreterBuilder<'a> {
    tree: &'a SyntaxTree,
    mode: EvalMode,
    output: Option<SharedOutput>,
    globals: Vec<(String, Value, Mutability)>,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(tree: &'a SyntaxTree) -> Self {
        InterpreterBuilder {
            tree,
            mode: EvalMode::default(),
            output: None,
            globals: Vec::new(),
        }
    }

    /// Set the evaluation mode, which decides the recursion limit.
    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Send rendered output to `output`.
    #[must_use]
    pub fn output(mut self, output: SharedOutput) -> Self {
        self.output = Some(output);
        self
    }

    /// Pre-seed a mutable global.
    #[must_use]
    pub fn global(mut self, name: &str, value: Value) -> Self {
        self.globals.push((name.to_string(), value, Mutability::Mutable));
        self
    }

    /// Pre-seed a read-only global.
    #[must_use]
    pub fn read_only_global(mut self, name: &str, value: Value) -> Self {
        self.globals.push((name.to_string(), value, Mutability::ReadOnly));
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        let mut env = Environment::new();
        let interner = self.tree.interner();
        for (name, value, mutability) in self.globals {
            env.define_global(interner.intern(&name), value, mutability);
        }

        Interpreter {
            tree: self.tree,
            env,
            call_stack: CallStack::new(self.mode.max_recursion_depth()),
            mode: self.mode,
            output: self.output.unwrap_or_else(stdout_handler),
            counters: EvalCounters::default(),
        }
    }
}
