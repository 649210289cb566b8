//! Function invocation.

use std::rc::Rc;

use quill_ir::{Name, NodeId, Span};

use super::{required, Interpreter};
use crate::diagnostics::CallFrame;
use crate::environment::Mutability;
use crate::errors::{not_callable, read_only_violation, ControlAction, EvalError};
use crate::Value;

impl Interpreter<'_> {
    /// Invoke the function declared at `function` with `args`, binding
    /// `delegate` as `$$` when given.
    ///
    /// Arity is not checked here: missing parameters bind null. Call
    /// expressions check arity before invoking.
    pub fn invoke(
        &mut self,
        function: NodeId,
        args: Vec<Value>,
        delegate: Option<NodeId>,
    ) -> Result<Value, EvalError> {
        self.call_function(function, args, delegate, None)
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(function = function.raw(), args = args.len(), depth = self.call_stack.depth())
    )]
    pub(crate) fn call_function(
        &mut self,
        function: NodeId,
        args: Vec<Value>,
        delegate: Option<NodeId>,
        call_span: Option<Span>,
    ) -> Result<Value, EvalError> {
        let tree = self.tree;
        let view = tree
            .function(function)
            .ok_or_else(|| not_callable(tree.kind(function).describe()))?;
        let body = required(view.body(), "function")?;
        let frame = CallFrame {
            name: view.name().unwrap_or(Name::EMPTY),
            call_span,
        };

        self.counters.count_function_call();
        let mut scoped = self.call_scope(frame)?;

        let interner = tree.interner();
        let args = Rc::new(args);
        scoped.env.define_local(
            interner.arguments(),
            Value::List(Rc::clone(&args)),
            Mutability::ReadOnly,
        );
        for (i, param) in view.parameters().enumerate() {
            let value = args.get(i).cloned().unwrap_or_default();
            if let Err(err) = scoped.env.bind_local(param, value) {
                let err = read_only_violation(tree.name_str(err.name));
                return Err(scoped.call_stack.attach_backtrace(err, interner));
            }
        }
        if let Some(block) = delegate {
            scoped
                .env
                .define_local(interner.delegate_block(), Value::Block(block), Mutability::ReadOnly);
        }

        match scoped.eval(body) {
            Ok(value) if view.has_expression_body() => Ok(value),
            Ok(_) => Ok(Value::Null),
            // Also reached by a `ret` inside a delegate block run from the body.
            Err(ControlAction::Return(value)) => Ok(value),
            Err(ControlAction::Error(err)) => Err(scoped.call_stack.attach_backtrace(*err, interner)),
        }
    }
}
