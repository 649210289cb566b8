//! Statement execution.

use quill_ir::{NodeId, NodeKind, ReadOnlyStmt, ReturnStmt};

use super::{required, Interpreter};
use crate::errors::{malformed_node, ControlAction, EvalResult};
use crate::Value;

impl Interpreter<'_> {
    /// Run statements in order. Expression statements write their value
    /// unless it is null; a delegate block in statement position runs.
    pub(crate) fn exec_block(&mut self, statements: &[NodeId]) -> EvalResult {
        let tree = self.tree;
        for &stmt in statements {
            self.counters.count_statement();
            let value = self.eval(stmt)?;
            match tree.kind(stmt) {
                NodeKind::Assign(_) | NodeKind::Function(_) => {}
                kind if kind.is_expression() => {
                    self.emit(value)?;
                }
                _ => {}
            }
        }
        Ok(Value::Null)
    }

    fn emit(&mut self, value: Value) -> EvalResult {
        match value {
            Value::Null | Value::Function(_) => {}
            Value::Block(block) => {
                self.eval(block)?;
            }
            other => self.write(&other.to_string()),
        }
        Ok(Value::Null)
    }

    /// Walk an `if` / `else if` / `else` chain. Each guard is evaluated at
    /// most once and at most one body runs.
    pub(crate) fn exec_conditional(&mut self, head: NodeId) -> EvalResult {
        let tree = self.tree;
        let mut segment = Some(head);
        while let Some(current) = segment {
            match tree.kind(current) {
                NodeKind::If(stmt) => {
                    let condition = self.eval(required(stmt.condition, "if statement")?)?;
                    if condition.is_truthy() {
                        return self.eval(required(stmt.then, "if statement")?);
                    }
                    segment = stmt.next;
                }
                NodeKind::Else(stmt) => return self.eval(required(stmt.body, "else statement")?),
                _ => return Err(malformed_node("conditional chain").into()),
            }
        }
        Ok(Value::Null)
    }

    pub(crate) fn exec_readonly(&mut self, stmt: &ReadOnlyStmt) -> EvalResult {
        let variable = required(stmt.variable, "readonly statement")?;
        match self.tree.kind(variable) {
            NodeKind::Variable(variable) => {
                self.mark_read_only(variable.name);
                Ok(Value::Null)
            }
            _ => Err(malformed_node("readonly statement").into()),
        }
    }

    pub(crate) fn exec_return(&mut self, stmt: &ReturnStmt) -> EvalResult {
        let value = match stmt.value {
            Some(value) => self.eval(value)?,
            None => Value::Null,
        };
        Err(ControlAction::Return(value))
    }

    /// Named functions bind under their name and yield null; anonymous
    /// ones yield the function value.
    pub(crate) fn eval_function_decl(&mut self, id: NodeId) -> EvalResult {
        let view = self
            .tree
            .function(id)
            .ok_or_else(|| malformed_node("function"))?;
        match view.name() {
            Some(name) => {
                self.assign(name, Value::Function(id), false)?;
                Ok(Value::Null)
            }
            None => Ok(Value::Function(id)),
        }
    }
}
