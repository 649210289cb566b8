//! Expression evaluation.

use quill_ir::{Assign, Binary, BinaryOp, Call, Index, NodeKind, Span, Unary};

use super::{required, Interpreter};
use crate::errors::{arity_mismatch, malformed_node, not_callable, type_mismatch, EvalResult};
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::Value;

impl Interpreter<'_> {
    pub(crate) fn eval_unary(&mut self, unary: &Unary) -> EvalResult {
        let operand = self.eval(required(unary.operand, "unary expression")?)?;
        Ok(evaluate_unary(&operand, unary.op)?)
    }

    /// `&&` and `||` skip the right operand when the left decides.
    pub(crate) fn eval_binary(&mut self, binary: &Binary) -> EvalResult {
        let left = self.eval(required(binary.left, "binary expression")?)?;
        let right_id = required(binary.right, "binary expression")?;
        match binary.op {
            BinaryOp::And if !left.is_truthy() => return Ok(Value::Bool(false)),
            BinaryOp::Or if left.is_truthy() => return Ok(Value::Bool(true)),
            _ => {}
        }
        let right = self.eval(right_id)?;
        Ok(evaluate_binary(&left, &right, binary.op)?)
    }

    /// Assignment writes the nearest binding and yields the assigned value.
    pub(crate) fn eval_assign(&mut self, assign: &Assign) -> EvalResult {
        let target = required(assign.target, "assignment")?;
        let NodeKind::Variable(variable) = self.tree.kind(target) else {
            return Err(malformed_node("assignment").into());
        };
        let name = variable.name;
        let value = self.eval(required(assign.value, "assignment")?)?;
        self.assign(name, value.clone(), false)?;
        Ok(value)
    }

    /// Out-of-range and negative indices read as null.
    pub(crate) fn eval_index(&mut self, index: &Index) -> EvalResult {
        let target = self.eval(required(index.target, "index expression")?)?;
        let position = self.eval(required(index.index, "index expression")?)?;
        match (&target, &position) {
            (Value::List(items), Value::Int(i)) => Ok(usize::try_from(*i)
                .ok()
                .and_then(|i| items.get(i))
                .cloned()
                .unwrap_or_default()),
            (Value::List(_), other) => Err(type_mismatch("int", other.type_name()).into()),
            (other, _) => Err(type_mismatch("list", other.type_name()).into()),
        }
    }

    /// Evaluate a call expression.
    ///
    /// Arguments are evaluated left to right before the callee is entered.
    /// A callee with a declared parameter list must receive at least as many
    /// arguments as it requires.
    pub(crate) fn eval_call(&mut self, call: &Call, span: Span) -> EvalResult {
        let tree = self.tree;
        let callee = self.eval(required(call.callee, "call")?)?;
        let function = match callee {
            Value::Function(function) => function,
            other => return Err(not_callable(other.type_name()).into()),
        };
        let view = tree.function(function).ok_or_else(|| malformed_node("function"))?;

        let mut args = Vec::new();
        if let Some(list) = call.args {
            for element in tree.children(list).into_iter().flatten() {
                // Separators are kept in the list as token nodes.
                if matches!(tree.kind(element), NodeKind::Token(_)) {
                    continue;
                }
                args.push(self.eval(element)?);
            }
        }

        if !view.has_variable_params() && args.len() < view.required_parameter_count() {
            let name = view.name().map_or("<anonymous>", |name| tree.name_str(name));
            return Err(arity_mismatch(name, view.required_parameter_count(), args.len()).into());
        }

        Ok(self.call_function(function, args, None, Some(span))?)
    }
}
