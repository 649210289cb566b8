//! Operator semantics.
//!
//! Direct dispatch on the operand pair. Integer arithmetic is checked;
//! mixing an int with a float promotes to float; `+` concatenates as soon
//! as either side is a string. `&&` and `||` short-circuit in the
//! interpreter and only reach [`evaluate_binary`] with both operands
//! already evaluated.

use std::cmp::Ordering;

use quill_ir::{BinaryOp, UnaryOp};

use crate::errors::{
    division_by_zero, integer_overflow, invalid_binary_op, invalid_unary_op, modulo_by_zero,
    EvalError,
};
use crate::Value;

type OpResult = Result<Value, EvalError>;

#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> OpResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

#[allow(clippy::cast_precision_loss)]
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> OpResult {
    match op {
        BinaryOp::Eq => return Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => return Ok(Value::Bool(left != right)),
        BinaryOp::And => return Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => return Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        _ => {}
    }

    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Float(a), Value::Float(b)) => eval_float_binary(*a, *b, op),
        (Value::Int(a), Value::Float(b)) => eval_float_binary(*a as f64, *b, op),
        (Value::Float(a), Value::Int(b)) => eval_float_binary(*a, *b as f64, op),
        (Value::Str(_), _) | (_, Value::Str(_)) if op == BinaryOp::Add => {
            Ok(Value::string(format!("{left}{right}")))
        }
        (Value::Str(a), Value::Str(b)) => compare(op, a.cmp(b))
            .ok_or_else(|| invalid_binary_op(op, left.type_name(), right.type_name())),
        (Value::List(a), Value::List(b)) if op == BinaryOp::Add => {
            let mut items = Vec::with_capacity(a.len() + b.len());
            items.extend(a.iter().cloned());
            items.extend(b.iter().cloned());
            Ok(Value::list(items))
        }
        _ => Err(invalid_binary_op(op, left.type_name(), right.type_name())),
    }
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> OpResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div if b == 0 => Err(division_by_zero()),
        BinaryOp::Div => checked_arith(a.checked_div(b), "division"),
        BinaryOp::Rem if b == 0 => Err(modulo_by_zero()),
        BinaryOp::Rem => checked_arith(a.checked_rem(b), "remainder"),
        _ => compare(op, a.cmp(&b)).ok_or_else(|| invalid_binary_op(op, "int", "int")),
    }
}

#[allow(clippy::float_cmp)]
fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> OpResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div if b == 0.0 => Err(division_by_zero()),
        BinaryOp::Div => Ok(Value::Float(a / b)),
        BinaryOp::Rem if b == 0.0 => Err(modulo_by_zero()),
        BinaryOp::Rem => Ok(Value::Float(a % b)),
        _ => match a.partial_cmp(&b) {
            Some(ordering) => compare(op, ordering).ok_or_else(|| invalid_binary_op(op, "float", "float")),
            // NaN orders against nothing.
            None => Ok(Value::Bool(false)),
        },
    }
}

/// Result of an ordering operator, `None` for non-comparison operators.
fn compare(op: BinaryOp, ordering: Ordering) -> Option<Value> {
    let result = match op {
        BinaryOp::Lt => ordering.is_lt(),
        BinaryOp::LtEq => ordering.is_le(),
        BinaryOp::Gt => ordering.is_gt(),
        BinaryOp::GtEq => ordering.is_ge(),
        _ => return None,
    };
    Some(Value::Bool(result))
}

pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> OpResult {
    match (op, operand) {
        (UnaryOp::Not, value) => Ok(Value::Bool(!value.is_truthy())),
        (UnaryOp::Neg, Value::Int(n)) => checked_arith(n.checked_neg(), "negation"),
        (UnaryOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOp::Neg, value) => Err(invalid_unary_op(op, value.type_name())),
    }
}
