//! Runtime errors and control signals.
//!
//! `EvalErrorKind` gives every failure a typed category. The factory
//! functions at the bottom of this module are the public way to build an
//! [`EvalError`]; they fill in both the kind and the rendered message.
//!
//! A `return` is not an error but travels through the same `Err` channel as
//! [`ControlAction::Return`], so `?` carries it up through blocks and
//! conditionals until the enclosing function body catches it.

use std::fmt;

use quill_ir::{BinaryOp, Span, UnaryOp};

use crate::Value;

/// Result of evaluating a node.
pub type EvalResult = Result<Value, ControlAction>;

/// Non-local exits from evaluation.
#[derive(Clone, Debug)]
pub enum ControlAction {
    /// A `return` signal and its payload.
    Return(Value),
    /// A runtime error.
    Error(Box<EvalError>),
}

impl ControlAction {
    /// Convert into an error at a function or program boundary.
    ///
    /// A stray `return` becomes `ReturnPropagationError`.
    pub fn into_error(self) -> EvalError {
        match self {
            ControlAction::Error(err) => *err,
            ControlAction::Return(_) => return_propagation(),
        }
    }
}

impl From<EvalError> for ControlAction {
    #[inline]
    fn from(err: EvalError) -> Self {
        ControlAction::Error(Box::new(err))
    }
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("cannot assign to read-only variable `{name}`")]
    ReadOnlyViolation { name: String },

    #[error("function `{name}` expects {expected} arguments, got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("maximum recursion depth exceeded (limit: {limit})")]
    RecursionLimitExceeded { limit: usize },

    #[error("return reached the top level outside of any function")]
    ReturnPropagationError,

    #[error("value of type {type_name} is not callable")]
    NotCallable { type_name: String },

    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("operator `{op}` is not supported between {left} and {right}")]
    InvalidBinaryOp {
        op: String,
        left: String,
        right: String,
    },

    #[error("operator `{op}` is not supported on {type_name}")]
    InvalidUnaryOp { op: String, type_name: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: String },

    #[error("malformed {what} node")]
    MalformedNode { what: &'static str },
}

/// A single frame of a captured backtrace, most recent call first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    pub name: String,
    pub span: Option<Span>,
}

/// Snapshot of the call stack at the point an error was raised.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        EvalBacktrace { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(span) = frame.span {
                write!(f, " at {span:?}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Rendered message; equal to `kind.to_string()` for factory-built errors.
    pub message: String,
    /// Location of the node that failed, when known.
    pub span: Option<Span>,
    /// Calls active when the error was raised.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            span: None,
            backtrace: None,
        }
    }

    /// Attach a span unless one is already set.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    /// Attach a backtrace unless one is already set.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        if self.backtrace.is_none() {
            self.backtrace = Some(backtrace);
        }
        self
    }
}

// Binding errors

#[cold]
pub fn read_only_violation(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReadOnlyViolation {
        name: name.to_string(),
    })
}

// Call errors

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimitExceeded { limit })
}

#[cold]
pub fn return_propagation() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReturnPropagationError)
}

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

// Operator errors

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn invalid_binary_op(op: BinaryOp, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinaryOp {
        op: op.token().to_string(),
        left: left.to_string(),
        right: right.to_string(),
    })
}

#[cold]
pub fn invalid_unary_op(op: UnaryOp, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUnaryOp {
        op: op.token().to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

// Tree errors

/// A node is missing a slot the evaluator needs, e.g. a hand-built
/// `if` without a condition.
#[cold]
pub fn malformed_node(what: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MalformedNode { what })
}
