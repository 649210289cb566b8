//! Quill evaluator.
//!
//! Walks a [`quill_ir::SyntaxTree`] and renders it: raw text and the values
//! of expression statements go to an [`OutputHandler`], while bindings live
//! in a stack of frames with per-binding read-only markers.
//!
//! # Architecture
//!
//! - [`Interpreter`]: direct recursion over node kinds, built with
//!   [`InterpreterBuilder`]
//! - [`Environment`]: binding frames, innermost last
//! - [`CallStack`]: active calls and the recursion limit
//! - [`evaluate_binary`] / [`evaluate_unary`]: operator semantics
//! - [`check_structure`]: pre-evaluation check over the visitor protocol

mod diagnostics;
mod environment;
pub mod errors;
mod eval_mode;
mod interpreter;
mod operators;
mod output;
mod precheck;
mod value;

use std::sync::Once;

pub use diagnostics::{CallFrame, CallStack, EvalCounters};
pub use environment::{Binding, Environment, Mutability, ReadOnlyError, Scope};
pub use errors::{
    BacktraceFrame, ControlAction, EvalBacktrace, EvalError, EvalErrorKind, EvalResult,
};
pub use eval_mode::{EvalMode, DEFAULT_RECURSION_LIMIT};
pub use interpreter::{Interpreter, InterpreterBuilder, ScopedInterpreter};
pub use operators::{evaluate_binary, evaluate_unary};
pub use output::{buffer_handler, silent_handler, stdout_handler, OutputHandler, SharedOutput};
pub use precheck::check_structure;
pub use value::Value;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set,
/// e.g. `RUST_LOG=quill_eval=trace` to follow frame pushes and pops.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // A host may already have installed a global subscriber.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .with(filter)
                .try_init();
        }
    });
}
