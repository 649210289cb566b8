//! Call tracking for the evaluator.
//!
//! - [`CallStack`]: live frames with the recursion limit check built in
//! - [`CallFrame`]: the function name and call site of one frame
//! - [`EvalCounters`]: statement and call counts, logged after a run
//!
//! When an error escapes a call, the stack is snapshotted into the
//! error's [`EvalBacktrace`].

use quill_ir::{Name, Span, StringInterner};

use crate::errors::{recursion_limit_exceeded, BacktraceFrame, EvalBacktrace, EvalError};

/// One active call.
#[derive(Clone, Debug)]
pub struct CallFrame {
    /// Function name, `Name::EMPTY` for anonymous functions.
    pub name: Name,
    /// Where the call was made, if it came from a call expression.
    pub call_span: Option<Span>,
}

/// Active calls, innermost last.
///
/// `push` refuses to grow past `max_depth`; `None` means unbounded and
/// relies on stack growth for deep recursion.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    pub fn new(max_depth: Option<usize>) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame. The frame is not pushed when the limit is reached.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(recursion_limit_exceeded(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "CallStack::pop on empty stack");
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[inline]
    pub fn current_frame(&self) -> Option<&CallFrame> {
        self.frames.last()
    }

    /// Snapshot the stack, most recent call first.
    pub fn capture(&self, interner: &StringInterner) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|frame| BacktraceFrame {
                name: if frame.name == Name::EMPTY {
                    "<anonymous>".to_string()
                } else {
                    interner.lookup(frame.name).to_string()
                },
                span: frame.call_span,
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a snapshot of this stack to `err` if it has none yet.
    pub fn attach_backtrace(&self, err: EvalError, interner: &StringInterner) -> EvalError {
        if self.frames.is_empty() {
            return err;
        }
        err.with_backtrace(self.capture(interner))
    }
}

impl Default for CallStack {
    fn default() -> Self {
        CallStack::new(None)
    }
}

/// Work done by one interpreter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalCounters {
    pub statements_executed: u64,
    pub function_calls: u64,
}

impl EvalCounters {
    #[inline]
    pub fn count_statement(&mut self) {
        self.statements_executed = self.statements_executed.wrapping_add(1);
    }

    #[inline]
    pub fn count_function_call(&mut self) {
        self.function_calls = self.function_calls.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests;
