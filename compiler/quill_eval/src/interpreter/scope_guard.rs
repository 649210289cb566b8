//! RAII guards for frame management.
//!
//! [`ScopedInterpreter`] pops what it pushed when dropped, including
//! during unwinding, so the binding frames and the call stack stay
//! balanced on every exit path. It derefs to the interpreter, so code
//! holding the guard uses it exactly like the interpreter itself.
//!
//! ```text
//! let mut scoped = interpreter.call_scope(frame)?;
//! scoped.env.define_local(name, value, Mutability::ReadOnly);
//! let result = scoped.eval(body);
//! // frame and scope popped here
//! ```

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::diagnostics::CallFrame;
use crate::errors::EvalError;

/// Guard over one pushed binding frame, and optionally one call frame.
pub struct ScopedInterpreter<'guard, 'interp> {
    interpreter: &'guard mut Interpreter<'interp>,
    call_frame: bool,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
        if self.call_frame {
            self.interpreter.call_stack.pop();
            tracing::trace!(depth = self.interpreter.call_stack.depth(), "pop call frame");
        }
    }
}

impl<'interp> Deref for ScopedInterpreter<'_, 'interp> {
    type Target = Interpreter<'interp>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'a> Interpreter<'a> {
    /// Push a binding frame, popped when the guard drops.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_, 'a> {
        self.env.push_scope();
        ScopedInterpreter {
            interpreter: self,
            call_frame: false,
        }
    }

    /// Push a call frame and a binding frame for a function invocation.
    ///
    /// Fails without pushing anything when the recursion limit is reached.
    pub fn call_scope(&mut self, frame: CallFrame) -> Result<ScopedInterpreter<'_, 'a>, EvalError> {
        self.call_stack.push(frame)?;
        tracing::trace!(depth = self.call_stack.depth(), "push call frame");
        self.env.push_scope();
        Ok(ScopedInterpreter {
            interpreter: self,
            call_frame: true,
        })
    }

    /// Run `f` inside a fresh binding frame.
    pub fn with_env_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_, 'a>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }
}
