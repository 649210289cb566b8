//! Binding frames for the evaluator.
//!
//! The environment is a stack of [`Scope`]s, innermost last. The bottom
//! scope holds globals and is never popped. Name lookup walks from the
//! innermost scope outward and stops at the first binding for the name.
//!
//! A read-only marker lives on the [`Binding`], so it disappears when the
//! scope holding that binding is popped. While it lives, it guards the name
//! in every frame above it: a shadowing binding in a nested frame does not
//! make the name writable again. A binding may exist without a value:
//! `readonly x` before any `x = ...` creates one in the innermost scope, and
//! the first write through it is then rejected.

use rustc_hash::FxHashMap;

use quill_ir::Name;

use crate::Value;

/// Whether a binding may be written.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mutability {
    #[default]
    Mutable,
    ReadOnly,
}

impl Mutability {
    #[inline]
    pub fn is_read_only(self) -> bool {
        matches!(self, Mutability::ReadOnly)
    }
}

/// A write was rejected because the name is read-only in some frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ReadOnlyError {
    pub name: Name,
}

/// A storage location for one name.
#[derive(Clone, Debug, Default)]
pub struct Binding {
    pub value: Option<Value>,
    pub mutability: Mutability,
}

/// One frame of bindings.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Binding>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn get(&self, name: Name) -> Option<&Binding> {
        self.bindings.get(&name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Stack of binding frames.
#[derive(Clone, Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

impl Environment {
    /// An environment holding only the global scope.
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::new()],
        }
    }

    /// Number of frames, the global scope included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
        tracing::trace!(depth = self.scopes.len(), "push scope");
    }

    /// Pop the innermost frame. The global scope is never popped; returns
    /// `None` when only it remains.
    pub fn pop_scope(&mut self) -> Option<Scope> {
        if self.scopes.len() <= 1 {
            return None;
        }
        let scope = self.scopes.pop();
        tracing::trace!(depth = self.scopes.len(), "pop scope");
        scope
    }

    fn innermost(&mut self) -> &mut Scope {
        if self.scopes.is_empty() {
            self.scopes.push(Scope::new());
        }
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Nearest binding for `name`, innermost frame first.
    pub fn binding(&self, name: Name) -> Option<&Binding> {
        self.scopes.iter().rev().find_map(|scope| scope.bindings.get(&name))
    }

    fn binding_mut(&mut self, name: Name) -> Option<&mut Binding> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.bindings.get_mut(&name))
    }

    /// Value of the nearest binding. A value-less binding shadows outer
    /// ones and reads as `None`.
    pub fn lookup(&self, name: Name) -> Option<&Value> {
        self.binding(name)?.value.as_ref()
    }

    /// True if any frame holds a read-only binding for `name`.
    pub fn is_read_only(&self, name: Name) -> bool {
        self.scopes.iter().any(|scope| {
            scope
                .bindings
                .get(&name)
                .is_some_and(|binding| binding.mutability.is_read_only())
        })
    }

    /// Write the nearest binding for `name`, or create one in the innermost
    /// frame. With `read_only`, the written binding becomes read-only.
    ///
    /// Fails if `name` is read-only in any frame, shadowed or not.
    pub fn set_value(&mut self, name: Name, value: Value, read_only: bool) -> Result<(), ReadOnlyError> {
        if self.is_read_only(name) {
            return Err(ReadOnlyError { name });
        }
        let mutability = if read_only {
            Mutability::ReadOnly
        } else {
            Mutability::Mutable
        };

        if let Some(binding) = self.binding_mut(name) {
            binding.value = Some(value);
            binding.mutability = mutability;
            return Ok(());
        }

        self.innermost().bindings.insert(
            name,
            Binding {
                value: Some(value),
                mutability,
            },
        );
        Ok(())
    }

    /// Bind a fresh mutable `name` in the innermost frame, as a call binds
    /// its parameters. Fails like [`set_value`](Self::set_value) when the
    /// name is read-only in any frame.
    pub fn bind_local(&mut self, name: Name, value: Value) -> Result<(), ReadOnlyError> {
        if self.is_read_only(name) {
            return Err(ReadOnlyError { name });
        }
        self.define_local(name, value, Mutability::Mutable);
        Ok(())
    }

    /// Bind `name` in the innermost frame, replacing any binding there.
    /// Read-only markers in outer frames are not consulted.
    pub fn define_local(&mut self, name: Name, value: Value, mutability: Mutability) {
        self.innermost().bindings.insert(
            name,
            Binding {
                value: Some(value),
                mutability,
            },
        );
    }

    /// Bind `name` in the global frame, replacing any binding there.
    pub fn define_global(&mut self, name: Name, value: Value, mutability: Mutability) {
        if let Some(global) = self.scopes.first_mut() {
            global.bindings.insert(
                name,
                Binding {
                    value: Some(value),
                    mutability,
                },
            );
        }
    }

    /// Mark the nearest binding for `name` read-only, creating a value-less
    /// one in the innermost frame if none exists. Idempotent.
    pub fn set_read_only(&mut self, name: Name) {
        if let Some(binding) = self.binding_mut(name) {
            binding.mutability = Mutability::ReadOnly;
            return;
        }
        self.innermost().bindings.insert(
            name,
            Binding {
                value: None,
                mutability: Mutability::ReadOnly,
            },
        );
    }
}
