//! Evaluation modes.
//!
//! The mode decides how deep user-level recursion may go. Native stack
//! growth protects the host in every mode; the limit protects templates
//! from runaway recursion.

/// Default call depth for [`EvalMode::Render`].
pub const DEFAULT_RECURSION_LIMIT: usize = 100;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Rendering with the default recursion limit.
    #[default]
    Render,
    /// Rendering with a host-chosen recursion limit.
    Strict { limit: usize },
    /// No call depth limit.
    Unbounded,
}

impl EvalMode {
    /// Maximum call depth, or `None` for unlimited.
    #[inline]
    pub fn max_recursion_depth(&self) -> Option<usize> {
        match self {
            EvalMode::Render => Some(DEFAULT_RECURSION_LIMIT),
            EvalMode::Strict { limit } => Some(*limit),
            EvalMode::Unbounded => None,
        }
    }
}
