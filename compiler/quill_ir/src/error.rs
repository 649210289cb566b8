//! Structural errors raised while assembling a syntax tree.

use crate::NodeId;

/// Attaching a node would break the tree's shape.
///
/// Raised eagerly at attach time; a tree that was built without error
/// always satisfies the per-kind slot typing and has no cycles.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The name slot of a function accepts only a variable or a `do` keyword.
    #[error("function name must be a variable or `do`, found {found}")]
    InvalidNameSlot { found: &'static str },

    #[error("the {slot} slot of {parent} cannot hold {found}")]
    WrongChildKind {
        parent: &'static str,
        slot: &'static str,
        found: &'static str,
    },

    /// The child is the parent itself or one of its ancestors.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    #[error("{parent} has no child slot {index}")]
    SlotOutOfRange { parent: &'static str, index: usize },

    /// `push_child` on a kind with fixed slots.
    #[error("{parent} does not hold a child list")]
    NotAList { parent: &'static str },

    /// Every 32-bit node id is taken.
    #[error("syntax tree is full: node ids are exhausted")]
    ArenaFull,
}
