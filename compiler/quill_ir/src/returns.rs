//! Return statement search.
//!
//! Used by the tree to maintain [`FunctionDecl::has_return`] whenever a
//! function body is attached. The search is depth-first and pre-order and
//! stops the whole traversal at the first `return` found. It descends into
//! nested functions too, so a `return` inside an inner closure also marks
//! the enclosing function.
//!
//! [`FunctionDecl::has_return`]: crate::FunctionDecl::has_return

use crate::tree::{ReturnStmt, SyntaxTree};
use crate::visitor::ResultVisitor;
use crate::NodeId;

/// Stateless visitor answering "is there a `return` in this subtree?".
#[derive(Copy, Clone, Debug, Default)]
pub struct ReturnFinder;

impl<'ast> ResultVisitor<'ast> for ReturnFinder {
    type Output = bool;

    fn visit_default(&mut self, tree: &'ast SyntaxTree, id: NodeId) -> bool {
        tree.children(id)
            .into_iter()
            .flatten()
            .any(|child| self.visit_node(tree, child))
    }

    fn visit_return(&mut self, _tree: &'ast SyntaxTree, _id: NodeId, _stmt: &'ast ReturnStmt) -> bool {
        true
    }
}

/// True if `root` is, or contains, a return statement.
pub fn contains_return(tree: &SyntaxTree, root: NodeId) -> bool {
    tree.accept_result(root, &mut ReturnFinder)
}
