//! Static checks run before evaluation.
//!
//! Parsed trees always fill the slots the evaluator needs, but a host can
//! build or edit a tree by hand. [`check_structure`] walks the subtree once
//! and reports the first node missing a required slot, before any output
//! is produced.

use quill_ir::{
    Assign, Binary, Call, ElseStmt, FunctionDecl, IfStmt, Index, NodeId, Paren, ReadOnlyStmt,
    SyntaxTree, Unary, Visitor,
};
use quill_ir::visitor::walk_children;

use crate::errors::{malformed_node, EvalError};

#[derive(Default)]
struct StructureCheck {
    error: Option<EvalError>,
}

impl StructureCheck {
    fn require(&mut self, tree: &SyntaxTree, id: NodeId, slots: &[Option<NodeId>]) {
        if slots.iter().any(Option::is_none) {
            let what = tree.kind(id).describe();
            self.error = Some(malformed_node(what).with_span(tree.span(id)));
        }
    }
}

impl<'ast> Visitor<'ast> for StructureCheck {
    fn is_done(&self) -> bool {
        self.error.is_some()
    }

    fn visit_unary(&mut self, tree: &'ast SyntaxTree, id: NodeId, unary: &'ast Unary) {
        self.require(tree, id, &[unary.operand]);
        walk_children(self, tree, id);
    }

    fn visit_binary(&mut self, tree: &'ast SyntaxTree, id: NodeId, binary: &'ast Binary) {
        self.require(tree, id, &[binary.left, binary.right]);
        walk_children(self, tree, id);
    }

    fn visit_paren(&mut self, tree: &'ast SyntaxTree, id: NodeId, paren: &'ast Paren) {
        self.require(tree, id, &[paren.inner]);
        walk_children(self, tree, id);
    }

    fn visit_call(&mut self, tree: &'ast SyntaxTree, id: NodeId, call: &'ast Call) {
        self.require(tree, id, &[call.callee]);
        walk_children(self, tree, id);
    }

    fn visit_index(&mut self, tree: &'ast SyntaxTree, id: NodeId, index: &'ast Index) {
        self.require(tree, id, &[index.target, index.index]);
        walk_children(self, tree, id);
    }

    fn visit_assign(&mut self, tree: &'ast SyntaxTree, id: NodeId, assign: &'ast Assign) {
        self.require(tree, id, &[assign.target, assign.value]);
        walk_children(self, tree, id);
    }

    fn visit_if(&mut self, tree: &'ast SyntaxTree, id: NodeId, stmt: &'ast IfStmt) {
        self.require(tree, id, &[stmt.condition, stmt.then]);
        walk_children(self, tree, id);
    }

    fn visit_else(&mut self, tree: &'ast SyntaxTree, id: NodeId, stmt: &'ast ElseStmt) {
        self.require(tree, id, &[stmt.body]);
        walk_children(self, tree, id);
    }

    fn visit_readonly(&mut self, tree: &'ast SyntaxTree, id: NodeId, stmt: &'ast ReadOnlyStmt) {
        self.require(tree, id, &[stmt.variable]);
        walk_children(self, tree, id);
    }

    fn visit_function(&mut self, tree: &'ast SyntaxTree, id: NodeId, decl: &'ast FunctionDecl) {
        self.require(tree, id, &[decl.name_or_do, decl.body]);
        walk_children(self, tree, id);
    }
}

/// First node under `root` that lacks a slot evaluation depends on.
pub fn check_structure(tree: &SyntaxTree, root: NodeId) -> Result<(), EvalError> {
    let mut check = StructureCheck::default();
    tree.accept(root, &mut check);
    match check.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
