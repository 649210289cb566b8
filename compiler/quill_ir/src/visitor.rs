//! Syntax tree visitor protocol.
//!
//! Two flavors share the same double dispatch: [`SyntaxTree::accept`]
//! matches on the node kind and calls the kind-specific handler.
//!
//! - [`Visitor`] returns nothing and may mutate its own state. The default
//!   handler of every kind walks the node's non-empty children in slot
//!   order, stopping as soon as [`Visitor::is_done`] reports true.
//! - [`ResultVisitor`] returns a value from every handler. Unhandled kinds
//!   fall back to [`ResultVisitor::visit_default`], which the implementor
//!   must provide since there is no generic way to combine child results.
//!
//! The tree itself is never mutated during a visit. Both dispatchers grow
//! the stack on demand, so visitors may recurse over trees of any depth.
//!
//! # Example
//!
//! ```text
//! struct CountRaw {
//!     count: usize,
//! }
//!
//! impl<'ast> Visitor<'ast> for CountRaw {
//!     fn visit_raw(&mut self, _tree: &'ast SyntaxTree, _id: NodeId, _raw: &'ast RawText) {
//!         self.count += 1;
//!     }
//! }
//! ```

use crate::tree::{
    Assign, Binary, Block, Call, ElseStmt, FunctionDecl, IfStmt, Index, List, Literal, NodeKind,
    Paren, RawText, ReadOnlyStmt, ReturnStmt, SyntaxTree, TokenNode, Unary, Variable,
};
use crate::NodeId;
use quill_stack::ensure_sufficient_stack;

impl SyntaxTree {
    /// Dispatch `visitor` on node `id`.
    pub fn accept<'ast, V: Visitor<'ast> + ?Sized>(&'ast self, id: NodeId, visitor: &mut V) {
        visitor.visit_node(self, id);
    }

    /// Dispatch a result-returning `visitor` on node `id`.
    pub fn accept_result<'ast, V: ResultVisitor<'ast> + ?Sized>(
        &'ast self,
        id: NodeId,
        visitor: &mut V,
    ) -> V::Output {
        visitor.visit_node(self, id)
    }
}

// Unit visitor

/// Unit-result visitor.
///
/// Override `visit_*` methods to add behavior at specific kinds; call
/// [`walk_children`] to continue into the children.
pub trait Visitor<'ast> {
    /// Checked before each child during the default walk.
    fn is_done(&self) -> bool {
        false
    }

    /// Entry point for a node of any kind.
    fn visit_node(&mut self, tree: &'ast SyntaxTree, id: NodeId) {
        walk_node(self, tree, id);
    }

    fn visit_block(&mut self, tree: &'ast SyntaxTree, id: NodeId, _block: &'ast Block) {
        walk_children(self, tree, id);
    }

    fn visit_list(&mut self, tree: &'ast SyntaxTree, id: NodeId, _list: &'ast List) {
        walk_children(self, tree, id);
    }

    fn visit_raw(&mut self, _tree: &'ast SyntaxTree, _id: NodeId, raw: &'ast RawText) {
        let _ = raw;
    }

    fn visit_token(&mut self, _tree: &'ast SyntaxTree, _id: NodeId, token: &'ast TokenNode) {
        let _ = token;
    }

    fn visit_variable(&mut self, _tree: &'ast SyntaxTree, _id: NodeId, variable: &'ast Variable) {
        let _ = variable;
    }

    fn visit_literal(&mut self, _tree: &'ast SyntaxTree, _id: NodeId, literal: &'ast Literal) {
        let _ = literal;
    }

    fn visit_unary(&mut self, tree: &'ast SyntaxTree, id: NodeId, _unary: &'ast Unary) {
        walk_children(self, tree, id);
    }

    fn visit_binary(&mut self, tree: &'ast SyntaxTree, id: NodeId, _binary: &'ast Binary) {
        walk_children(self, tree, id);
    }

    fn visit_paren(&mut self, tree: &'ast SyntaxTree, id: NodeId, _paren: &'ast Paren) {
        walk_children(self, tree, id);
    }

    fn visit_call(&mut self, tree: &'ast SyntaxTree, id: NodeId, _call: &'ast Call) {
        walk_children(self, tree, id);
    }

    fn visit_index(&mut self, tree: &'ast SyntaxTree, id: NodeId, _index: &'ast Index) {
        walk_children(self, tree, id);
    }

    fn visit_assign(&mut self, tree: &'ast SyntaxTree, id: NodeId, _assign: &'ast Assign) {
        walk_children(self, tree, id);
    }

    fn visit_if(&mut self, tree: &'ast SyntaxTree, id: NodeId, _stmt: &'ast IfStmt) {
        walk_children(self, tree, id);
    }

    fn visit_else(&mut self, tree: &'ast SyntaxTree, id: NodeId, _stmt: &'ast ElseStmt) {
        walk_children(self, tree, id);
    }

    fn visit_readonly(&mut self, tree: &'ast SyntaxTree, id: NodeId, _stmt: &'ast ReadOnlyStmt) {
        walk_children(self, tree, id);
    }

    fn visit_function(&mut self, tree: &'ast SyntaxTree, id: NodeId, _decl: &'ast FunctionDecl) {
        walk_children(self, tree, id);
    }

    fn visit_return(&mut self, tree: &'ast SyntaxTree, id: NodeId, _stmt: &'ast ReturnStmt) {
        walk_children(self, tree, id);
    }
}

/// Dispatch on the node kind to the matching `visit_*` handler.
pub fn walk_node<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, tree: &'ast SyntaxTree, id: NodeId) {
    ensure_sufficient_stack(|| match tree.kind(id) {
        NodeKind::Block(block) => visitor.visit_block(tree, id, block),
        NodeKind::List(list) => visitor.visit_list(tree, id, list),
        NodeKind::Raw(raw) => visitor.visit_raw(tree, id, raw),
        NodeKind::Token(token) => visitor.visit_token(tree, id, token),
        NodeKind::Variable(variable) => visitor.visit_variable(tree, id, variable),
        NodeKind::Literal(literal) => visitor.visit_literal(tree, id, literal),
        NodeKind::Unary(unary) => visitor.visit_unary(tree, id, unary),
        NodeKind::Binary(binary) => visitor.visit_binary(tree, id, binary),
        NodeKind::Paren(paren) => visitor.visit_paren(tree, id, paren),
        NodeKind::Call(call) => visitor.visit_call(tree, id, call),
        NodeKind::Index(index) => visitor.visit_index(tree, id, index),
        NodeKind::Assign(assign) => visitor.visit_assign(tree, id, assign),
        NodeKind::If(stmt) => visitor.visit_if(tree, id, stmt),
        NodeKind::Else(stmt) => visitor.visit_else(tree, id, stmt),
        NodeKind::ReadOnly(stmt) => visitor.visit_readonly(tree, id, stmt),
        NodeKind::Function(decl) => visitor.visit_function(tree, id, decl),
        NodeKind::Return(stmt) => visitor.visit_return(tree, id, stmt),
    });
}

/// Visit the non-empty children of `id` in slot order.
pub fn walk_children<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    tree: &'ast SyntaxTree,
    id: NodeId,
) {
    for child in tree.children(id).into_iter().flatten() {
        if visitor.is_done() {
            return;
        }
        visitor.visit_node(tree, child);
    }
}

// Result visitor

/// Visitor whose handlers all produce a `Self::Output`.
pub trait ResultVisitor<'ast> {
    type Output;

    /// Fallback for every kind without a dedicated override.
    fn visit_default(&mut self, tree: &'ast SyntaxTree, id: NodeId) -> Self::Output;

    fn visit_node(&mut self, tree: &'ast SyntaxTree, id: NodeId) -> Self::Output {
        dispatch_result(self, tree, id)
    }

    fn visit_block(&mut self, tree: &'ast SyntaxTree, id: NodeId, _block: &'ast Block) -> Self::Output {
        self.visit_default(tree, id)
    }

    fn visit_list(&mut self, tree: &'ast SyntaxTree, id: NodeId, _list: &'ast List) -> Self::Output {
        self.visit_default(tree, id)
    }

    fn visit_raw(&mut self, tree: &'ast SyntaxTree, id: NodeId, _raw: &'ast RawText) -> Self::Output {
        self.visit_default(tree, id)
    }

    fn visit_token(&mut self, tree: &'ast SyntaxTree, id: NodeId, _token: &'ast TokenNode) -> Self::Output {
        self.visit_default(tree, id)
    }

    fn visit_variable(
        &mut self,
        tree: &'ast SyntaxTree,
        id: NodeId,
        _variable: &'ast Variable,
    ) -> Self::Output {
        self.visit_default(tree, id)
    }

    fn visit_literal(&mut self, tree: &'ast SyntaxTree, id: NodeId, _literal: &'ast Literal) -> Self::Output {
        self.visit_default(tree, id)
    }

    fn visit_unary(&mut self, tree: &'ast SyntaxTree, id: NodeId, _unary: &'ast Unary) -> Self::Output {
        self.visit_default(tree, id)
    }

    fn visit_binary(&mut self, tree: &'ast SyntaxTree, id: NodeId, _binary: &'ast Binary) -> Self::Output {
        self.visit_default(tree, id)
    }

    fn visit_paren(&mut self, tree: &'ast SyntaxTree, id: NodeId, _paren: &'ast Paren) -> Self::Output {
        self.visit_default(tree, id)
    }

    fn visit_call(&mut self, tree: &'ast SyntaxTree, id: NodeId, _call: &'ast Call) -> Self::Output {
        self.visit_default(tree, id)
    }

    fn visit_index(&mut self, tree: &'ast SyntaxTree, id: NodeId, _index: &'ast Index) -> Self::Output {
        self.visit_default(tree, id)
    }

    fn visit_assign(&mut self, tree: &'ast SyntaxTree, id: NodeId, _assign: &'ast Assign) -> Self::Output {
        self.visit_default(tree, id)
    }

    fn visit_if(&mut self, tree: &'ast SyntaxTree, id: NodeId, _stmt: &'ast IfStmt) -> Self::Output {
        self.visit_default(tree, id)
    }

    fn visit_else(&mut self, tree: &'ast SyntaxTree, id: NodeId, _stmt: &'ast ElseStmt) -> Self::Output {
        self.visit_default(tree, id)
    }

    fn visit_readonly(
        &mut self,
        tree: &'ast SyntaxTree,
        id: NodeId,
        _stmt: &'ast ReadOnlyStmt,
    ) -> Self::Output {
        self.visit_default(tree, id)
    }

    fn visit_function(
        &mut self,
        tree: &'ast SyntaxTree,
        id: NodeId,
        _decl: &'ast FunctionDecl,
    ) -> Self::Output {
        self.visit_default(tree, id)
    }

    fn visit_return(&mut self, tree: &'ast SyntaxTree, id: NodeId, _stmt: &'ast ReturnStmt) -> Self::Output {
        self.visit_default(tree, id)
    }
}

/// Dispatch on the node kind to the matching `visit_*` handler.
pub fn dispatch_result<'ast, V: ResultVisitor<'ast> + ?Sized>(
    visitor: &mut V,
    tree: &'ast SyntaxTree,
    id: NodeId,
) -> V::Output {
    ensure_sufficient_stack(|| match tree.kind(id) {
        NodeKind::Block(block) => visitor.visit_block(tree, id, block),
        NodeKind::List(list) => visitor.visit_list(tree, id, list),
        NodeKind::Raw(raw) => visitor.visit_raw(tree, id, raw),
        NodeKind::Token(token) => visitor.visit_token(tree, id, token),
        NodeKind::Variable(variable) => visitor.visit_variable(tree, id, variable),
        NodeKind::Literal(literal) => visitor.visit_literal(tree, id, literal),
        NodeKind::Unary(unary) => visitor.visit_unary(tree, id, unary),
        NodeKind::Binary(binary) => visitor.visit_binary(tree, id, binary),
        NodeKind::Paren(paren) => visitor.visit_paren(tree, id, paren),
        NodeKind::Call(call) => visitor.visit_call(tree, id, call),
        NodeKind::Index(index) => visitor.visit_index(tree, id, index),
        NodeKind::Assign(assign) => visitor.visit_assign(tree, id, assign),
        NodeKind::If(stmt) => visitor.visit_if(tree, id, stmt),
        NodeKind::Else(stmt) => visitor.visit_else(tree, id, stmt),
        NodeKind::ReadOnly(stmt) => visitor.visit_readonly(tree, id, stmt),
        NodeKind::Function(decl) => visitor.visit_function(tree, id, decl),
        NodeKind::Return(stmt) => visitor.visit_return(tree, id, stmt),
    })
}
