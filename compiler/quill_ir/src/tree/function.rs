//! Derived queries over function declarations.

use super::{FunctionDecl, NodeKind, SyntaxTree};
use crate::{Name, NodeId};

/// Read-only view of a [`FunctionDecl`] together with the tree it lives in.
///
/// A function is named when its name slot holds a variable and anonymous
/// when it holds the `do` keyword. Without a parameter list the function is
/// variadic: every argument is reachable only through `arguments`.
#[derive(Copy, Clone)]
pub struct FunctionView<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
    decl: &'a FunctionDecl,
}

impl<'a> FunctionView<'a> {
    pub(super) fn new(tree: &'a SyntaxTree, id: NodeId, decl: &'a FunctionDecl) -> Self {
        FunctionView { tree, id, decl }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn decl(&self) -> &'a FunctionDecl {
        self.decl
    }

    /// Name the function binds under when evaluated as a statement.
    pub fn name(&self) -> Option<Name> {
        match self.tree.kind(self.decl.name_or_do?) {
            NodeKind::Variable(variable) => Some(variable.name),
            _ => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.name().is_none()
    }

    pub fn has_variable_params(&self) -> bool {
        self.decl.params.is_none()
    }

    /// Declared parameter names in order. Empty for variadic functions.
    pub fn parameters(&self) -> impl Iterator<Item = Name> + 'a {
        let tree = self.tree;
        let elements: &'a [NodeId] = match self.decl.params.map(|id| tree.kind(id)) {
            Some(NodeKind::List(list)) => &list.elements,
            _ => &[],
        };
        elements.iter().filter_map(move |&id| match tree.kind(id) {
            NodeKind::Variable(variable) => Some(variable.name),
            _ => None,
        })
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters().count()
    }

    /// Every declared parameter is required; missing ones would bind null.
    pub fn required_parameter_count(&self) -> usize {
        self.parameter_count()
    }

    pub fn has_return(&self) -> bool {
        self.decl.has_return
    }

    pub fn body(&self) -> Option<NodeId> {
        self.decl.body
    }

    /// True for `= expr` bodies, which yield their value directly.
    pub fn has_expression_body(&self) -> bool {
        self.decl
            .body
            .is_some_and(|body| !matches!(self.tree.kind(body), NodeKind::Block(_)))
    }
}

impl std::fmt::Debug for FunctionView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionView")
            .field("id", &self.id)
            .field("name", &self.name().map(|name| self.tree.name_str(name)))
            .field("parameter_count", &self.parameter_count())
            .field("has_return", &self.has_return())
            .finish()
    }
}
