//! Arena-backed syntax tree with parent back-references.
//!
//! # Ownership
//!
//! The [`SyntaxTree`] owns every node. A node refers to its children and to
//! its parent by [`NodeId`]; the parent link is a non-owning back-reference.
//! Attaching a node somewhere detaches it from wherever it was before, so a
//! node has at most one parent at any time.
//!
//! # Slots
//!
//! Kinds with fixed children expose positional slots (see the `*_KW`,
//! `BODY`, ... constants on each struct). Every slot is typed: attaching a
//! node of the wrong kind fails with [`TreeError`]. `Block` and `List` hold
//! an ordered element list instead, appended with [`SyntaxTree::push_child`].
//!
//! # Trivia
//!
//! `leading_trivia` is `None` on synthesized nodes and `Some` (possibly
//! empty) on every parsed token-level node. The printer relies on the
//! difference to decide whether layout has to be invented.

mod function;
mod kinds;

pub use function::FunctionView;
pub use kinds::{
    Assign, Binary, BinaryOp, Block, Call, Children, ElseStmt, FunctionDecl, IfStmt, Index, List,
    Literal, LiteralValue, NodeKind, Paren, RawText, ReadOnlyStmt, ReturnStmt, TokenNode, Unary,
    UnaryOp, Variable,
};

use crate::{returns, Name, NodeId, SharedInterner, Span, TokenKind, TreeError};

/// A node stored in the arena.
#[derive(Clone, Debug)]
pub struct Node {
    kind: NodeKind,
    span: Span,
    parent: Option<NodeId>,
    leading_trivia: Option<Box<str>>,
    trailing_trivia: Option<Box<str>>,
}

impl Node {
    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn leading_trivia(&self) -> Option<&str> {
        self.leading_trivia.as_deref()
    }

    #[inline]
    pub fn trailing_trivia(&self) -> Option<&str> {
        self.trailing_trivia.as_deref()
    }
}

/// Syntax tree arena.
///
/// Node ids handed out by one tree are only meaningful for that tree;
/// passing a foreign id to an accessor panics on out-of-bounds access.
#[derive(Clone)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    interner: SharedInterner,
}

/// An empty tree interning into [`SharedInterner::global`].
impl Default for SyntaxTree {
    fn default() -> Self {
        SyntaxTree::new(SharedInterner::global())
    }
}

impl SyntaxTree {
    pub fn new(interner: SharedInterner) -> Self {
        SyntaxTree {
            nodes: Vec::new(),
            root: None,
            interner,
        }
    }

    /// Interner that resolves every [`Name`] stored in this tree.
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // Allocation

    /// Allocate a detached node.
    ///
    /// Any children already referenced by `kind` are attached through the
    /// same validation as [`set_child`](Self::set_child).
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> Result<NodeId, TreeError> {
        let mut kind = kind;
        let list_shaped = kind.element_class().is_some();
        let children = kind.take_children();
        let id = self.try_push_node(kind, span)?;
        for (index, child) in children.into_iter().enumerate() {
            match child {
                Some(child) if list_shaped => self.push_child(id, child)?,
                Some(child) => {
                    self.set_child(id, index, Some(child))?;
                }
                None => {}
            }
        }
        Ok(id)
    }

    fn try_push_node(&mut self, kind: NodeKind, span: Span) -> Result<NodeId, TreeError> {
        let id = next_node_id(self.nodes.len())?;
        self.nodes.push(Node {
            kind,
            span,
            parent: None,
            leading_trivia: None,
            trailing_trivia: None,
        });
        Ok(id)
    }

    /// Push a childless node.
    ///
    /// # Panics
    /// Panics once the arena holds `u32::MAX + 1` nodes.
    fn push_node(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.try_push_node(kind, span)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Allocate a keyword or punctuation token with its canonical spelling.
    pub fn token(&mut self, kind: TokenKind) -> NodeId {
        self.token_with_text(kind, kind.as_str(), Span::DUMMY)
    }

    pub fn token_with_text(&mut self, kind: TokenKind, text: &str, span: Span) -> NodeId {
        self.push_node(
            NodeKind::Token(TokenNode {
                kind,
                text: text.into(),
            }),
            span,
        )
    }

    pub fn variable(&mut self, name: Name, span: Span) -> NodeId {
        self.push_node(NodeKind::Variable(Variable { name }), span)
    }

    /// Intern `text` and allocate a variable for it.
    pub fn variable_named(&mut self, text: &str) -> NodeId {
        let name = self.interner.intern(text);
        self.variable(name, Span::DUMMY)
    }

    pub fn literal(&mut self, value: LiteralValue, text: &str, span: Span) -> NodeId {
        self.push_node(
            NodeKind::Literal(Literal {
                value,
                text: text.into(),
            }),
            span,
        )
    }

    pub fn raw(&mut self, text: &str, span: Span) -> NodeId {
        self.push_node(NodeKind::Raw(RawText { text: text.into() }), span)
    }

    pub fn block(&mut self, span: Span) -> NodeId {
        self.push_node(NodeKind::Block(Block::default()), span)
    }

    pub fn list(&mut self, span: Span) -> NodeId {
        self.push_node(NodeKind::List(List::default()), span)
    }

    // Access

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    pub fn set_span(&mut self, id: NodeId, span: Span) {
        self.nodes[id.index()].span = span;
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Ordered children of `id`, empty slots included.
    pub fn children(&self, id: NodeId) -> Children {
        self.kind(id).children()
    }

    pub fn leading_trivia(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.index()].leading_trivia.as_deref()
    }

    pub fn set_leading_trivia(&mut self, id: NodeId, trivia: Option<&str>) {
        self.nodes[id.index()].leading_trivia = trivia.map(Box::from);
    }

    pub fn trailing_trivia(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.index()].trailing_trivia.as_deref()
    }

    pub fn set_trailing_trivia(&mut self, id: NodeId, trivia: Option<&str>) {
        self.nodes[id.index()].trailing_trivia = trivia.map(Box::from);
    }

    /// Resolve an interned name against this tree's interner.
    pub fn name_str(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    /// Derived view of a function node, or `None` for other kinds.
    pub fn function(&self, id: NodeId) -> Option<FunctionView<'_>> {
        match self.kind(id) {
            NodeKind::Function(decl) => Some(FunctionView::new(self, id, decl)),
            _ => None,
        }
    }

    /// True when `ancestor` is `node` itself or lies on its parent chain.
    pub fn is_self_or_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    // Attachment

    /// Put `child` into the fixed slot `index` of `parent`.
    ///
    /// The child is detached from its previous parent first. The node that
    /// previously occupied the slot is detached and returned. Replacing the
    /// body of a function refreshes its cached return flag.
    pub fn set_child(
        &mut self,
        parent: NodeId,
        index: usize,
        child: Option<NodeId>,
    ) -> Result<Option<NodeId>, TreeError> {
        let parent_kind = self.kind(parent);
        let Some((slot_name, class)) = parent_kind.slot(index) else {
            return Err(TreeError::SlotOutOfRange {
                parent: parent_kind.describe(),
                index,
            });
        };

        if let Some(child) = child {
            self.check_attach(parent, child, slot_name, class)?;
            self.detach(child);
        }

        let parent_node = &mut self.nodes[parent.index()];
        let displaced = match parent_node.kind.slot_mut(index) {
            Some(slot) => std::mem::replace(slot, child),
            None => None,
        };
        if let Some(old) = displaced.filter(|&old| Some(old) != child) {
            self.nodes[old.index()].parent = None;
        }
        if let Some(child) = child {
            self.nodes[child.index()].parent = Some(parent);
        }

        if index == FunctionDecl::BODY && matches!(self.kind(parent), NodeKind::Function(_)) {
            self.refresh_return_flag(parent);
        }

        Ok(displaced.filter(|&old| Some(old) != child))
    }

    /// Append `child` to a `Block` or `List`.
    pub fn push_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let parent_kind = self.kind(parent);
        let Some(class) = parent_kind.element_class() else {
            return Err(TreeError::NotAList {
                parent: parent_kind.describe(),
            });
        };
        self.check_attach(parent, child, "element", class)?;
        self.detach(child);

        if let Some(elements) = self.nodes[parent.index()].kind.elements_mut() {
            elements.push(child);
        }
        self.nodes[child.index()].parent = Some(parent);
        Ok(())
    }

    /// Remove `child` from its parent, leaving it as a detached subtree.
    pub fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.nodes[child.index()].parent.take() else {
            return;
        };
        let vacated = self.nodes[parent.index()].kind.remove_child(child);
        if vacated == Some(FunctionDecl::BODY)
            && matches!(self.kind(parent), NodeKind::Function(_))
        {
            self.refresh_return_flag(parent);
        }
    }

    fn check_attach(
        &self,
        parent: NodeId,
        child: NodeId,
        slot_name: &'static str,
        class: kinds::SlotClass,
    ) -> Result<(), TreeError> {
        let child_kind = self.kind(child);
        if !class.accepts(child_kind) {
            if class == kinds::SlotClass::NameOrDo {
                return Err(TreeError::InvalidNameSlot {
                    found: child_kind.describe(),
                });
            }
            return Err(TreeError::WrongChildKind {
                parent: self.kind(parent).describe(),
                slot: slot_name,
                found: child_kind.describe(),
            });
        }
        if self.is_self_or_ancestor(child, parent) {
            return Err(TreeError::Cycle { parent, child });
        }
        Ok(())
    }

    /// Recompute `has_return` for a function after its body slot changed.
    fn refresh_return_flag(&mut self, function: NodeId) {
        let NodeKind::Function(decl) = self.kind(function) else {
            return;
        };
        let has_return = match decl.body {
            None => false,
            Some(body) => {
                !matches!(self.kind(body), NodeKind::Block(_)) || returns::contains_return(self, body)
            }
        };
        if let NodeKind::Function(decl) = &mut self.nodes[function.index()].kind {
            decl.has_return = has_return;
        }
    }
}

/// Id of the node stored at arena index `len`.
fn next_node_id(len: usize) -> Result<NodeId, TreeError> {
    u32::try_from(len)
        .map(NodeId::new)
        .map_err(|_| TreeError::ArenaFull)
}

impl std::fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
