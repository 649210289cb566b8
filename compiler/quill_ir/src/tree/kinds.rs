//! Node kinds and their typed child slots.
//!
//! Each kind with fixed children declares its slots in source order. The
//! slot order is the traversal order of the visitor and the emission order
//! of the printer, so it must match the concrete syntax.

use smallvec::{smallvec, SmallVec};

use crate::{Name, NodeId, TokenKind};

/// Ordered children of a node, empty slots included.
pub type Children = SmallVec<[Option<NodeId>; 8]>;

/// What a child slot accepts.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum SlotClass {
    Expr,
    Block,
    Keyword(TokenKind),
    Operator,
    Variable,
    List,
    NameOrDo,
    ChainLink,
    FunctionBody,
    Statement,
    ListElement,
}

impl SlotClass {
    pub(crate) fn accepts(self, kind: &NodeKind) -> bool {
        match self {
            SlotClass::Expr => kind.is_expression(),
            SlotClass::Block => matches!(kind, NodeKind::Block(_)),
            SlotClass::Keyword(expected) => {
                matches!(kind, NodeKind::Token(token) if token.kind == expected)
            }
            SlotClass::Operator => matches!(
                kind,
                NodeKind::Token(token) if !token.kind.is_keyword()
                    && !matches!(token.kind, TokenKind::Raw | TokenKind::Eof)
            ),
            SlotClass::Variable => matches!(kind, NodeKind::Variable(_)),
            SlotClass::List => matches!(kind, NodeKind::List(_)),
            SlotClass::NameOrDo => matches!(
                kind,
                NodeKind::Variable(_) | NodeKind::Token(TokenNode { kind: TokenKind::Do, .. })
            ),
            SlotClass::ChainLink => matches!(kind, NodeKind::If(_) | NodeKind::Else(_)),
            SlotClass::FunctionBody => {
                matches!(kind, NodeKind::Block(_)) || kind.is_expression()
            }
            SlotClass::Statement => kind.is_statement(),
            SlotClass::ListElement => {
                kind.is_expression()
                    || matches!(kind, NodeKind::Token(TokenNode { kind: TokenKind::Comma, .. }))
            }
        }
    }
}

/// Declares the fixed slots of a node struct: index constants, slot
/// classes, ordered access and mutable access by index.
macro_rules! fixed_slots {
    ($ty:ident { $($idx:literal => $field:ident : $konst:ident = $class:expr),+ $(,)? }) => {
        impl $ty {
            $(pub const $konst: usize = $idx;)+

            pub(crate) const SLOTS: &'static [(&'static str, SlotClass)] =
                &[$((stringify!($field), $class)),+];

            /// Children in source order, empty slots included.
            pub fn slots(&self) -> Children {
                smallvec![$(self.$field),+]
            }

            pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut Option<NodeId>> {
                match index {
                    $($idx => Some(&mut self.$field),)+
                    _ => None,
                }
            }

            pub(crate) fn clear_slots(&mut self) {
                $(self.$field = None;)+
            }
        }
    };
}

/// Value of a literal as written.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Box<str>),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum UnaryOp {
    Not,
    Neg,
}

impl UnaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Minus => Some(UnaryOp::Neg),
            _ => None,
        }
    }

    pub const fn token(self) -> TokenKind {
        match self {
            UnaryOp::Not => TokenKind::Bang,
            UnaryOp::Neg => TokenKind::Minus,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Rem,
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::GtEq => BinaryOp::GtEq,
            TokenKind::AndAnd => BinaryOp::And,
            TokenKind::OrOr => BinaryOp::Or,
            _ => return None,
        };
        Some(op)
    }

    pub const fn token(self) -> TokenKind {
        match self {
            BinaryOp::Add => TokenKind::Plus,
            BinaryOp::Sub => TokenKind::Minus,
            BinaryOp::Mul => TokenKind::Star,
            BinaryOp::Div => TokenKind::Slash,
            BinaryOp::Rem => TokenKind::Percent,
            BinaryOp::Eq => TokenKind::EqEq,
            BinaryOp::NotEq => TokenKind::NotEq,
            BinaryOp::Lt => TokenKind::Lt,
            BinaryOp::LtEq => TokenKind::LtEq,
            BinaryOp::Gt => TokenKind::Gt,
            BinaryOp::GtEq => TokenKind::GtEq,
            BinaryOp::And => TokenKind::AndAnd,
            BinaryOp::Or => TokenKind::OrOr,
        }
    }

    /// Binding strength; higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Eq | BinaryOp::NotEq => 3,
            BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => 4,
            BinaryOp::Add | BinaryOp::Sub => 5,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => 6,
        }
    }
}

/// Statement sequence. Also the root of every parsed template.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Block {
    pub statements: Vec<NodeId>,
}

/// Comma-separated items with the separators kept as token children.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct List {
    pub elements: Vec<NodeId>,
}

/// Template text outside code islands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawText {
    pub text: Box<str>,
}

/// Keyword or punctuation token, kept so the tree prints back verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenNode {
    pub kind: TokenKind,
    pub text: Box<str>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    pub name: Name,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Literal {
    pub value: LiteralValue,
    /// Source spelling, quotes and escapes included.
    pub text: Box<str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unary {
    pub op: UnaryOp,
    pub op_token: Option<NodeId>,
    pub operand: Option<NodeId>,
}

impl Unary {
    pub fn new(op: UnaryOp) -> Self {
        Unary {
            op,
            op_token: None,
            operand: None,
        }
    }
}

fixed_slots!(Unary {
    0 => op_token: OP = SlotClass::Operator,
    1 => operand: OPERAND = SlotClass::Expr,
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binary {
    pub op: BinaryOp,
    pub left: Option<NodeId>,
    pub op_token: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl Binary {
    pub fn new(op: BinaryOp) -> Self {
        Binary {
            op,
            left: None,
            op_token: None,
            right: None,
        }
    }
}

fixed_slots!(Binary {
    0 => left: LEFT = SlotClass::Expr,
    1 => op_token: OP = SlotClass::Operator,
    2 => right: RIGHT = SlotClass::Expr,
});

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Paren {
    pub open: Option<NodeId>,
    pub inner: Option<NodeId>,
    pub close: Option<NodeId>,
}

fixed_slots!(Paren {
    0 => open: OPEN = SlotClass::Keyword(TokenKind::LParen),
    1 => inner: INNER = SlotClass::Expr,
    2 => close: CLOSE = SlotClass::Keyword(TokenKind::RParen),
});

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Call {
    pub callee: Option<NodeId>,
    pub open: Option<NodeId>,
    pub args: Option<NodeId>,
    pub close: Option<NodeId>,
}

fixed_slots!(Call {
    0 => callee: CALLEE = SlotClass::Expr,
    1 => open: OPEN = SlotClass::Keyword(TokenKind::LParen),
    2 => args: ARGS = SlotClass::List,
    3 => close: CLOSE = SlotClass::Keyword(TokenKind::RParen),
});

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Index {
    pub target: Option<NodeId>,
    pub open: Option<NodeId>,
    pub index: Option<NodeId>,
    pub close: Option<NodeId>,
}

fixed_slots!(Index {
    0 => target: TARGET = SlotClass::Expr,
    1 => open: OPEN = SlotClass::Keyword(TokenKind::LBracket),
    2 => index: INDEX = SlotClass::Expr,
    3 => close: CLOSE = SlotClass::Keyword(TokenKind::RBracket),
});

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assign {
    pub target: Option<NodeId>,
    pub eq: Option<NodeId>,
    pub value: Option<NodeId>,
}

fixed_slots!(Assign {
    0 => target: TARGET = SlotClass::Variable,
    1 => eq: EQ = SlotClass::Keyword(TokenKind::Eq),
    2 => value: VALUE = SlotClass::Expr,
});

/// One `if` segment of a conditional chain.
///
/// The chain head carries the `end` keyword; `else if` segments carry the
/// leading `else` keyword and hang off the previous segment's `next` slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IfStmt {
    pub else_kw: Option<NodeId>,
    pub if_kw: Option<NodeId>,
    pub condition: Option<NodeId>,
    pub then: Option<NodeId>,
    pub next: Option<NodeId>,
    pub end_kw: Option<NodeId>,
}

fixed_slots!(IfStmt {
    0 => else_kw: ELSE_KW = SlotClass::Keyword(TokenKind::Else),
    1 => if_kw: IF_KW = SlotClass::Keyword(TokenKind::If),
    2 => condition: CONDITION = SlotClass::Expr,
    3 => then: THEN = SlotClass::Block,
    4 => next: NEXT = SlotClass::ChainLink,
    5 => end_kw: END_KW = SlotClass::Keyword(TokenKind::End),
});

/// Terminal `else` segment of a conditional chain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElseStmt {
    pub else_kw: Option<NodeId>,
    pub body: Option<NodeId>,
}

fixed_slots!(ElseStmt {
    0 => else_kw: ELSE_KW = SlotClass::Keyword(TokenKind::Else),
    1 => body: BODY = SlotClass::Block,
});

/// `readonly <variable>`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadOnlyStmt {
    pub readonly_kw: Option<NodeId>,
    pub variable: Option<NodeId>,
}

fixed_slots!(ReadOnlyStmt {
    0 => readonly_kw: READONLY_KW = SlotClass::Keyword(TokenKind::ReadOnly),
    1 => variable: VARIABLE = SlotClass::Variable,
});

/// Named function statement or anonymous `do` closure.
///
/// `has_return` is maintained by the tree whenever the body slot changes;
/// use [`SyntaxTree::function`](crate::SyntaxTree::function) for the
/// derived queries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FunctionDecl {
    pub func_kw: Option<NodeId>,
    pub name_or_do: Option<NodeId>,
    pub open_paren: Option<NodeId>,
    pub params: Option<NodeId>,
    pub close_paren: Option<NodeId>,
    pub equal: Option<NodeId>,
    pub body: Option<NodeId>,
    pub end_kw: Option<NodeId>,
    pub(crate) has_return: bool,
}

fixed_slots!(FunctionDecl {
    0 => func_kw: FUNC_KW = SlotClass::Keyword(TokenKind::Func),
    1 => name_or_do: NAME = SlotClass::NameOrDo,
    2 => open_paren: OPEN_PAREN = SlotClass::Keyword(TokenKind::LParen),
    3 => params: PARAMS = SlotClass::List,
    4 => close_paren: CLOSE_PAREN = SlotClass::Keyword(TokenKind::RParen),
    5 => equal: EQUAL = SlotClass::Keyword(TokenKind::Eq),
    6 => body: BODY = SlotClass::FunctionBody,
    7 => end_kw: END_KW = SlotClass::Keyword(TokenKind::End),
});

impl FunctionDecl {
    /// Cached result of the return search over the body.
    pub fn has_return(&self) -> bool {
        self.has_return
    }
}

/// `ret [value]` / `return [value]`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReturnStmt {
    pub return_kw: Option<NodeId>,
    pub value: Option<NodeId>,
}

fixed_slots!(ReturnStmt {
    0 => return_kw: RETURN_KW = SlotClass::Keyword(TokenKind::Return),
    1 => value: VALUE = SlotClass::Expr,
});

/// Closed set of node kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Block(Block),
    List(List),
    Raw(RawText),
    Token(TokenNode),
    Variable(Variable),
    Literal(Literal),
    Unary(Unary),
    Binary(Binary),
    Paren(Paren),
    Call(Call),
    Index(Index),
    Assign(Assign),
    If(IfStmt),
    Else(ElseStmt),
    ReadOnly(ReadOnlyStmt),
    Function(FunctionDecl),
    Return(ReturnStmt),
}

impl NodeKind {
    /// Short description used in structural errors.
    pub fn describe(&self) -> &'static str {
        match self {
            NodeKind::Block(_) => "block",
            NodeKind::List(_) => "list",
            NodeKind::Raw(_) => "raw text",
            NodeKind::Token(_) => "token",
            NodeKind::Variable(_) => "variable",
            NodeKind::Literal(_) => "literal",
            NodeKind::Unary(_) => "unary expression",
            NodeKind::Binary(_) => "binary expression",
            NodeKind::Paren(_) => "parenthesized expression",
            NodeKind::Call(_) => "call",
            NodeKind::Index(_) => "index expression",
            NodeKind::Assign(_) => "assignment",
            NodeKind::If(_) => "if statement",
            NodeKind::Else(_) => "else statement",
            NodeKind::ReadOnly(_) => "readonly statement",
            NodeKind::Function(_) => "function",
            NodeKind::Return(_) => "return statement",
        }
    }

    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            NodeKind::Variable(_)
                | NodeKind::Literal(_)
                | NodeKind::Unary(_)
                | NodeKind::Binary(_)
                | NodeKind::Paren(_)
                | NodeKind::Call(_)
                | NodeKind::Index(_)
                | NodeKind::Assign(_)
                | NodeKind::Function(_)
        )
    }

    /// Kinds allowed as elements of a [`Block`].
    pub fn is_statement(&self) -> bool {
        match self {
            NodeKind::Raw(_)
            | NodeKind::If(_)
            | NodeKind::ReadOnly(_)
            | NodeKind::Return(_) => true,
            NodeKind::Token(token) => {
                matches!(token.kind, TokenKind::CodeEnter | TokenKind::CodeExit)
            }
            other => other.is_expression(),
        }
    }

    /// Children in source order, empty slots included.
    pub fn children(&self) -> Children {
        match self {
            NodeKind::Block(block) => block.statements.iter().copied().map(Some).collect(),
            NodeKind::List(list) => list.elements.iter().copied().map(Some).collect(),
            NodeKind::Raw(_) | NodeKind::Token(_) | NodeKind::Variable(_) | NodeKind::Literal(_) => {
                Children::new()
            }
            NodeKind::Unary(node) => node.slots(),
            NodeKind::Binary(node) => node.slots(),
            NodeKind::Paren(node) => node.slots(),
            NodeKind::Call(node) => node.slots(),
            NodeKind::Index(node) => node.slots(),
            NodeKind::Assign(node) => node.slots(),
            NodeKind::If(node) => node.slots(),
            NodeKind::Else(node) => node.slots(),
            NodeKind::ReadOnly(node) => node.slots(),
            NodeKind::Function(node) => node.slots(),
            NodeKind::Return(node) => node.slots(),
        }
    }

    fn slot_table(&self) -> &'static [(&'static str, SlotClass)] {
        match self {
            NodeKind::Block(_)
            | NodeKind::List(_)
            | NodeKind::Raw(_)
            | NodeKind::Token(_)
            | NodeKind::Variable(_)
            | NodeKind::Literal(_) => &[],
            NodeKind::Unary(_) => Unary::SLOTS,
            NodeKind::Binary(_) => Binary::SLOTS,
            NodeKind::Paren(_) => Paren::SLOTS,
            NodeKind::Call(_) => Call::SLOTS,
            NodeKind::Index(_) => Index::SLOTS,
            NodeKind::Assign(_) => Assign::SLOTS,
            NodeKind::If(_) => IfStmt::SLOTS,
            NodeKind::Else(_) => ElseStmt::SLOTS,
            NodeKind::ReadOnly(_) => ReadOnlyStmt::SLOTS,
            NodeKind::Function(_) => FunctionDecl::SLOTS,
            NodeKind::Return(_) => ReturnStmt::SLOTS,
        }
    }

    /// Name and class of a fixed slot.
    pub(crate) fn slot(&self, index: usize) -> Option<(&'static str, SlotClass)> {
        self.slot_table().get(index).copied()
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut Option<NodeId>> {
        match self {
            NodeKind::Block(_)
            | NodeKind::List(_)
            | NodeKind::Raw(_)
            | NodeKind::Token(_)
            | NodeKind::Variable(_)
            | NodeKind::Literal(_) => None,
            NodeKind::Unary(node) => node.slot_mut(index),
            NodeKind::Binary(node) => node.slot_mut(index),
            NodeKind::Paren(node) => node.slot_mut(index),
            NodeKind::Call(node) => node.slot_mut(index),
            NodeKind::Index(node) => node.slot_mut(index),
            NodeKind::Assign(node) => node.slot_mut(index),
            NodeKind::If(node) => node.slot_mut(index),
            NodeKind::Else(node) => node.slot_mut(index),
            NodeKind::ReadOnly(node) => node.slot_mut(index),
            NodeKind::Function(node) => node.slot_mut(index),
            NodeKind::Return(node) => node.slot_mut(index),
        }
    }

    /// Class of the elements of a list-shaped kind.
    pub(crate) fn element_class(&self) -> Option<SlotClass> {
        match self {
            NodeKind::Block(_) => Some(SlotClass::Statement),
            NodeKind::List(_) => Some(SlotClass::ListElement),
            _ => None,
        }
    }

    pub(crate) fn elements_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match self {
            NodeKind::Block(block) => Some(&mut block.statements),
            NodeKind::List(list) => Some(&mut list.elements),
            _ => None,
        }
    }

    /// Drop every child reference, returning the previous children.
    pub(crate) fn take_children(&mut self) -> Children {
        let children = self.children();
        match self {
            NodeKind::Block(block) => block.statements.clear(),
            NodeKind::List(list) => list.elements.clear(),
            NodeKind::Raw(_) | NodeKind::Token(_) | NodeKind::Variable(_) | NodeKind::Literal(_) => {}
            NodeKind::Unary(node) => node.clear_slots(),
            NodeKind::Binary(node) => node.clear_slots(),
            NodeKind::Paren(node) => node.clear_slots(),
            NodeKind::Call(node) => node.clear_slots(),
            NodeKind::Index(node) => node.clear_slots(),
            NodeKind::Assign(node) => node.clear_slots(),
            NodeKind::If(node) => node.clear_slots(),
            NodeKind::Else(node) => node.clear_slots(),
            NodeKind::ReadOnly(node) => node.clear_slots(),
            NodeKind::Function(node) => node.clear_slots(),
            NodeKind::Return(node) => node.clear_slots(),
        }
        children
    }

    /// Remove `child` from whichever slot or list position holds it.
    ///
    /// Returns the fixed slot index it occupied, if any.
    pub(crate) fn remove_child(&mut self, child: NodeId) -> Option<usize> {
        if let Some(elements) = self.elements_mut() {
            elements.retain(|&id| id != child);
            return None;
        }
        let position = self
            .children()
            .iter()
            .position(|&slot| slot == Some(child))?;
        if let Some(slot) = self.slot_mut(position) {
            *slot = None;
        }
        Some(position)
    }
}
