//! Quill IR - syntax tree for the Quill template language
//!
//! This crate holds the shared tree that the evaluator, the printer and the
//! static analyses all work on:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Token kinds shared with the lexer
//! - The node arena with parent back-references and typed child slots
//! - The visitor protocol and the return search built on it
//!
//! # Design
//!
//! - **Flatten everything**: children are `NodeId` indices into one arena
//! - **Closed kinds**: `NodeKind` is an enum, every dispatch is an
//!   exhaustive `match`
//! - **Lossless**: keywords, punctuation and trivia are kept so the tree
//!   prints back to its source byte for byte

mod error;
mod interner;
mod name;
mod node_id;
pub mod returns;
mod span;
mod token;
pub mod tree;
pub mod visitor;

pub use error::TreeError;
pub use interner::{InternOverflow, SharedInterner, StringInterner, ARGUMENTS, DELEGATE_BLOCK};
pub use name::Name;
pub use node_id::NodeId;
pub use returns::contains_return;
pub use span::Span;
pub use token::TokenKind;
pub use tree::{
    Assign, Binary, BinaryOp, Block, Call, Children, ElseStmt, FunctionDecl, FunctionView, IfStmt,
    Index, List, Literal, LiteralValue, Node, NodeKind, Paren, RawText, ReadOnlyStmt, ReturnStmt,
    SyntaxTree, TokenNode, Unary, UnaryOp, Variable,
};
pub use visitor::{ResultVisitor, Visitor};
