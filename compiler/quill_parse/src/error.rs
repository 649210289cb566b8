//! Parse error types.

use quill_ir::{Span, TokenKind, TreeError};

/// What went wrong while lexing or parsing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),

    #[error("unterminated string literal")]
    UnterminatedString,

    /// `{{` while already inside a code island.
    #[error("`{{{{` inside a code island")]
    NestedCodeEnter,

    #[error("integer literal `{0}` does not fit in 64 bits")]
    IntegerOverflow(String),

    #[error("invalid number literal `{0}`")]
    InvalidNumber(String),

    #[error("expected {expected}, found `{found}`")]
    Expected {
        expected: &'static str,
        found: TokenKind,
    },

    #[error("unexpected `{0}`")]
    Unexpected(TokenKind),

    #[error("expected end of statement, found `{0}`")]
    ExpectedEndOfStatement(TokenKind),

    #[error("left side of `=` must be a variable")]
    InvalidAssignTarget,

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Parse error with the location it was detected at.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {}..{}", .span.start, .span.end)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    #[cold]
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    #[cold]
    pub fn expected(expected: &'static str, found: TokenKind, span: Span) -> Self {
        ParseError::new(ParseErrorKind::Expected { expected, found }, span)
    }

    #[cold]
    pub fn unexpected(found: TokenKind, span: Span) -> Self {
        ParseError::new(ParseErrorKind::Unexpected(found), span)
    }
}

impl From<TreeError> for ParseError {
    #[cold]
    fn from(err: TreeError) -> Self {
        ParseError::new(ParseErrorKind::Tree(err), Span::DUMMY)
    }
}
