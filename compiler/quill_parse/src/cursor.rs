//! Token cursor for the parser.

use quill_ir::{Span, TokenKind};

use crate::lexer::Token;

/// Position in a token list that always ends with `Eof`.
///
/// Advancing past `Eof` keeps the cursor on `Eof`.
pub struct Cursor<'a, 'src> {
    tokens: &'a [Token<'src>],
    pos: usize,
}

impl<'a, 'src> Cursor<'a, 'src> {
    pub fn new(tokens: &'a [Token<'src>]) -> Self {
        debug_assert!(
            tokens.last().is_some_and(|t| t.kind == TokenKind::Eof),
            "token list must end with Eof"
        );
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn current(&self) -> Token<'src> {
        let last = self.tokens.len().saturating_sub(1);
        self.tokens[self.pos.min(last)]
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.current().span
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// `kind` on the same line as the previous token.
    #[inline]
    pub fn check_inline(&self, kind: TokenKind) -> bool {
        let token = self.current();
        token.kind == kind && !token.eos_before
    }

    /// The current token cannot continue the statement before it.
    pub fn at_statement_boundary(&self) -> bool {
        let token = self.current();
        token.eos_before
            || matches!(
                token.kind,
                TokenKind::Eof
                    | TokenKind::Raw
                    | TokenKind::CodeEnter
                    | TokenKind::CodeExit
                    | TokenKind::End
                    | TokenKind::Else
            )
    }

    pub fn advance(&mut self) -> Token<'src> {
        let token = self.current();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }
}
