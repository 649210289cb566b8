//! Quill parser.
//!
//! Recursive descent over the token list produced by [`lexer`], building a
//! [`SyntaxTree`] in which every token of the source is a node. Keywords,
//! punctuation, separators and code markers are kept as token nodes, and
//! each terminal node records its leading trivia, so printing the tree
//! reproduces the source exactly.
//!
//! # Statements
//!
//! A statement ends at a line break or `;`, at a code island boundary, or
//! before `end`/`else`. Binary operators, calls and indexing only continue
//! an expression on the same line.
//!
//! # Module Structure
//!
//! - `lexer`: tokens with captured trivia
//! - `cursor`: token navigation
//! - `grammar::stmt`: blocks, conditionals, functions, `readonly`, `ret`
//! - `grammar::expr`: the operator precedence chain and primaries

mod cursor;
mod error;
mod grammar;
pub mod lexer;

pub use error::{ParseError, ParseErrorKind};
pub use lexer::{tokenize, ParseMode, Token};

use quill_ir::{NodeId, NodeKind, SharedInterner, Span, SyntaxTree, TokenKind};

use cursor::Cursor;

/// Parse a template (`raw text {{ code }} raw text`), interning into the
/// process-wide table.
pub fn parse_template(source: &str) -> Result<SyntaxTree, ParseError> {
    parse(source, ParseMode::Template, &SharedInterner::global())
}

/// Parse a script (code only, no `{{ }}` islands), interning into the
/// process-wide table.
pub fn parse_script(source: &str) -> Result<SyntaxTree, ParseError> {
    parse(source, ParseMode::Script, &SharedInterner::global())
}

/// Parse `source`, interning names into `interner`.
///
/// The returned tree has its root set to a block holding the top-level
/// statements; trivia after the last token is the root's trailing trivia.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len(), ?mode))]
pub fn parse(
    source: &str,
    mode: ParseMode,
    interner: &SharedInterner,
) -> Result<SyntaxTree, ParseError> {
    let tokens = tokenize(source, mode)?;
    tracing::trace!(tokens = tokens.len(), "tokenized");
    let tree = Parser::new(&tokens, SyntaxTree::new(interner.clone())).parse_root()?;
    tracing::debug!(nodes = tree.len(), "parsed");
    Ok(tree)
}

/// Parser state: a cursor over the tokens and the tree under construction.
pub(crate) struct Parser<'a, 'src> {
    cursor: Cursor<'a, 'src>,
    tree: SyntaxTree,
    /// End offset of the last consumed token.
    last_end: u32,
}

impl<'a, 'src> Parser<'a, 'src> {
    fn new(tokens: &'a [Token<'src>], tree: SyntaxTree) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            tree,
            last_end: 0,
        }
    }

    fn parse_root(mut self) -> Result<SyntaxTree, ParseError> {
        let root = self.tree.block(Span::DUMMY);
        self.parse_statements(root, false)?;

        let eof = self.cursor.current();
        self.tree.set_trailing_trivia(root, Some(eof.leading));
        self.tree.set_span(root, Span::new(0, eof.span.end));
        self.tree.set_root(root);
        Ok(self.tree)
    }

    // Terminal nodes

    fn consume(&mut self) -> Token<'src> {
        let token = self.cursor.advance();
        self.last_end = token.span.end;
        token
    }

    /// Turn the current token into a token node.
    fn token_node(&mut self) -> NodeId {
        let token = self.consume();
        let id = self.tree.token_with_text(token.kind, token.text, token.span);
        self.tree.set_leading_trivia(id, Some(token.leading));
        id
    }

    fn raw_node(&mut self) -> NodeId {
        let token = self.consume();
        let id = self.tree.raw(token.text, token.span);
        self.tree.set_leading_trivia(id, Some(token.leading));
        id
    }

    /// Turn the current identifier or `$$` into a variable node.
    fn variable_node(&mut self) -> NodeId {
        let token = self.consume();
        let name = self.tree.interner().intern(token.text);
        let id = self.tree.variable(name, token.span);
        self.tree.set_leading_trivia(id, Some(token.leading));
        id
    }

    fn expect_token(&mut self, kind: TokenKind, expected: &'static str) -> Result<NodeId, ParseError> {
        if self.cursor.check(kind) {
            Ok(self.token_node())
        } else {
            Err(ParseError::expected(expected, self.cursor.kind(), self.cursor.span()))
        }
    }

    fn expect_variable(&mut self, expected: &'static str) -> Result<NodeId, ParseError> {
        if self.cursor.check(TokenKind::Ident) {
            Ok(self.variable_node())
        } else {
            Err(ParseError::expected(expected, self.cursor.kind(), self.cursor.span()))
        }
    }

    fn expect_statement_end(&self) -> Result<(), ParseError> {
        if self.cursor.at_statement_boundary() {
            Ok(())
        } else {
            Err(ParseError::new(
                ParseErrorKind::ExpectedEndOfStatement(self.cursor.kind()),
                self.cursor.span(),
            ))
        }
    }

    /// Allocate a composite node spanning from `start` to the last consumed token.
    fn alloc(&mut self, kind: NodeKind, start: Span) -> Result<NodeId, ParseError> {
        let span = Span::new(start.start, self.last_end.max(start.start));
        Ok(self.tree.alloc(kind, span)?)
    }
}
