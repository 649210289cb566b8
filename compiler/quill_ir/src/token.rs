//! Token kinds shared by the lexer and the tree's token nodes.

use std::fmt;

/// Lexical category of a token.
///
/// Keyword and punctuation kinds appear in the tree as [`NodeKind::Token`]
/// children so the printer can reproduce them exactly. Identifiers and
/// literals become [`NodeKind::Variable`] and [`NodeKind::Literal`].
///
/// [`NodeKind::Token`]: crate::NodeKind::Token
/// [`NodeKind::Variable`]: crate::NodeKind::Variable
/// [`NodeKind::Literal`]: crate::NodeKind::Literal
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// Text outside code islands.
    Raw,
    /// `{{`
    CodeEnter,
    /// `}}`
    CodeExit,

    Ident,
    /// `$$`
    DelegateBlock,
    Int,
    Float,
    Str,

    // Keywords
    If,
    Else,
    End,
    Func,
    Do,
    ReadOnly,
    /// `ret` or `return`
    Return,
    True,
    False,
    Null,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Eq,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    AndAnd,
    OrOr,

    Eof,
}

impl TokenKind {
    /// Resolve an identifier-shaped word to its keyword kind.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "end" => TokenKind::End,
            "func" => TokenKind::Func,
            "do" => TokenKind::Do,
            "readonly" => TokenKind::ReadOnly,
            "ret" | "return" => TokenKind::Return,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical spelling, used when synthesizing token nodes.
    pub const fn as_str(self) -> &'static str {
        match self {
            TokenKind::Raw => "<raw>",
            TokenKind::CodeEnter => "{{",
            TokenKind::CodeExit => "}}",
            TokenKind::Ident => "<ident>",
            TokenKind::DelegateBlock => "$$",
            TokenKind::Int => "<int>",
            TokenKind::Float => "<float>",
            TokenKind::Str => "<string>",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::End => "end",
            TokenKind::Func => "func",
            TokenKind::Do => "do",
            TokenKind::ReadOnly => "readonly",
            TokenKind::Return => "ret",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Bang => "!",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Eof => "<eof>",
        }
    }

    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Else
                | TokenKind::End
                | TokenKind::Func
                | TokenKind::Do
                | TokenKind::ReadOnly
                | TokenKind::Return
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }

    /// Word-like tokens need a separator from an adjacent word-like token.
    pub const fn is_word(self) -> bool {
        self.is_keyword()
            || matches!(
                self,
                TokenKind::Ident | TokenKind::Int | TokenKind::Float | TokenKind::DelegateBlock
            )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
