//! Template lexer.
//!
//! Splits a source into tokens, each carrying the trivia that precedes it.
//! Every byte of the input ends up either in a token's text or in a
//! token's leading trivia, so concatenating `leading + text` over all
//! tokens reproduces the source exactly.
//!
//! # Modes
//!
//! In [`ParseMode::Template`] the lexer starts in raw text and switches to
//! code at `{{`, back to raw text at `}}`. In [`ParseMode::Script`] the
//! whole input is code.
//!
//! # Trivia
//!
//! Spaces, tabs, line breaks, `;` and `#` comments are trivia inside code.
//! A comment runs to the end of the line, or to `}}` in template mode.
//! Trivia holding a line break or `;` marks the following token as the
//! start of a new statement (`eos_before`).

mod escape;

pub(crate) use escape::unescape_string;

use quill_ir::{Span, TokenKind};

use crate::{ParseError, ParseErrorKind};

/// Whether the source is a template with code islands or a bare script.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum ParseMode {
    #[default]
    Template,
    Script,
}

/// A token borrowed from the source.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub span: Span,
    pub text: &'src str,
    /// Trivia between the previous token and this one.
    pub leading: &'src str,
    /// The leading trivia ends a statement.
    pub eos_before: bool,
}

/// Tokenize `source`. The returned list always ends with an `Eof` token
/// whose leading trivia is whatever followed the last real token.
pub fn tokenize(source: &str, mode: ParseMode) -> Result<Vec<Token<'_>>, ParseError> {
    Lexer::new(source, mode).run()
}

struct Lexer<'src> {
    src: &'src str,
    pos: usize,
    mode: ParseMode,
    in_code: bool,
    tokens: Vec<Token<'src>>,
}

impl<'src> Lexer<'src> {
    fn new(src: &'src str, mode: ParseMode) -> Self {
        Lexer {
            src,
            pos: 0,
            mode,
            in_code: mode == ParseMode::Script,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token<'src>>, ParseError> {
        loop {
            if !self.in_code {
                if self.lex_raw() {
                    continue;
                }
                self.push(TokenKind::Eof, self.pos, self.pos, self.pos);
                return Ok(self.tokens);
            }

            let trivia_start = self.pos;
            self.skip_trivia();
            if self.pos >= self.src.len() {
                self.push(TokenKind::Eof, trivia_start, self.pos, self.pos);
                return Ok(self.tokens);
            }

            let start = self.pos;
            let kind = self.lex_code_token()?;
            if kind == TokenKind::CodeExit {
                self.in_code = false;
            }
            self.push(kind, trivia_start, start, self.pos);
        }
    }

    fn rest(&self) -> &'src str {
        &self.src[self.pos..]
    }

    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + offset).copied()
    }

    fn push(&mut self, kind: TokenKind, trivia_start: usize, start: usize, end: usize) {
        let leading = &self.src[trivia_start..start];
        self.tokens.push(Token {
            kind,
            span: Span::from_range(start..end),
            text: &self.src[start..end],
            leading,
            eos_before: leading.contains(['\n', ';']),
        });
    }

    /// Emit raw text up to the next `{{` and the `{{` itself.
    ///
    /// Returns false at end of input.
    fn lex_raw(&mut self) -> bool {
        let rest = self.rest();
        let raw_len = rest.find("{{").unwrap_or(rest.len());
        if raw_len > 0 {
            let start = self.pos;
            self.pos += raw_len;
            self.push(TokenKind::Raw, start, start, self.pos);
        }
        if self.pos >= self.src.len() {
            return false;
        }
        let start = self.pos;
        self.pos += 2;
        self.push(TokenKind::CodeEnter, start, start, self.pos);
        self.in_code = true;
        true
    }

    fn skip_trivia(&mut self) {
        while let Some(byte) = self.peek_byte(0) {
            match byte {
                b' ' | b'\t' | b'\r' | b'\n' | b';' => self.pos += 1,
                b'#' => self.skip_comment(),
                _ => break,
            }
        }
    }

    fn skip_comment(&mut self) {
        let rest = self.rest();
        let line_end = rest.find('\n').unwrap_or(rest.len());
        let end = match self.mode {
            ParseMode::Template => rest.find("}}").map_or(line_end, |exit| exit.min(line_end)),
            ParseMode::Script => line_end,
        };
        self.pos += end;
    }

    fn lex_code_token(&mut self) -> Result<TokenKind, ParseError> {
        let rest = self.rest();
        let start = self.pos;

        if rest.starts_with("}}") && self.mode == ParseMode::Template {
            self.pos += 2;
            return Ok(TokenKind::CodeExit);
        }
        if rest.starts_with("{{") {
            return Err(ParseError::new(
                ParseErrorKind::NestedCodeEnter,
                Span::from_range(start..start + 2),
            ));
        }
        if rest.starts_with("$$") {
            self.pos += 2;
            return Ok(TokenKind::DelegateBlock);
        }

        let Some(first) = rest.chars().next() else {
            return Ok(TokenKind::Eof);
        };

        if first.is_ascii_alphabetic() || first == '_' {
            let len = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            self.pos += len;
            return Ok(TokenKind::keyword(&rest[..len]).unwrap_or(TokenKind::Ident));
        }
        if first.is_ascii_digit() {
            return Ok(self.lex_number());
        }
        if first == '"' || first == '\'' {
            return self.lex_string(first);
        }

        let two = match rest.get(..2) {
            Some("==") => Some(TokenKind::EqEq),
            Some("!=") => Some(TokenKind::NotEq),
            Some("<=") => Some(TokenKind::LtEq),
            Some(">=") => Some(TokenKind::GtEq),
            Some("&&") => Some(TokenKind::AndAnd),
            Some("||") => Some(TokenKind::OrOr),
            _ => None,
        };
        if let Some(kind) = two {
            self.pos += 2;
            return Ok(kind);
        }

        let one = match first {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            '=' => TokenKind::Eq,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '!' => TokenKind::Bang,
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedChar(other),
                    Span::from_range(start..start + other.len_utf8()),
                ));
            }
        };
        self.pos += 1;
        Ok(one)
    }

    fn lex_number(&mut self) -> TokenKind {
        let digits = |s: &str| s.bytes().take_while(u8::is_ascii_digit).count();

        self.pos += digits(self.rest());
        let is_fraction = self.peek_byte(0) == Some(b'.')
            && self.peek_byte(1).is_some_and(|b| b.is_ascii_digit());
        if !is_fraction {
            return TokenKind::Int;
        }
        self.pos += 1;
        self.pos += digits(self.rest());
        TokenKind::Float
    }

    fn lex_string(&mut self, quote: char) -> Result<TokenKind, ParseError> {
        let start = self.pos;
        let mut chars = self.rest().char_indices().skip(1);
        while let Some((offset, c)) = chars.next() {
            if c == '\\' {
                chars.next();
            } else if c == quote {
                self.pos += offset + 1;
                return Ok(TokenKind::Str);
            }
        }
        Err(ParseError::new(
            ParseErrorKind::UnterminatedString,
            Span::from_range(start..self.src.len()),
        ))
    }
}
