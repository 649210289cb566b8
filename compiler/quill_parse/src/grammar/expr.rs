//! Expression parsing.
//!
//! Precedence, loosest first: assignment (right-associative), `||`, `&&`,
//! `== !=`, `< <= > >=`, `+ -`, `* / %`, unary `! -`, then postfix calls
//! and indexing on a primary.

use quill_ir::{
    Assign, Binary, BinaryOp, Call, Index, LiteralValue, NodeId, NodeKind, Paren, TokenKind, Unary,
    UnaryOp,
};
use quill_stack::ensure_sufficient_stack;

use crate::lexer::unescape_string;
use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_, '_> {
    /// Parse an expression, assignment included.
    pub(crate) fn parse_expr(&mut self) -> Result<NodeId, ParseError> {
        ensure_sufficient_stack(|| self.parse_assign())
    }

    fn parse_assign(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.span();
        let target = self.parse_binary(1)?;
        if !self.cursor.check_inline(TokenKind::Eq) {
            return Ok(target);
        }
        if !matches!(self.tree.kind(target), NodeKind::Variable(_)) {
            return Err(ParseError::new(
                ParseErrorKind::InvalidAssignTarget,
                self.cursor.span(),
            ));
        }
        let eq = self.token_node();
        let value = self.parse_expr()?;
        let assign = Assign {
            target: Some(target),
            eq: Some(eq),
            value: Some(value),
        };
        self.alloc(NodeKind::Assign(assign), start)
    }

    /// Precedence climbing over the binary operators.
    fn parse_binary(&mut self, min_precedence: u8) -> Result<NodeId, ParseError> {
        let start = self.cursor.span();
        let mut left = self.parse_unary()?;

        loop {
            let token = self.cursor.current();
            if token.eos_before {
                break;
            }
            let Some(op) = BinaryOp::from_token(token.kind) else {
                break;
            };
            if op.precedence() < min_precedence {
                break;
            }
            let op_token = self.token_node();
            let right = self.parse_binary(op.precedence() + 1)?;

            let mut binary = Binary::new(op);
            binary.left = Some(left);
            binary.op_token = Some(op_token);
            binary.right = Some(right);
            left = self.alloc(NodeKind::Binary(binary), start)?;
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<NodeId, ParseError> {
        let Some(op) = UnaryOp::from_token(self.cursor.kind()) else {
            return self.parse_postfix();
        };
        let start = self.cursor.span();
        let op_token = self.token_node();
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;

        let mut unary = Unary::new(op);
        unary.op_token = Some(op_token);
        unary.operand = Some(operand);
        self.alloc(NodeKind::Unary(unary), start)
    }

    fn parse_postfix(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.span();
        let mut expr = self.parse_primary()?;

        loop {
            if self.cursor.check_inline(TokenKind::LParen) {
                let open = self.token_node();
                let args = self.tree.list(self.cursor.span());
                if !self.cursor.check(TokenKind::RParen) {
                    loop {
                        let arg = self.parse_expr()?;
                        self.tree.push_child(args, arg)?;
                        if !self.cursor.check(TokenKind::Comma) {
                            break;
                        }
                        let comma = self.token_node();
                        self.tree.push_child(args, comma)?;
                    }
                }
                let close = self.expect_token(TokenKind::RParen, "`)` or `,`")?;
                let call = Call {
                    callee: Some(expr),
                    open: Some(open),
                    args: Some(args),
                    close: Some(close),
                };
                expr = self.alloc(NodeKind::Call(call), start)?;
            } else if self.cursor.check_inline(TokenKind::LBracket) {
                let open = self.token_node();
                let index = self.parse_expr()?;
                let close = self.expect_token(TokenKind::RBracket, "`]`")?;
                let node = Index {
                    target: Some(expr),
                    open: Some(open),
                    index: Some(index),
                    close: Some(close),
                };
                expr = self.alloc(NodeKind::Index(node), start)?;
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> Result<NodeId, ParseError> {
        let token = self.cursor.current();
        match token.kind {
            TokenKind::Int
            | TokenKind::Float
            | TokenKind::Str
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null => self.parse_literal(),
            TokenKind::Ident | TokenKind::DelegateBlock => Ok(self.variable_node()),
            TokenKind::LParen => {
                let open = self.token_node();
                let inner = self.parse_expr()?;
                let close = self.expect_token(TokenKind::RParen, "`)`")?;
                let paren = Paren {
                    open: Some(open),
                    inner: Some(inner),
                    close: Some(close),
                };
                self.alloc(NodeKind::Paren(paren), token.span)
            }
            TokenKind::Do => {
                let do_kw = self.token_node();
                self.parse_function_rest(token.span, None, do_kw)
            }
            other => Err(ParseError::expected("expression", other, token.span)),
        }
    }

    fn parse_literal(&mut self) -> Result<NodeId, ParseError> {
        let token = self.cursor.current();
        let value = match token.kind {
            TokenKind::Int => token.text.parse::<i64>().map(LiteralValue::Int).map_err(|_| {
                ParseError::new(
                    ParseErrorKind::IntegerOverflow(token.text.to_string()),
                    token.span,
                )
            })?,
            TokenKind::Float => token.text.parse::<f64>().map(LiteralValue::Float).map_err(|_| {
                ParseError::new(
                    ParseErrorKind::InvalidNumber(token.text.to_string()),
                    token.span,
                )
            })?,
            TokenKind::Str => {
                let body = token
                    .text
                    .get(1..token.text.len().saturating_sub(1))
                    .unwrap_or("");
                LiteralValue::Str(unescape_string(body).into())
            }
            TokenKind::True => LiteralValue::Bool(true),
            TokenKind::False => LiteralValue::Bool(false),
            TokenKind::Null => LiteralValue::Null,
            other => return Err(ParseError::expected("literal", other, token.span)),
        };

        let token = self.consume();
        let id = self.tree.literal(value, token.text, token.span);
        self.tree.set_leading_trivia(id, Some(token.leading));
        Ok(id)
    }
}
