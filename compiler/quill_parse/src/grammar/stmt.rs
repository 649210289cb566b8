//! Statement parsing.
//!
//! Blocks hold raw text, code markers and statements in source order. The
//! body of a conditional segment or function therefore includes the `}}`
//! and `{{` around the template text it encloses.

use quill_ir::{ElseStmt, FunctionDecl, IfStmt, NodeId, NodeKind, ReadOnlyStmt, ReturnStmt, TokenKind};
use quill_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_, '_> {
    /// Fill `block` with statements until end of input, or until `end`/`else`
    /// when `nested`.
    pub(crate) fn parse_statements(&mut self, block: NodeId, nested: bool) -> Result<(), ParseError> {
        loop {
            let token = self.cursor.current();
            let child = match token.kind {
                TokenKind::Eof => return Ok(()),
                TokenKind::End | TokenKind::Else if nested => return Ok(()),
                TokenKind::End | TokenKind::Else => {
                    return Err(ParseError::unexpected(token.kind, token.span));
                }
                TokenKind::Raw => self.raw_node(),
                TokenKind::CodeEnter | TokenKind::CodeExit => self.token_node(),
                _ => {
                    let stmt = self.parse_statement()?;
                    self.expect_statement_end()?;
                    stmt
                }
            };
            self.tree.push_child(block, child)?;
        }
    }

    /// Nested statement block, stopping before `end` or `else`.
    pub(crate) fn parse_block(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.span();
        let block = self.tree.block(start);
        self.parse_statements(block, true)?;
        let span = quill_ir::Span::new(start.start, self.last_end.max(start.start));
        self.tree.set_span(block, span);
        Ok(block)
    }

    pub(crate) fn parse_statement(&mut self) -> Result<NodeId, ParseError> {
        ensure_sufficient_stack(|| match self.cursor.kind() {
            TokenKind::If => self.parse_if(None, true),
            TokenKind::ReadOnly => self.parse_readonly(),
            TokenKind::Func => self.parse_function_statement(),
            TokenKind::Return => self.parse_return(),
            _ => self.parse_expr(),
        })
    }

    /// `if cond ... [else if cond ...]* [else ...] end`
    ///
    /// Only the chain head consumes `end`; `else if` segments are parsed by
    /// recursion into the previous segment's `next` slot.
    fn parse_if(&mut self, else_kw: Option<NodeId>, is_head: bool) -> Result<NodeId, ParseError> {
        let start = self.cursor.span();
        let if_kw = self.expect_token(TokenKind::If, "`if`")?;
        let condition = self.parse_expr()?;
        self.expect_statement_end()?;
        let then = self.parse_block()?;

        let next = if self.cursor.check(TokenKind::Else) {
            let else_start = self.cursor.span();
            let else_token = self.token_node();
            if self.cursor.check_inline(TokenKind::If) {
                Some(self.parse_if(Some(else_token), false)?)
            } else {
                let body = self.parse_block()?;
                let stmt = ElseStmt {
                    else_kw: Some(else_token),
                    body: Some(body),
                };
                Some(self.alloc(NodeKind::Else(stmt), else_start)?)
            }
        } else {
            None
        };

        let end_kw = if is_head {
            Some(self.expect_token(TokenKind::End, "`end`")?)
        } else {
            None
        };

        let stmt = IfStmt {
            else_kw,
            if_kw: Some(if_kw),
            condition: Some(condition),
            then: Some(then),
            next,
            end_kw,
        };
        self.alloc(NodeKind::If(stmt), start)
    }

    /// `readonly name`
    fn parse_readonly(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.span();
        let readonly_kw = self.token_node();
        let variable = self.expect_variable("variable name")?;
        let stmt = ReadOnlyStmt {
            readonly_kw: Some(readonly_kw),
            variable: Some(variable),
        };
        self.alloc(NodeKind::ReadOnly(stmt), start)
    }

    /// `ret [value]` / `return [value]`
    fn parse_return(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.span();
        let return_kw = self.token_node();
        let value = if self.cursor.at_statement_boundary() {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let stmt = ReturnStmt {
            return_kw: Some(return_kw),
            value,
        };
        self.alloc(NodeKind::Return(stmt), start)
    }

    /// `func name [params] body end` or `func name(params) = expr`
    fn parse_function_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.span();
        let func_kw = self.token_node();
        let name = self.expect_variable("function name")?;
        self.parse_function_rest(start, Some(func_kw), name)
    }

    /// Parameters and body shared by `func name` and `do`.
    ///
    /// Parameters are `(a, b)`, `()`, a paren-free `a b` on the same line, or
    /// absent. Without a parameter list the function is variadic. The body
    /// is either `= expr` or a block closed by `end`; the body is attached
    /// last so the function's return flag sees the finished subtree.
    pub(crate) fn parse_function_rest(
        &mut self,
        start: quill_ir::Span,
        func_kw: Option<NodeId>,
        name_or_do: NodeId,
    ) -> Result<NodeId, ParseError> {
        let mut decl = FunctionDecl::default();
        decl.func_kw = func_kw;
        decl.name_or_do = Some(name_or_do);

        if self.cursor.check_inline(TokenKind::LParen) {
            decl.open_paren = Some(self.token_node());
            let params = self.tree.list(self.cursor.span());
            if !self.cursor.check(TokenKind::RParen) {
                loop {
                    let param = self.expect_variable("parameter name")?;
                    self.tree.push_child(params, param)?;
                    if !self.cursor.check(TokenKind::Comma) {
                        break;
                    }
                    let comma = self.token_node();
                    self.tree.push_child(params, comma)?;
                }
            }
            decl.params = Some(params);
            decl.close_paren = Some(self.expect_token(TokenKind::RParen, "`)`")?);
        } else if self.cursor.check_inline(TokenKind::Ident) {
            let params = self.tree.list(self.cursor.span());
            while self.cursor.check_inline(TokenKind::Ident) {
                let param = self.variable_node();
                self.tree.push_child(params, param)?;
            }
            decl.params = Some(params);
        }

        if self.cursor.check_inline(TokenKind::Eq) {
            decl.equal = Some(self.token_node());
            decl.body = Some(self.parse_expr()?);
        } else {
            self.expect_statement_end()?;
            decl.body = Some(self.parse_block()?);
            decl.end_kw = Some(self.expect_token(TokenKind::End, "`end`")?);
        }

        self.alloc(NodeKind::Function(decl), start)
    }
}
