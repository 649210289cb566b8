//! Tree printer.
//!
//! Walks the tree in source order and emits every terminal preceded by its
//! leading trivia. Composite nodes place two kinds of directive before
//! their children:
//!
//! - `expect_space`: the next terminal should be separated by a space
//! - `expect_eos`: a statement ends before the next terminal
//!
//! A directive only materializes when the next terminal has no captured
//! trivia. Parsed trees capture trivia for every terminal, so they print
//! back byte for byte; hand-built or edited nodes get canonical spacing.
//!
//! An end of statement prints as a newline plus indentation, except
//! directly after `{{` or before `}}`, where a space is enough.

use quill_ir::visitor::walk_node;
use quill_ir::{
    Assign, Binary, Block, Call, ElseStmt, FunctionDecl, IfStmt, Index, List, Literal,
    LiteralValue, NodeId, NodeKind, Paren, RawText, ReadOnlyStmt, ReturnStmt, SyntaxTree,
    TokenKind, TokenNode, Unary, Variable, Visitor,
};

use crate::emitter::Emitter;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum Directive {
    #[default]
    None,
    Space,
    Eos,
}

/// Source printer over an [`Emitter`].
pub struct Printer<E: Emitter> {
    emitter: E,
    root: NodeId,
    pending: Directive,
    /// Nesting of statement blocks below the root.
    depth: usize,
    last_token: Option<TokenKind>,
    last_char: Option<char>,
}

impl<E: Emitter> Printer<E> {
    /// Printer for the subtree at `root`.
    pub fn new(emitter: E, root: NodeId) -> Self {
        Printer {
            emitter,
            root,
            pending: Directive::None,
            depth: 0,
            last_token: None,
            last_char: None,
        }
    }

    pub fn into_emitter(self) -> E {
        self.emitter
    }

    fn expect_space(&mut self) {
        if self.pending != Directive::Eos {
            self.pending = Directive::Space;
        }
    }

    fn expect_eos(&mut self) {
        self.pending = Directive::Eos;
    }

    fn request(&mut self, directive: Directive) {
        match directive {
            Directive::None => {}
            Directive::Space => self.expect_space(),
            Directive::Eos => self.expect_eos(),
        }
    }

    fn write(&mut self, text: &str) {
        if let Some(last) = text.chars().next_back() {
            self.last_char = Some(last);
        }
        self.emitter.emit(text);
    }

    fn space(&mut self) {
        if !self.last_char.is_some_and(char::is_whitespace) {
            self.emitter.emit_space();
            self.last_char = Some(' ');
        }
    }

    /// Emit whatever separation the pending directive calls for before a
    /// terminal without captured trivia.
    fn materialize(&mut self, kind: TokenKind, text: &str) {
        let directive = std::mem::take(&mut self.pending);
        let Some(last) = self.last_token else {
            return;
        };
        if kind == TokenKind::Raw || last == TokenKind::Raw {
            return;
        }

        match directive {
            Directive::Eos if last != TokenKind::CodeEnter && kind != TokenKind::CodeExit => {
                self.emitter.emit_newline();
                self.emitter.emit_indent(self.depth);
                self.last_char = Some(if self.depth == 0 { '\n' } else { ' ' });
            }
            Directive::Eos | Directive::Space => self.space(),
            Directive::None => {
                let joins = self.last_char.is_some_and(is_word_char)
                    && text.chars().next().is_some_and(is_word_char);
                if joins {
                    self.space();
                }
            }
        }
    }

    fn terminal(&mut self, tree: &SyntaxTree, id: NodeId, kind: TokenKind, text: &str) {
        match tree.leading_trivia(id) {
            Some(trivia) => {
                self.pending = Directive::None;
                self.write(trivia);
            }
            None => self.materialize(kind, text),
        }
        self.write(text);
        self.last_token = Some(kind);
    }

    /// Visit the filled slots of `id` in order, requesting `directive(slot)`
    /// before each.
    fn walk_slots<'ast>(
        &mut self,
        tree: &'ast SyntaxTree,
        id: NodeId,
        directive: impl Fn(usize) -> Directive,
    ) {
        for (slot, child) in tree.children(id).into_iter().enumerate() {
            let Some(child) = child else {
                continue;
            };
            self.request(directive(slot));
            self.visit_node(tree, child);
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn is_marker(tree: &SyntaxTree, id: NodeId, marker: TokenKind) -> bool {
    matches!(tree.kind(id), NodeKind::Token(token) if token.kind == marker)
}

fn literal_token(value: &LiteralValue) -> TokenKind {
    match value {
        LiteralValue::Null => TokenKind::Null,
        LiteralValue::Bool(true) => TokenKind::True,
        LiteralValue::Bool(false) => TokenKind::False,
        LiteralValue::Int(_) => TokenKind::Int,
        LiteralValue::Float(_) => TokenKind::Float,
        LiteralValue::Str(_) => TokenKind::Str,
    }
}

impl<'ast, E: Emitter> Visitor<'ast> for Printer<E> {
    fn visit_node(&mut self, tree: &'ast SyntaxTree, id: NodeId) {
        walk_node(self, tree, id);
        if let Some(trivia) = tree.trailing_trivia(id) {
            self.write(trivia);
        }
    }

    /// Statements are separated by an end of statement unless a code
    /// marker or raw text already separates them.
    fn visit_block(&mut self, tree: &'ast SyntaxTree, id: NodeId, block: &'ast Block) {
        let nested = id != self.root;
        if nested {
            self.depth += 1;
        }
        let mut previous: Option<NodeId> = None;
        for &stmt in &block.statements {
            if let Some(prev) = previous {
                let after_marker = is_marker(tree, prev, TokenKind::CodeEnter);
                let separated = is_marker(tree, prev, TokenKind::CodeExit)
                    || matches!(tree.kind(prev), NodeKind::Raw(_))
                    || matches!(tree.kind(stmt), NodeKind::Raw(_))
                    || is_marker(tree, stmt, TokenKind::CodeEnter);
                if after_marker {
                    self.expect_space();
                } else if !separated {
                    self.expect_eos();
                }
            }
            self.visit_node(tree, stmt);
            previous = Some(stmt);
        }
        if nested {
            self.depth -= 1;
        }
    }

    /// Items after a comma, or in a comma-less list, are space separated.
    fn visit_list(&mut self, tree: &'ast SyntaxTree, _id: NodeId, list: &'ast List) {
        for (i, &element) in list.elements.iter().enumerate() {
            if i > 0 && !is_marker(tree, element, TokenKind::Comma) {
                self.expect_space();
            }
            self.visit_node(tree, element);
        }
    }

    fn visit_raw(&mut self, tree: &'ast SyntaxTree, id: NodeId, raw: &'ast RawText) {
        self.terminal(tree, id, TokenKind::Raw, &raw.text);
    }

    fn visit_token(&mut self, tree: &'ast SyntaxTree, id: NodeId, token: &'ast TokenNode) {
        let text: &str = if token.text.is_empty() {
            token.kind.as_str()
        } else {
            &token.text
        };
        self.terminal(tree, id, token.kind, text);
    }

    fn visit_variable(&mut self, tree: &'ast SyntaxTree, id: NodeId, variable: &'ast Variable) {
        self.terminal(tree, id, TokenKind::Ident, tree.name_str(variable.name));
    }

    fn visit_literal(&mut self, tree: &'ast SyntaxTree, id: NodeId, literal: &'ast Literal) {
        self.terminal(tree, id, literal_token(&literal.value), &literal.text);
    }

    fn visit_unary(&mut self, tree: &'ast SyntaxTree, id: NodeId, _unary: &'ast Unary) {
        self.walk_slots(tree, id, |_| Directive::None);
    }

    fn visit_binary(&mut self, tree: &'ast SyntaxTree, id: NodeId, _binary: &'ast Binary) {
        self.walk_slots(tree, id, |slot| match slot {
            Binary::OP | Binary::RIGHT => Directive::Space,
            _ => Directive::None,
        });
    }

    fn visit_paren(&mut self, tree: &'ast SyntaxTree, id: NodeId, _paren: &'ast Paren) {
        self.walk_slots(tree, id, |_| Directive::None);
    }

    fn visit_call(&mut self, tree: &'ast SyntaxTree, id: NodeId, _call: &'ast Call) {
        self.walk_slots(tree, id, |_| Directive::None);
    }

    fn visit_index(&mut self, tree: &'ast SyntaxTree, id: NodeId, _index: &'ast Index) {
        self.walk_slots(tree, id, |_| Directive::None);
    }

    fn visit_assign(&mut self, tree: &'ast SyntaxTree, id: NodeId, _assign: &'ast Assign) {
        self.walk_slots(tree, id, |slot| match slot {
            Assign::EQ | Assign::VALUE => Directive::Space,
            _ => Directive::None,
        });
    }

    fn visit_if(&mut self, tree: &'ast SyntaxTree, id: NodeId, _stmt: &'ast IfStmt) {
        self.walk_slots(tree, id, |slot| match slot {
            IfStmt::IF_KW | IfStmt::CONDITION => Directive::Space,
            IfStmt::THEN | IfStmt::NEXT | IfStmt::END_KW => Directive::Eos,
            _ => Directive::None,
        });
    }

    fn visit_else(&mut self, tree: &'ast SyntaxTree, id: NodeId, _stmt: &'ast ElseStmt) {
        self.walk_slots(tree, id, |slot| match slot {
            ElseStmt::BODY => Directive::Eos,
            _ => Directive::None,
        });
    }

    fn visit_readonly(&mut self, tree: &'ast SyntaxTree, id: NodeId, _stmt: &'ast ReadOnlyStmt) {
        self.walk_slots(tree, id, |slot| match slot {
            ReadOnlyStmt::VARIABLE => Directive::Space,
            _ => Directive::None,
        });
    }

    fn visit_function(&mut self, tree: &'ast SyntaxTree, id: NodeId, decl: &'ast FunctionDecl) {
        let has_func_kw = decl.func_kw.is_some();
        let has_parens = decl.open_paren.is_some();
        let has_equal = decl.equal.is_some();
        self.walk_slots(tree, id, |slot| match slot {
            FunctionDecl::NAME if has_func_kw => Directive::Space,
            FunctionDecl::PARAMS if !has_parens => Directive::Space,
            FunctionDecl::EQUAL => Directive::Space,
            FunctionDecl::BODY if has_equal => Directive::Space,
            FunctionDecl::BODY | FunctionDecl::END_KW => Directive::Eos,
            _ => Directive::None,
        });
    }

    fn visit_return(&mut self, tree: &'ast SyntaxTree, id: NodeId, _stmt: &'ast ReturnStmt) {
        self.walk_slots(tree, id, |slot| match slot {
            ReturnStmt::VALUE => Directive::Space,
            _ => Directive::None,
        });
    }
}
