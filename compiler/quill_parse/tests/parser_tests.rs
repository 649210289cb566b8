//! Parser shape tests.

use pretty_assertions::assert_eq;
use quill_ir::{BinaryOp, LiteralValue, NodeId, NodeKind, SharedInterner, SyntaxTree, TokenKind};
use quill_parse::{parse, parse_script, parse_template, ParseErrorKind, ParseMode};

fn statements(tree: &SyntaxTree) -> Vec<NodeId> {
    let root = tree.root().expect("root");
    match tree.kind(root) {
        NodeKind::Block(block) => block.statements.clone(),
        other => panic!("root is {other:?}"),
    }
}

fn kinds(tree: &SyntaxTree, ids: &[NodeId]) -> Vec<&'static str> {
    ids.iter().map(|&id| tree.kind(id).describe()).collect()
}

fn only_statement(tree: &SyntaxTree) -> NodeId {
    let stmts = statements(tree);
    assert_eq!(stmts.len(), 1, "{:?}", kinds(tree, &stmts));
    stmts[0]
}

#[test]
fn template_statements_include_code_markers() {
    let tree = parse_template("Hi {{ name }}!").unwrap();
    let stmts = statements(&tree);
    assert_eq!(
        kinds(&tree, &stmts),
        vec!["raw text", "token", "variable", "token", "raw text"]
    );
    assert_eq!(tree.leading_trivia(stmts[2]), Some(" "));
    assert_eq!(tree.leading_trivia(stmts[0]), Some(""));
}

#[test]
fn add_function_shape() {
    let tree = parse_script("func add(a, b)\n  ret a + b\nend").unwrap();
    let func = tree.function(only_statement(&tree)).unwrap();

    assert_eq!(tree.name_str(func.name().unwrap()), "add");
    assert_eq!(func.parameter_count(), 2);
    assert_eq!(func.required_parameter_count(), 2);
    assert!(!func.has_variable_params());
    assert!(func.has_return());
    assert!(!func.has_expression_body());
    assert!(func.decl().func_kw.is_some());
    assert!(func.decl().end_kw.is_some());
}

#[test]
fn parameter_list_forms() {
    let tree = parse_script("func f()\nend\nfunc g\nend\nfunc h x y\nend").unwrap();
    let stmts = statements(&tree);
    let f = tree.function(stmts[0]).unwrap();
    let g = tree.function(stmts[1]).unwrap();
    let h = tree.function(stmts[2]).unwrap();

    assert_eq!(f.parameter_count(), 0);
    assert!(!f.has_variable_params());
    assert!(!f.has_return());

    assert_eq!(g.parameter_count(), 0);
    assert!(g.has_variable_params());

    assert_eq!(h.parameter_count(), 2);
    assert!(!h.has_variable_params());
    assert!(h.decl().open_paren.is_none());
}

#[test]
fn expression_bodied_function() {
    let tree = parse_script("func double(x) = x * 2").unwrap();
    let func = tree.function(only_statement(&tree)).unwrap();
    assert!(func.decl().equal.is_some());
    assert!(func.decl().end_kw.is_none());
    assert!(func.has_expression_body());
    assert!(func.has_return());
}

#[test]
fn anonymous_function_expression() {
    let tree = parse_script("f = do(x)\n ret x\nend").unwrap();
    let NodeKind::Assign(assign) = tree.kind(only_statement(&tree)) else {
        panic!("expected assignment");
    };
    let func = tree.function(assign.value.unwrap()).unwrap();
    assert!(func.is_anonymous());
    assert!(func.decl().func_kw.is_none());
    assert!(matches!(
        tree.kind(func.decl().name_or_do.unwrap()),
        NodeKind::Token(token) if token.kind == TokenKind::Do
    ));
}

#[test]
fn conditional_chain_shape() {
    let tree = parse_template("{{ if a }}A{{ else if b }}B{{ else }}C{{ end }}").unwrap();
    let stmts = statements(&tree);
    assert_eq!(kinds(&tree, &stmts), vec!["token", "if statement", "token"]);

    let NodeKind::If(head) = tree.kind(stmts[1]) else {
        panic!("expected if");
    };
    assert!(head.else_kw.is_none());
    assert!(head.end_kw.is_some());

    let NodeKind::If(second) = tree.kind(head.next.unwrap()) else {
        panic!("expected else if");
    };
    assert!(second.else_kw.is_some());
    assert!(second.end_kw.is_none());

    let NodeKind::Else(last) = tree.kind(second.next.unwrap()) else {
        panic!("expected else");
    };
    let body = tree.children(last.body.unwrap());
    assert_eq!(body.len(), 3); // }} C {{
}

#[test]
fn else_then_newline_if_is_nested() {
    let tree = parse_script("if a\n 1\nelse\n if b\n  2\n end\nend").unwrap();
    let NodeKind::If(head) = tree.kind(only_statement(&tree)) else {
        panic!("expected if");
    };
    let NodeKind::Else(tail) = tree.kind(head.next.unwrap()) else {
        panic!("expected plain else");
    };
    let inner = tree.children(tail.body.unwrap());
    assert_eq!(inner.len(), 1);
    assert_eq!(tree.kind(inner[0].unwrap()).describe(), "if statement");
}

#[test]
fn readonly_and_return() {
    let tree = parse_script("readonly x\nret").unwrap();
    let stmts = statements(&tree);
    assert_eq!(kinds(&tree, &stmts), vec!["readonly statement", "return statement"]);
    let NodeKind::Return(ret) = tree.kind(stmts[1]) else {
        panic!("expected return");
    };
    assert!(ret.value.is_none());
}

#[test]
fn binary_precedence() {
    let tree = parse_script("1 + 2 * 3").unwrap();
    let NodeKind::Binary(add) = tree.kind(only_statement(&tree)) else {
        panic!("expected binary");
    };
    assert_eq!(add.op, BinaryOp::Add);
    let NodeKind::Binary(mul) = tree.kind(add.right.unwrap()) else {
        panic!("expected nested binary");
    };
    assert_eq!(mul.op, BinaryOp::Mul);
}

#[test]
fn binary_is_left_associative() {
    let tree = parse_script("10 - 4 - 3").unwrap();
    let NodeKind::Binary(outer) = tree.kind(only_statement(&tree)) else {
        panic!("expected binary");
    };
    assert!(matches!(tree.kind(outer.left.unwrap()), NodeKind::Binary(_)));
    assert!(matches!(tree.kind(outer.right.unwrap()), NodeKind::Literal(_)));
}

#[test]
fn assignment_is_right_associative() {
    let tree = parse_script("a = b = 1").unwrap();
    let NodeKind::Assign(outer) = tree.kind(only_statement(&tree)) else {
        panic!("expected assignment");
    };
    assert!(matches!(tree.kind(outer.value.unwrap()), NodeKind::Assign(_)));
}

#[test]
fn newline_ends_expression() {
    let tree = parse_script("a\n-1").unwrap();
    let stmts = statements(&tree);
    assert_eq!(kinds(&tree, &stmts), vec!["variable", "unary expression"]);
}

#[test]
fn calls_and_indexing() {
    let tree = parse_script("f(1, xs[0])").unwrap();
    let NodeKind::Call(call) = tree.kind(only_statement(&tree)) else {
        panic!("expected call");
    };
    let args = tree.children(call.args.unwrap());
    assert_eq!(args.len(), 3); // 1 , xs[0]
    assert!(matches!(tree.kind(args[2].unwrap()), NodeKind::Index(_)));
}

#[test]
fn string_literal_value_and_text() {
    let tree = parse_script(r#""a\tb""#).unwrap();
    let NodeKind::Literal(lit) = tree.kind(only_statement(&tree)) else {
        panic!("expected literal");
    };
    assert_eq!(lit.value, LiteralValue::Str("a\tb".into()));
    assert_eq!(&*lit.text, r#""a\tb""#);
}

#[test]
fn root_trailing_trivia() {
    let tree = parse_script("x  \n# done\n").unwrap();
    let root = tree.root().unwrap();
    assert_eq!(tree.trailing_trivia(root), Some("  \n# done\n"));

    let tree = parse_template("{{ x }} tail").unwrap();
    assert_eq!(tree.trailing_trivia(tree.root().unwrap()), Some(""));
}

#[test]
fn unexpected_end_at_top_level() {
    let err = parse_template("{{ end }}").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::Unexpected(TokenKind::End));
}

#[test]
fn missing_end() {
    let err = parse_script("if a\n 1").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::Expected {
            expected: "`end`",
            found: TokenKind::Eof,
        }
    );
}

#[test]
fn invalid_assignment_target() {
    let err = parse_script("1 = 2").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidAssignTarget);
}

#[test]
fn two_expressions_on_one_line() {
    let err = parse_script("a b").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::ExpectedEndOfStatement(TokenKind::Ident));
}

#[test]
fn integer_overflow_reported() {
    let err = parse_script("99999999999999999999").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::IntegerOverflow(_)));
}

#[test]
fn deeply_nested_parens() {
    let depth = 5_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let tree = parse_script(&source).unwrap();
    assert!(matches!(tree.kind(only_statement(&tree)), NodeKind::Paren(_)));
}

#[test]
fn convenience_parsers_share_one_interner() {
    let first = parse_template("{{ greeting }}").unwrap();
    let second = parse_script("greeting").unwrap();
    assert!(SharedInterner::ptr_eq(first.interner(), second.interner()));
    assert!(SharedInterner::ptr_eq(first.interner(), &SharedInterner::global()));

    let own = SharedInterner::new();
    let isolated = parse("greeting", ParseMode::Script, &own).unwrap();
    assert!(SharedInterner::ptr_eq(isolated.interner(), &own));
    assert!(!SharedInterner::ptr_eq(isolated.interner(), first.interner()));
}
