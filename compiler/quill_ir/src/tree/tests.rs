use super::*;
use pretty_assertions::assert_eq;

fn return_stmt(tree: &mut SyntaxTree) -> NodeId {
    let kw = tree.token(TokenKind::Return);
    tree.alloc(
        NodeKind::Return(ReturnStmt {
            return_kw: Some(kw),
            value: None,
        }),
        Span::DUMMY,
    )
    .unwrap()
}

fn named_function(tree: &mut SyntaxTree, name: &str) -> NodeId {
    let func = tree
        .alloc(NodeKind::Function(FunctionDecl::default()), Span::DUMMY)
        .unwrap();
    let name = tree.variable_named(name);
    tree.set_child(func, FunctionDecl::NAME, Some(name)).unwrap();
    func
}

fn param_list(tree: &mut SyntaxTree, names: &[&str]) -> NodeId {
    let list = tree.list(Span::DUMMY);
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            let comma = tree.token(TokenKind::Comma);
            tree.push_child(list, comma).unwrap();
        }
        let var = tree.variable_named(name);
        tree.push_child(list, var).unwrap();
    }
    list
}

#[test]
fn test_set_child_links_parent() {
    let mut tree = SyntaxTree::default();
    let ro = tree
        .alloc(NodeKind::ReadOnly(ReadOnlyStmt::default()), Span::DUMMY)
        .unwrap();
    let kw = tree.token(TokenKind::ReadOnly);
    let var = tree.variable_named("x");

    tree.set_child(ro, ReadOnlyStmt::READONLY_KW, Some(kw)).unwrap();
    tree.set_child(ro, ReadOnlyStmt::VARIABLE, Some(var)).unwrap();

    assert_eq!(tree.parent(kw), Some(ro));
    assert_eq!(tree.parent(var), Some(ro));
    assert_eq!(tree.children(ro).to_vec(), vec![Some(kw), Some(var)]);
}

#[test]
fn test_children_include_empty_slots() {
    let mut tree = SyntaxTree::default();
    let stmt = tree
        .alloc(NodeKind::Return(ReturnStmt::default()), Span::DUMMY)
        .unwrap();
    assert_eq!(tree.children(stmt).to_vec(), vec![None, None]);
}

#[test]
fn test_alloc_attaches_prefilled_children() {
    let mut tree = SyntaxTree::default();
    let left = tree.variable_named("a");
    let op = tree.token(TokenKind::Plus);
    let right = tree.variable_named("b");
    let mut binary = Binary::new(BinaryOp::Add);
    binary.left = Some(left);
    binary.op_token = Some(op);
    binary.right = Some(right);

    let id = tree.alloc(NodeKind::Binary(binary), Span::DUMMY).unwrap();

    assert_eq!(tree.parent(left), Some(id));
    assert_eq!(tree.parent(op), Some(id));
    assert_eq!(tree.parent(right), Some(id));
}

#[test]
fn test_push_child_reparents() {
    let mut tree = SyntaxTree::default();
    let first = tree.block(Span::DUMMY);
    let second = tree.block(Span::DUMMY);
    let raw = tree.raw("hello", Span::DUMMY);

    tree.push_child(first, raw).unwrap();
    tree.push_child(second, raw).unwrap();

    assert_eq!(tree.parent(raw), Some(second));
    assert!(tree.children(first).is_empty());
    assert_eq!(tree.children(second).to_vec(), vec![Some(raw)]);
}

#[test]
fn test_set_child_moves_between_slots() {
    let mut tree = SyntaxTree::default();
    let paren = tree
        .alloc(NodeKind::Paren(Paren::default()), Span::DUMMY)
        .unwrap();
    let block = tree.block(Span::DUMMY);
    let var = tree.variable_named("x");

    tree.push_child(block, var).unwrap();
    tree.set_child(paren, Paren::INNER, Some(var)).unwrap();

    assert_eq!(tree.parent(var), Some(paren));
    assert!(tree.children(block).is_empty());
}

#[test]
fn test_set_child_returns_displaced_node() {
    let mut tree = SyntaxTree::default();
    let paren = tree
        .alloc(NodeKind::Paren(Paren::default()), Span::DUMMY)
        .unwrap();
    let a = tree.variable_named("a");
    let b = tree.variable_named("b");

    tree.set_child(paren, Paren::INNER, Some(a)).unwrap();
    let displaced = tree.set_child(paren, Paren::INNER, Some(b)).unwrap();

    assert_eq!(displaced, Some(a));
    assert_eq!(tree.parent(a), None);
    assert_eq!(tree.parent(b), Some(paren));
}

#[test]
fn test_reattach_same_slot_is_noop() {
    let mut tree = SyntaxTree::default();
    let paren = tree
        .alloc(NodeKind::Paren(Paren::default()), Span::DUMMY)
        .unwrap();
    let a = tree.variable_named("a");

    tree.set_child(paren, Paren::INNER, Some(a)).unwrap();
    let displaced = tree.set_child(paren, Paren::INNER, Some(a)).unwrap();

    assert_eq!(displaced, None);
    assert_eq!(tree.parent(a), Some(paren));
}

#[test]
fn test_cycle_rejected() {
    let mut tree = SyntaxTree::default();
    let outer = tree.block(Span::DUMMY);
    let func = named_function(&mut tree, "f");
    let body = tree.block(Span::DUMMY);
    tree.set_child(func, FunctionDecl::BODY, Some(body)).unwrap();
    tree.push_child(outer, func).unwrap();

    // func is an ancestor of body
    let err = tree.push_child(body, func).unwrap_err();
    assert_eq!(err, TreeError::Cycle { parent: body, child: func });

    let paren = tree
        .alloc(NodeKind::Paren(Paren::default()), Span::DUMMY)
        .unwrap();
    let err = tree.set_child(paren, Paren::INNER, Some(paren)).unwrap_err();
    assert!(matches!(err, TreeError::Cycle { .. }));

    // Tree unchanged after the failed attach
    assert_eq!(tree.parent(func), Some(outer));
}

#[test]
fn test_wrong_kind_rejected() {
    let mut tree = SyntaxTree::default();
    let stmt = tree
        .alloc(NodeKind::If(IfStmt::default()), Span::DUMMY)
        .unwrap();
    let raw = tree.raw("text", Span::DUMMY);

    let err = tree.set_child(stmt, IfStmt::THEN, Some(raw)).unwrap_err();
    assert_eq!(
        err,
        TreeError::WrongChildKind {
            parent: "if statement",
            slot: "then",
            found: "raw text",
        }
    );

    let wrong_kw = tree.token(TokenKind::End);
    assert!(tree.set_child(stmt, IfStmt::IF_KW, Some(wrong_kw)).is_err());
    assert_eq!(tree.parent(raw), None);
}

#[test]
fn test_function_name_slot_validation() {
    let mut tree = SyntaxTree::default();
    let func = tree
        .alloc(NodeKind::Function(FunctionDecl::default()), Span::DUMMY)
        .unwrap();

    let literal = tree.literal(LiteralValue::Int(1), "1", Span::DUMMY);
    let err = tree
        .set_child(func, FunctionDecl::NAME, Some(literal))
        .unwrap_err();
    assert_eq!(err, TreeError::InvalidNameSlot { found: "literal" });

    let func_kw = tree.token(TokenKind::Func);
    assert!(matches!(
        tree.set_child(func, FunctionDecl::NAME, Some(func_kw)),
        Err(TreeError::InvalidNameSlot { .. })
    ));

    let do_kw = tree.token(TokenKind::Do);
    tree.set_child(func, FunctionDecl::NAME, Some(do_kw)).unwrap();
    assert!(tree.function(func).unwrap().is_anonymous());

    let name = tree.variable_named("greet");
    tree.set_child(func, FunctionDecl::NAME, Some(name)).unwrap();
    let view = tree.function(func).unwrap();
    assert!(!view.is_anonymous());
    assert_eq!(tree.name_str(view.name().unwrap()), "greet");
}

#[test]
fn test_slot_out_of_range() {
    let mut tree = SyntaxTree::default();
    let stmt = tree
        .alloc(NodeKind::Else(ElseStmt::default()), Span::DUMMY)
        .unwrap();
    let err = tree.set_child(stmt, 7, None).unwrap_err();
    assert_eq!(
        err,
        TreeError::SlotOutOfRange {
            parent: "else statement",
            index: 7,
        }
    );

    let var = tree.variable_named("x");
    assert!(matches!(
        tree.push_child(stmt, var),
        Err(TreeError::NotAList { .. })
    ));
}

#[test]
fn test_has_return_computed_on_body_attach() {
    let mut tree = SyntaxTree::default();
    let func = named_function(&mut tree, "f");
    assert!(!tree.function(func).unwrap().has_return());

    let body = tree.block(Span::DUMMY);
    let ret = return_stmt(&mut tree);
    tree.push_child(body, ret).unwrap();
    tree.set_child(func, FunctionDecl::BODY, Some(body)).unwrap();

    assert!(tree.function(func).unwrap().has_return());
}

#[test]
fn test_has_return_recomputed_on_body_replace() {
    let mut tree = SyntaxTree::default();
    let func = named_function(&mut tree, "f");

    let with_return = tree.block(Span::DUMMY);
    let ret = return_stmt(&mut tree);
    tree.push_child(with_return, ret).unwrap();
    tree.set_child(func, FunctionDecl::BODY, Some(with_return)).unwrap();
    assert!(tree.function(func).unwrap().has_return());

    let without_return = tree.block(Span::DUMMY);
    let raw = tree.raw("text", Span::DUMMY);
    tree.push_child(without_return, raw).unwrap();
    tree.set_child(func, FunctionDecl::BODY, Some(without_return))
        .unwrap();
    assert!(!tree.function(func).unwrap().has_return());

    tree.set_child(func, FunctionDecl::BODY, Some(with_return)).unwrap();
    assert!(tree.function(func).unwrap().has_return());

    tree.detach(with_return);
    assert!(!tree.function(func).unwrap().has_return());
}

#[test]
fn test_has_return_for_expression_body() {
    let mut tree = SyntaxTree::default();
    let func = named_function(&mut tree, "double");
    let body = tree.variable_named("x");
    tree.set_child(func, FunctionDecl::BODY, Some(body)).unwrap();

    let view = tree.function(func).unwrap();
    assert!(view.has_return());
    assert!(view.has_expression_body());
}

#[test]
fn test_has_return_sees_nested_function() {
    let mut tree = SyntaxTree::default();
    let inner = named_function(&mut tree, "inner");
    let inner_body = tree.block(Span::DUMMY);
    let ret = return_stmt(&mut tree);
    tree.push_child(inner_body, ret).unwrap();
    tree.set_child(inner, FunctionDecl::BODY, Some(inner_body)).unwrap();

    let outer = named_function(&mut tree, "outer");
    let outer_body = tree.block(Span::DUMMY);
    tree.push_child(outer_body, inner).unwrap();
    tree.set_child(outer, FunctionDecl::BODY, Some(outer_body)).unwrap();

    assert!(tree.function(outer).unwrap().has_return());
}

#[test]
fn test_parameter_arity() {
    let mut tree = SyntaxTree::default();

    let two = named_function(&mut tree, "add");
    let params = param_list(&mut tree, &["a", "b"]);
    tree.set_child(two, FunctionDecl::PARAMS, Some(params)).unwrap();
    let view = tree.function(two).unwrap();
    assert_eq!(view.parameter_count(), 2);
    assert_eq!(view.required_parameter_count(), 2);
    assert!(!view.has_variable_params());
    let names: Vec<_> = view.parameters().map(|n| tree.name_str(n)).collect();
    assert_eq!(names, vec!["a", "b"]);

    let empty = named_function(&mut tree, "nothing");
    let params = param_list(&mut tree, &[]);
    tree.set_child(empty, FunctionDecl::PARAMS, Some(params)).unwrap();
    let view = tree.function(empty).unwrap();
    assert_eq!(view.parameter_count(), 0);
    assert!(!view.has_variable_params());

    let variadic = named_function(&mut tree, "any");
    let view = tree.function(variadic).unwrap();
    assert_eq!(view.parameter_count(), 0);
    assert_eq!(view.required_parameter_count(), 0);
    assert!(view.has_variable_params());
}

#[test]
fn test_trivia_none_vs_empty() {
    let mut tree = SyntaxTree::default();
    let tok = tree.token(TokenKind::End);
    assert_eq!(tree.leading_trivia(tok), None);
    tree.set_leading_trivia(tok, Some(""));
    assert_eq!(tree.leading_trivia(tok), Some(""));
    tree.set_leading_trivia(tok, Some(" \n"));
    assert_eq!(tree.node(tok).leading_trivia(), Some(" \n"));
}

#[test]
fn test_non_function_has_no_view() {
    let mut tree = SyntaxTree::default();
    let block = tree.block(Span::DUMMY);
    assert!(tree.function(block).is_none());
}

#[test]
fn test_has_return_on_deeply_nested_body() {
    let mut tree = SyntaxTree::default();
    let func = named_function(&mut tree, "f");

    let mut expr = tree.variable_named("x");
    for _ in 0..200_000 {
        let mut unary = crate::Unary::new(crate::UnaryOp::Not);
        unary.operand = Some(expr);
        expr = tree.alloc(NodeKind::Unary(unary), Span::DUMMY).unwrap();
    }
    let body = tree.block(Span::DUMMY);
    tree.push_child(body, expr).unwrap();
    tree.set_child(func, FunctionDecl::BODY, Some(body)).unwrap();
    assert!(!tree.function(func).unwrap().has_return());
}

#[cfg(target_pointer_width = "64")]
#[test]
fn test_node_ids_do_not_wrap() {
    assert_eq!(next_node_id(0), Ok(NodeId::new(0)));
    assert_eq!(next_node_id(u32::MAX as usize), Ok(NodeId::new(u32::MAX)));
    assert_eq!(next_node_id(u32::MAX as usize + 1), Err(TreeError::ArenaFull));
}
