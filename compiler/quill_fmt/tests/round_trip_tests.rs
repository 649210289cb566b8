//! Property-based round-trip tests for the printer.
//!
//! Generated templates and scripts are checked for:
//! 1. Exactness: print(parse(source)) == source
//! 2. Behavior: the reprinted source evaluates like the original
//! 3. Canonical spacing: a tree stripped of all trivia prints to source
//!    that parses back to a tree with the same behavior

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use proptest::sample::select;
use quill_eval::{buffer_handler, EvalErrorKind, InterpreterBuilder, Value};
use quill_fmt::print;
use quill_ir::{
    Assign, Binary, BinaryOp, LiteralValue, NodeId, NodeKind, Span, SyntaxTree, TokenKind,
};
use quill_parse::{parse_script, parse_template};

// -- Code Generation Strategies --

const VARIABLES: &[&str] = &["a", "b", "x", "total", "name", "n"];
const FUNCTIONS: &[&str] = &["f", "g"];

/// Optional whitespace between tokens on one line.
fn sep() -> impl Strategy<Value = &'static str> {
    select(vec!["", " ", "  ", "\t"])
}

/// Required whitespace after a keyword.
fn gap() -> impl Strategy<Value = &'static str> {
    select(vec![" ", "  ", "\t"])
}

fn leaf_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        3 => select(VARIABLES).prop_map(String::from),
        3 => (0i64..1000).prop_map(|n| n.to_string()),
        1 => (0u32..100, 0u32..100).prop_map(|(whole, frac)| format!("{}.{}", whole, frac)),
        2 => "[a-z ]{0,6}".prop_map(|s| format!("'{}'", s)),
        1 => select(vec!["true", "false", "null"]).prop_map(String::from),
    ]
    .boxed()
}

fn binary_op_strategy() -> impl Strategy<Value = &'static str> {
    select(vec![
        "+", "-", "*", "/", "%", "==", "!=", "<", "<=", ">", ">=", "&&", "||",
    ])
}

/// Expressions stay on one line; binary operators only continue inline.
fn expr_strategy(depth: u32) -> BoxedStrategy<String> {
    if depth == 0 {
        return leaf_strategy();
    }
    let sub = expr_strategy(depth - 1);
    prop_oneof![
        3 => leaf_strategy(),
        3 => (sub.clone(), sep(), binary_op_strategy(), sep(), sub.clone())
            .prop_map(|(l, a, op, b, r)| format!("{}{}{}{}{}", l, a, op, b, r)),
        1 => (sep(), sub.clone(), sep()).prop_map(|(a, e, b)| format!("({}{}{})", a, e, b)),
        1 => (select(vec!["!", "-"]), sub.clone()).prop_map(|(op, e)| format!("{}{}", op, e)),
        2 => (select(FUNCTIONS), prop::collection::vec(sub.clone(), 0..3), sep())
            .prop_map(|(f, args, s)| format!("{}({})", f, args.join(&format!(",{}", s)))),
        1 => (sub.clone(), sep(), sub).prop_map(|(t, s, i)| format!("({})[{}{}]", t, s, i)),
    ]
    .boxed()
}

fn simple_statement_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        4 => expr_strategy(2),
        4 => (select(VARIABLES), sep(), sep(), expr_strategy(2))
            .prop_map(|(v, a, b, e)| format!("{}{}={}{}", v, a, b, e)),
        1 => (gap(), select(VARIABLES)).prop_map(|(g, v)| format!("readonly{}{}", g, v)),
    ]
    .boxed()
}

/// Indented statement lines, each ending with a newline.
fn body_strategy(depth: u32) -> BoxedStrategy<String> {
    let indent = select(vec!["  ", "    ", "\t"]);
    prop::collection::vec((indent, statement_strategy(depth)), 0..3)
        .prop_map(|lines| {
            lines
                .into_iter()
                .map(|(indent, stmt)| format!("{}{}\n", indent, stmt))
                .collect()
        })
        .boxed()
}

fn if_strategy(depth: u32) -> BoxedStrategy<String> {
    let else_if = prop::option::of((gap(), expr_strategy(1), body_strategy(depth)));
    let else_body = prop::option::of(body_strategy(depth));
    (gap(), expr_strategy(2), body_strategy(depth), else_if, else_body)
        .prop_map(|(g, cond, then, else_if, else_body)| {
            let mut source = format!("if{}{}\n{}", g, cond, then);
            if let Some((g, cond, body)) = else_if {
                source.push_str(&format!("else if{}{}\n{}", g, cond, body));
            }
            if let Some(body) = else_body {
                source.push_str(&format!("else\n{}", body));
            }
            source.push_str("end");
            source
        })
        .boxed()
}

fn statement_strategy(depth: u32) -> BoxedStrategy<String> {
    if depth == 0 {
        return simple_statement_strategy();
    }
    prop_oneof![
        3 => simple_statement_strategy(),
        1 => if_strategy(depth - 1),
    ]
    .boxed()
}

/// Function definitions. Bodies never call, so generated programs always
/// terminate quickly.
fn prelude_strategy() -> impl Strategy<Value = &'static str> {
    select(vec![
        "",
        "func f(a, b)\n  ret a + b\nend\n",
        "func f(a,b) = a - b\n",
        "func g(a)\n    if a\n        ret a * 2\n    end\n    ret 0\nend\n",
        "func g a\n  ret a\nend;",
        "g = do(a) = a * 3\nfunc f()\n  ret arguments\nend\n",
    ])
}

fn statement_separator() -> impl Strategy<Value = &'static str> {
    select(vec!["\n", ";", "; ", "\n\n", "  # note\n", "\n\t"])
}

fn script_strategy() -> impl Strategy<Value = String> {
    (
        select(vec!["", "\n", "  ", "# header\n"]),
        prelude_strategy(),
        prop::collection::vec((statement_strategy(2), statement_separator()), 1..5),
        select(vec!["", "\n", "  # done"]),
    )
        .prop_map(|(lead, prelude, statements, trail)| {
            let mut source = format!("{}{}", lead, prelude);
            let count = statements.len();
            for (i, (stmt, separator)) in statements.into_iter().enumerate() {
                source.push_str(&stmt);
                if i + 1 < count {
                    source.push_str(separator);
                }
            }
            source.push_str(trail);
            source
        })
}

fn raw_text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z ,.!\n]{1,10}"
}

fn island_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        4 => (sep(), simple_statement_strategy(), sep())
            .prop_map(|(a, stmt, b)| format!("{{{{{}{}{}}}}}", a, stmt, b)),
        1 => sep().prop_map(|a| format!("{{{{{}}}}}", a)),
        2 => (gap(), expr_strategy(1), raw_text_strategy(), prop::option::of(raw_text_strategy()))
            .prop_map(|(g, cond, then, otherwise)| match otherwise {
                Some(otherwise) => format!(
                    "{{{{ if{}{} }}}}{}{{{{ else }}}}{}{{{{ end }}}}",
                    g, cond, then, otherwise
                ),
                None => format!("{{{{if{}{}}}}}{}{{{{end}}}}", g, cond, then),
            }),
    ]
    .boxed()
}

fn template_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![raw_text_strategy(), island_strategy()], 1..6)
        .prop_map(|parts| parts.concat())
}

// -- Helpers --

/// Output up to the first error, and the error kind if any.
#[derive(Debug, PartialEq)]
struct Outcome {
    output: String,
    error: Option<EvalErrorKind>,
}

fn evaluate(tree: &SyntaxTree) -> Outcome {
    let output = buffer_handler();
    let mut interpreter = InterpreterBuilder::new(tree)
        .output(output.clone())
        .global("name", Value::from("Ann"))
        .global("n", Value::Int(3))
        .build();
    let error = interpreter
        .evaluate(tree.root().unwrap())
        .err()
        .map(|err| err.kind);
    Outcome {
        output: output.output(),
        error,
    }
}

fn strip_trivia(tree: &mut SyntaxTree, id: NodeId) {
    tree.set_leading_trivia(id, None);
    tree.set_trailing_trivia(id, None);
    for child in tree.children(id).into_iter().flatten() {
        strip_trivia(tree, child);
    }
}

fn check_round_trip(source: &str, parse: fn(&str) -> Result<SyntaxTree, quill_parse::ParseError>) {
    let tree = parse(source).unwrap();
    let root = tree.root().unwrap();
    let printed = print(&tree, root);
    assert_eq!(printed, source);

    let reparsed = parse(&printed).unwrap();
    assert_eq!(evaluate(&reparsed), evaluate(&tree));
}

fn check_canonical(source: &str, parse: fn(&str) -> Result<SyntaxTree, quill_parse::ParseError>) {
    let original = parse(source).unwrap();
    let mut stripped = parse(source).unwrap();
    let root = stripped.root().unwrap();
    strip_trivia(&mut stripped, root);

    let canonical = print(&stripped, root);
    let reparsed = parse(&canonical)
        .unwrap_or_else(|err| panic!("canonical output does not parse: {err:?}\n{canonical}"));
    assert_eq!(evaluate(&reparsed), evaluate(&original), "canonical output:\n{}", canonical);
}

// -- Property Tests --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_script_prints_back_exactly(source in script_strategy()) {
        check_round_trip(&source, parse_script);
    }

    #[test]
    fn prop_template_prints_back_exactly(source in template_strategy()) {
        check_round_trip(&source, parse_template);
    }

    #[test]
    fn prop_script_canonical_spacing_preserves_behavior(source in script_strategy()) {
        check_canonical(&source, parse_script);
    }

    #[test]
    fn prop_template_canonical_spacing_preserves_behavior(source in template_strategy()) {
        check_canonical(&source, parse_template);
    }
}

// -- Fixed Cases --

#[test]
fn synthesized_tree_parses_to_same_behavior() {
    let mut tree = SyntaxTree::default();
    let one = tree.literal(LiteralValue::Int(1), "1", Span::DUMMY);
    let two = tree.literal(LiteralValue::Int(2), "2", Span::DUMMY);
    let plus = tree.token(TokenKind::Plus);
    let mut sum = Binary::new(BinaryOp::Add);
    sum.left = Some(one);
    sum.op_token = Some(plus);
    sum.right = Some(two);
    let sum = tree.alloc(NodeKind::Binary(sum), Span::DUMMY).unwrap();

    let target = tree.variable_named("x");
    let eq = tree.token(TokenKind::Eq);
    let assign = tree
        .alloc(
            NodeKind::Assign(Assign {
                target: Some(target),
                eq: Some(eq),
                value: Some(sum),
            }),
            Span::DUMMY,
        )
        .unwrap();
    let read = tree.variable_named("x");

    let root = tree.block(Span::DUMMY);
    tree.push_child(root, assign).unwrap();
    tree.push_child(root, read).unwrap();
    tree.set_root(root);

    let printed = print(&tree, root);
    assert_eq!(printed, "x = 1 + 2\nx");

    let reparsed = parse_script(&printed).unwrap();
    let expected = Outcome {
        output: "3".to_string(),
        error: None,
    };
    assert_eq!(evaluate(&tree), expected);
    assert_eq!(evaluate(&reparsed), expected);
}

#[test]
fn comments_and_separators_survive() {
    let source = "# setup\nx = 1;y = 2 # two\n\n  x + y  ";
    check_round_trip(source, parse_script);
    check_canonical(source, parse_script);
}

#[test]
fn template_with_functions_and_delegates() {
    let source = "{{ func wrap }}<{{ $$ }}>{{ end }}{{wrap(1,2)}}|{{ name }}";
    check_round_trip(source, parse_template);
    check_canonical(source, parse_template);
}
