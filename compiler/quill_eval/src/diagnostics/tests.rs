use pretty_assertions::assert_eq;
use quill_ir::{Name, Span, StringInterner};

use super::{CallFrame, CallStack};
use crate::EvalErrorKind;

#[test]
fn push_respects_limit() {
    let mut stack = CallStack::new(Some(2));
    let frame = CallFrame {
        name: Name::EMPTY,
        call_span: None,
    };
    stack.push(frame.clone()).unwrap();
    stack.push(frame.clone()).unwrap();

    let err = stack.push(frame).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::RecursionLimitExceeded { limit: 2 });
    assert_eq!(stack.depth(), 2);
}

#[test]
fn capture_lists_most_recent_first() {
    let interner = StringInterner::new();
    let outer = interner.intern("outer");
    let inner = interner.intern("inner");

    let mut stack = CallStack::default();
    stack
        .push(CallFrame {
            name: outer,
            call_span: Some(Span::new(0, 5)),
        })
        .unwrap();
    stack
        .push(CallFrame {
            name: inner,
            call_span: None,
        })
        .unwrap();
    stack
        .push(CallFrame {
            name: Name::EMPTY,
            call_span: None,
        })
        .unwrap();

    let names: Vec<_> = stack
        .capture(&interner)
        .frames()
        .iter()
        .map(|frame| frame.name.clone())
        .collect();
    assert_eq!(names, vec!["<anonymous>", "inner", "outer"]);
}

#[test]
fn empty_stack_attaches_nothing() {
    let interner = StringInterner::new();
    let err = CallStack::default().attach_backtrace(crate::errors::division_by_zero(), &interner);
    assert!(err.backtrace.is_none());
}
