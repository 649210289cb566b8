use std::panic::{catch_unwind, AssertUnwindSafe};

use pretty_assertions::assert_eq;
use quill_ir::Name;
use quill_parse::parse_script;

use crate::{silent_handler, CallFrame, EvalMode, InterpreterBuilder, Mutability, Value};

fn frame() -> CallFrame {
    CallFrame {
        name: Name::EMPTY,
        call_span: None,
    }
}

#[test]
fn guard_pops_on_panic() {
    let tree = parse_script("1").unwrap();
    let mut interpreter = InterpreterBuilder::new(&tree).output(silent_handler()).build();

    let result = catch_unwind(AssertUnwindSafe(|| {
        let mut scoped = interpreter.call_scope(frame()).unwrap();
        let name = scoped.intern("x");
        scoped.env.define_local(name, Value::Int(1), Mutability::Mutable);
        panic!("unwinding through a call frame");
    }));

    assert!(result.is_err());
    assert_eq!(interpreter.env().depth(), 1);
    assert_eq!(interpreter.call_stack().depth(), 0);
    assert_eq!(interpreter.get_value("x"), Value::Null);
}

#[test]
fn call_scope_pushes_nothing_at_limit() {
    let tree = parse_script("1").unwrap();
    let mut interpreter = InterpreterBuilder::new(&tree)
        .mode(EvalMode::Strict { limit: 1 })
        .output(silent_handler())
        .build();

    let mut outer = interpreter.call_scope(frame()).unwrap();
    assert!(outer.call_scope(frame()).is_err());
    assert_eq!(outer.env().depth(), 2);
    assert_eq!(outer.call_stack().depth(), 1);
    drop(outer);

    assert_eq!(interpreter.env().depth(), 1);
    assert_eq!(interpreter.call_stack().depth(), 0);
}

#[test]
fn env_scope_closure_is_balanced() {
    let tree = parse_script("1").unwrap();
    let mut interpreter = InterpreterBuilder::new(&tree).output(silent_handler()).build();

    let depth = interpreter.with_env_scope(|scoped| {
        scoped.push_local();
        let inner = scoped.env().depth();
        assert!(scoped.pop_local());
        inner
    });

    assert_eq!(depth, 3);
    assert_eq!(interpreter.env().depth(), 1);
    assert!(!interpreter.pop_local());
}
