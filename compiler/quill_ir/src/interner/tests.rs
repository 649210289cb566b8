use super::*;

#[test]
fn test_intern_deduplicates() {
    let interner = StringInterner::new();
    let a = interner.intern("total");
    let b = interner.intern("total");
    let c = interner.intern("count");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.lookup(a), "total");
    assert_eq!(interner.lookup(c), "count");
}

#[test]
fn test_empty_is_preinterned() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn test_reserved_names_are_stable() {
    let interner = StringInterner::new();
    let before = interner.len();
    assert_eq!(interner.lookup(interner.arguments()), "arguments");
    assert_eq!(interner.lookup(interner.delegate_block()), "$$");
    assert_eq!(interner.len(), before);
}

#[test]
fn test_unknown_name_resolves_to_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(9_999)), "");
}

#[test]
fn test_shared_interner_shares_table() {
    let shared = SharedInterner::new();
    let clone = shared.clone();
    let name = shared.intern("x");
    assert_eq!(clone.intern("x"), name);
    assert_eq!(clone.lookup(name), "x");
}

#[test]
fn test_global_interner_is_one_table() {
    let a = SharedInterner::global();
    let b = SharedInterner::global();
    assert!(SharedInterner::ptr_eq(&a, &b));
    assert!(!SharedInterner::ptr_eq(&a, &SharedInterner::new()));
    assert_eq!(a.intern(""), Name::EMPTY);

    let name = a.intern("global_only");
    assert_eq!(b.intern("global_only"), name);
    assert_eq!(b.lookup(name), "global_only");
}
