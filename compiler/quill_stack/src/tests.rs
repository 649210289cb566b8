use super::*;

/// Depth of a right-leaning chain of nested boxes.
enum Nest {
    Leaf,
    Inner(Box<Nest>),
}

fn depth(node: &Nest) -> usize {
    ensure_sufficient_stack(|| match node {
        Nest::Leaf => 0,
        Nest::Inner(inner) => depth(inner) + 1,
    })
}

fn build(levels: usize) -> Nest {
    let mut node = Nest::Leaf;
    for _ in 0..levels {
        node = Nest::Inner(Box::new(node));
    }
    node
}

/// Iterative drop so the test does not overflow while tearing down.
fn dismantle(mut node: Nest) {
    while let Nest::Inner(inner) = node {
        node = *inner;
    }
}

#[test]
fn test_shallow_nesting() {
    let nest = build(10);
    assert_eq!(depth(&nest), 10);
    dismantle(nest);
}

#[test]
fn test_deep_nesting_grows_stack() {
    let nest = build(200_000);
    assert_eq!(depth(&nest), 200_000);
    dismantle(nest);
}

#[test]
fn test_passes_result_through() {
    let result: Result<u8, String> = ensure_sufficient_stack(|| Err("boom".to_string()));
    assert_eq!(result, Err("boom".to_string()));
}
