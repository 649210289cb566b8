use super::*;

#[test]
fn test_span_basic() {
    let span = Span::new(10, 20);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
    assert!(span.contains(15));
    assert!(!span.contains(20));
}

#[test]
fn test_span_merge_ignores_dummy() {
    let a = Span::new(10, 20);
    assert_eq!(a.merge(Span::DUMMY), a);
    assert_eq!(Span::DUMMY.merge(a), a);
    assert_eq!(a.merge(Span::new(15, 30)), Span::new(10, 30));
}

#[test]
fn test_span_from_range_saturates() {
    let span = Span::from_range(3..usize::MAX);
    assert_eq!(span.start, 3);
    assert_eq!(span.end, u32::MAX);
}

#[test]
fn test_span_debug() {
    assert_eq!(format!("{:?}", Span::new(1, 4)), "1..4");
}
