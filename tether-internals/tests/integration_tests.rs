//! Integration tests for the tether-internals crate.
//!
//! The suite exercises the record families through their public surface:
//!
//! ## Signature tests
//! - `test_signature_arities`: `invoke` across argument counts, including
//!   nullary and 8-argument shapes
//! - `test_reference_arguments`: signatures whose arguments are references
//!
//! ## Free record tests
//! - `test_function_binding_matches_direct_call`: dispatch equals a direct
//!   call for every argument shape used
//! - `test_closure_binding_shares_state`: exclusive closure bindings mutate
//!   the referent with no hidden copy
//! - `test_equality_matrix`: the identity-based equality rules across
//!   unbound/function/closure records
//! - `test_rebinding_replaces_record`: replacing a record leaves no trace of
//!   the previous binding
//!
//! ## Method record tests
//! - `test_method_record_roundtrip`: bind, query, dispatch against a
//!   receiver supplied per call
//! - `test_const_method_record_roundtrip`: the shared-receiver mirror
//! - `test_receiver_not_part_of_identity`: the same record dispatches
//!   against different receivers

use core::ptr::NonNull;

use tether_internals::{ConstMethodRecord, FreeRecord, MethodRecord};

fn nullary() -> &'static str {
    "nullary"
}

fn sum8(a: u32, b: u32, c: u32, d: u32, e: u32, f: u32, g: u32, h: u32) -> u32 {
    a + b + c + d + e + f + g + h
}

fn strlen(s: &str) -> usize {
    s.len()
}

fn square(x: i32) -> i32 {
    x * x
}

fn square_like(x: i32) -> i32 {
    x * x
}

struct Relay {
    forwarded: Vec<u32>,
}

impl Relay {
    fn forward(&mut self, value: u32) -> usize {
        self.forwarded.push(value);
        self.forwarded.len()
    }

    fn pending(&self) -> usize {
        self.forwarded.len()
    }
}

#[test]
fn test_signature_arities() {
    let record = FreeRecord::from_function(nullary as fn() -> &'static str);
    // SAFETY: Bound to a self-contained function pointer.
    assert_eq!(unsafe { record.dispatch(()) }, "nullary");

    let record = FreeRecord::from_function(
        sum8 as fn(u32, u32, u32, u32, u32, u32, u32, u32) -> u32,
    );
    // SAFETY: As above.
    assert_eq!(unsafe { record.dispatch((1, 2, 3, 4, 5, 6, 7, 8)) }, 36);
}

#[test]
fn test_reference_arguments() {
    // Reference arguments need their lifetime spelled out at the record's
    // type, so the signature is named inside a generic function.
    fn measure<'a>(text: &'a str) -> usize {
        let record = FreeRecord::from_function(strlen as fn(&'a str) -> usize);
        // SAFETY: Bound to a self-contained function pointer.
        unsafe { record.dispatch((text,)) }
    }

    let text = String::from("reference");
    assert_eq!(measure(&text), 9);
}

#[test]
fn test_function_binding_matches_direct_call() {
    let record = FreeRecord::from_function(square as fn(i32) -> i32);
    for x in -4..=4 {
        // SAFETY: Bound to a self-contained function pointer.
        assert_eq!(unsafe { record.dispatch((x,)) }, square(x));
    }
}

#[test]
fn test_closure_binding_shares_state() {
    let mut log = Vec::new();
    let mut push = |value: u32| {
        log.push(value);
        log.len()
    };
    // SAFETY: The referent outlives the record, was derived from an
    // exclusive reference, and is only accessed through the record until the
    // record is dropped.
    let record: FreeRecord<fn(u32) -> usize> =
        unsafe { FreeRecord::from_closure_mut(NonNull::from(&mut push)) };

    // SAFETY: Bound, live, and unaliased (no reentrant dispatch).
    assert_eq!(unsafe { record.dispatch((10,)) }, 1);
    // SAFETY: As above.
    assert_eq!(unsafe { record.dispatch((20,)) }, 2);
    drop(record);

    // Mutations happened in the referent itself, not in a hidden copy.
    assert_eq!(log, vec![10, 20]);
}

#[test]
fn test_equality_matrix() {
    let double = |x: i32| x * 2;
    let double_twin = |x: i32| x * 2;

    let unbound = FreeRecord::<fn(i32) -> i32>::unbound();
    let by_square = FreeRecord::from_function(square as fn(i32) -> i32);
    let by_square_again = FreeRecord::from_function(square as fn(i32) -> i32);
    let by_square_like = FreeRecord::from_function(square_like as fn(i32) -> i32);
    // SAFETY: The referents outlive the records.
    let by_double: FreeRecord<fn(i32) -> i32> =
        unsafe { FreeRecord::from_closure_ref(NonNull::from(&double)) };
    // SAFETY: As above.
    let by_double_twin: FreeRecord<fn(i32) -> i32> =
        unsafe { FreeRecord::from_closure_ref(NonNull::from(&double_twin)) };

    // Same function pointer: equal. Distinct functions with identical
    // behavior: unequal.
    assert_eq!(by_square, by_square_again);
    assert_ne!(by_square, by_square_like);

    // Distinct closure instances with identical state: unequal.
    assert_ne!(by_double, by_double_twin);

    // Cross-kind comparisons.
    assert_ne!(unbound, by_square);
    assert_ne!(unbound, by_double);
    assert_ne!(by_square, by_double);
}

#[test]
fn test_rebinding_replaces_record() {
    let mut record = FreeRecord::from_function(square as fn(i32) -> i32);
    let original = record;

    record = FreeRecord::from_function(square_like as fn(i32) -> i32);
    assert_ne!(record, original);
    // SAFETY: Bound to a self-contained function pointer.
    assert_eq!(unsafe { record.dispatch((3,)) }, 9);

    record = FreeRecord::unbound();
    assert!(!record.is_bound());
    assert_ne!(record, original);
}

#[test]
fn test_method_record_roundtrip() {
    let record = MethodRecord::from_method(Relay::forward as fn(&mut Relay, u32) -> usize);
    let mut relay = Relay {
        forwarded: Vec::new(),
    };

    let (method, stub) = record.get().expect("record is bound");
    assert_eq!(stub(method, &mut relay, (5,)), 1);
    assert_eq!(stub(method, &mut relay, (6,)), 2);
    assert_eq!(relay.forwarded, vec![5, 6]);
}

#[test]
fn test_const_method_record_roundtrip() {
    let record = ConstMethodRecord::from_method(Relay::pending as fn(&Relay) -> usize);
    let relay = Relay {
        forwarded: vec![1, 2, 3],
    };

    let (method, stub) = record.get().expect("record is bound");
    assert_eq!(stub(method, &relay, ()), 3);
}

#[test]
fn test_receiver_not_part_of_identity() {
    let record = MethodRecord::from_method(Relay::forward as fn(&mut Relay, u32) -> usize);
    let mut first = Relay {
        forwarded: Vec::new(),
    };
    let mut second = Relay {
        forwarded: Vec::new(),
    };

    let (method, stub) = record.get().expect("record is bound");
    stub(method, &mut first, (1,));
    stub(method, &mut second, (2,));
    stub(method, &mut second, (3,));

    assert_eq!(first.forwarded, vec![1]);
    assert_eq!(second.forwarded, vec![2, 3]);

    // The record itself never captured either receiver.
    let same = MethodRecord::from_method(Relay::forward as fn(&mut Relay, u32) -> usize);
    assert_eq!(record, same);
}
