//! Black-box tests for the edges of the contract: gas exhaustion and
//! resumption, unreadable programs, unknown combinators, and the parser's
//! optional nesting ceiling.

use catterm::{evaluate, read_with_limit, Error, Limits};
use pretty_assertions::assert_eq;

#[test]
fn gas_exhaustion_leaves_an_unrun_residual() {
    let residual = evaluate("[a] Copy Copy Copy", None, 1).unwrap();
    assert_eq!(residual.to_string(), "[a] Copy Copy Copy");
}

#[test]
fn a_residual_can_be_resumed_with_fresh_gas() {
    let stalled = evaluate("[a] Copy", None, 1).unwrap();
    let done = evaluate(stalled, None, Limits::default().gas).unwrap();
    assert_eq!(done.to_string(), "[a] [a]");
}

#[test]
fn unreadable_program_is_an_error_not_a_residual() {
    let err = evaluate("[a b", None, Limits::default().gas).unwrap_err();
    assert!(matches!(err, Error::Unreadable { .. }));
}

#[test]
fn unknown_combinator_is_an_error_not_a_thunk() {
    let err = evaluate("Frobnicate", None, Limits::default().gas).unwrap_err();
    assert!(matches!(err, Error::Unknown(name) if name == "Frobnicate"));
}

#[test]
fn quote_depth_limit_rejects_only_when_configured() {
    let deeply_nested = "[[[[a]]]]";
    assert!(read_with_limit(deeply_nested, Some(3)).is_err());
    assert!(read_with_limit(deeply_nested, Some(4)).is_ok());
    assert!(read_with_limit(deeply_nested, None).is_ok());
}

#[test]
fn shift_without_an_enclosing_reset_is_inert() {
    let residual = evaluate("[h] Shift a b c", None, Limits::default().gas).unwrap();
    assert_eq!(residual.to_string(), "[h] Shift a b c");
}
