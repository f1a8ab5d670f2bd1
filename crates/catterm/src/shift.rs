//! Delimited control: capturing the slice of `code` between `Shift` and the
//! nearest enclosing `Reset` as a first-class [`Value::Quote`].
//!
//! Kept as its own module (rather than folded into `reduce`) because the
//! capture-in-reading-order contract is easy to get backwards and deserves
//! tests that don't have to thread through the rest of the dispatch match.

use crate::machine::Machine;
use crate::value::{catenate, Value};

/// Outcome of attempting to fire `Shift` against the current machine state.
pub enum ShiftOutcome {
    /// No enclosing `Reset`, or the data stack didn't hold a `[handler]`
    /// quote on top. Caller should thunk; nothing has been mutated.
    Fail,
    /// The capture fired: `code` has had the `Shift .. Reset` slice removed,
    /// `data` has the captured continuation pushed, and `code` has the
    /// handler's body pushed on top, ready to run.
    Fired,
}

/// Attempt to fire `Shift`. `machine.get_code(0)` must be the `Shift`
/// constant itself; this function does not check that.
pub fn try_shift(machine: &mut Machine) -> ShiftOutcome {
    // Scan from position 1 (the instruction right below Shift) upward for a
    // Constant named "Reset".
    let mut k = None;
    let mut i = 1;
    while let Some(v) = machine.get_code(i) {
        if matches!(v, Value::Constant(name) if name == "Reset") {
            k = Some(i);
            break;
        }
        i += 1;
    }
    let Some(k) = k else {
        return ShiftOutcome::Fail;
    };

    // The handler must already be sitting on data as a Quote; don't commit
    // any code mutation until we know this will succeed.
    let handler_is_quote = matches!(machine.get_data(0), Some(Value::Quote(_)));
    if !handler_is_quote {
        return ShiftOutcome::Fail;
    }

    // Pop the Shift .. Reset slice (k + 1 items) off code, top-first.
    let popped = machine
        .pop_code_n(k + 1)
        .expect("presence confirmed by the scan above");
    debug_assert!(matches!(popped[0], Value::Constant(ref n) if n == "Shift"));
    debug_assert!(matches!(popped[k], Value::Constant(ref n) if n == "Reset"));

    // popped[1..k] are the intervening instructions in reading order
    // already: popped[1] was closest to the top (executes first), so it is
    // the leftmost element of the captured program.
    let captured = catenate(popped[1..k].iter().cloned());
    let cont = captured.quoted();

    let handler = machine
        .pop_data(1)
        .expect("checked above")
        .into_iter()
        .next()
        .expect("len 1")
        .into_quote_body()
        .expect("checked above to be a Quote");

    machine.push_data(cont);
    machine.push_code_one(handler);
    ShiftOutcome::Fired
}
