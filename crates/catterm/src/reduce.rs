//! The small-step rewriting loop.
//!
//! `evaluate` drives a [`Machine`] to a fixed point (or until gas runs out),
//! dispatching each primitive combinator in turn. Every precondition
//! failure — missing data, a missing dictionary entry, a value lacking an
//! expected facet, no enclosing `Reset` — is funneled through [`thunk`]
//! rather than propagated as an error; only an unrecognized `Constant` name
//! escapes as `Error::Unknown`.

use tracing::{debug, debug_span, trace};

use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::machine::Machine;
use crate::parse::read;
use crate::shift::{try_shift, ShiftOutcome};
use crate::value::Value;

/// Default step budget, matching the contract's own default.
pub const DEFAULT_GAS: u64 = 1_000_000;

/// Either raw source or an already-parsed term, accepted by [`evaluate`].
pub enum Initial {
    Text(String),
    Parsed(Value),
}

impl From<&str> for Initial {
    fn from(s: &str) -> Self {
        Initial::Text(s.to_string())
    }
}

impl From<String> for Initial {
    fn from(s: String) -> Self {
        Initial::Text(s)
    }
}

impl From<Value> for Initial {
    fn from(v: Value) -> Self {
        Initial::Parsed(v)
    }
}

/// Reduce `initial` against `dictionary` (if any) under `gas` steps,
/// returning the residual [`Value`].
///
/// Returns `Err` only for `Error::Unreadable` (if `initial` was text that
/// failed to parse) or `Error::Unknown` (a `Constant` naming no known
/// combinator). Every other unreducible configuration is reflected in the
/// returned residual rather than as an error.
pub fn evaluate(
    initial: impl Into<Initial>,
    mut dictionary: Option<&mut Dictionary>,
    gas: u64,
) -> Result<Value> {
    let initial = match initial.into() {
        Initial::Text(src) => read(&src)?,
        Initial::Parsed(v) => v,
    };

    let span = debug_span!("evaluate", gas);
    let _enter = span.enter();

    let mut machine = Machine::new(initial);
    let mut gas = gas;

    while machine.code_len() > 0 && gas > 0 {
        gas -= 1;
        let hand = machine
            .get_code(0)
            .cloned()
            .expect("code_len() > 0 checked above");
        trace!(kind = hand.kind(), gas, "dispatch");

        match hand {
            Value::Id => {
                machine.pop_code(1);
            }
            Value::Catenate(children) => {
                machine.pop_code(1);
                machine.push_code_seq(children.into_iter());
            }
            Value::Variable(name) => {
                let binding = dictionary.as_deref().and_then(|d| d.get(&name).cloned());
                match binding {
                    Some(binding) => {
                        machine.pop_code(1);
                        machine.push_code_one(binding);
                    }
                    None => {
                        debug!(name, "thunk: unresolved variable");
                        thunk(&mut machine);
                        gas = 0;
                    }
                }
            }
            Value::Quote(_) | Value::Text(_) => {
                machine.pop_code(1);
                machine.push_data(hand);
            }
            Value::Prompt(_) => {
                debug!("thunk: prompt reached");
                thunk(&mut machine);
                gas = 0;
            }
            Value::Constant(name) => {
                gas = dispatch_constant(&name, &mut machine, dictionary.as_deref_mut(), gas)?;
            }
        }
    }

    Ok(machine.into_residual())
}

/// Suspend: move everything in `data` into `sink`, then move the *current*
/// top of `code` into `sink` too. Preserves evaluation order in the
/// residual while refusing to invent values.
fn thunk(machine: &mut Machine) {
    machine.drain_data_to_sink();
    if let Some(top) = machine.pop_code_n(1) {
        for v in top {
            machine.push_sink(v);
        }
    }
}

/// Dispatch a `Constant`. Returns the (possibly zeroed) remaining gas, or
/// `Err(Error::Unknown)` if `name` is not one of the combinators below.
fn dispatch_constant(
    name: &str,
    machine: &mut Machine,
    mut dictionary: Option<&mut Dictionary>,
    gas: u64,
) -> Result<u64> {
    // `cont` suspensions keep running the rest of the program; `stop`
    // suspensions zero out gas. See SPEC_FULL.md §4.5's "on fail" column.
    macro_rules! thunk_cont {
        () => {{
            thunk(machine);
            return Ok(gas);
        }};
    }
    macro_rules! thunk_stop {
        () => {{
            thunk(machine);
            return Ok(0);
        }};
    }

    match name {
        "Copy" => match machine.get_data(0).cloned() {
            Some(a) => {
                machine.pop_code(1);
                machine.push_data(a.clone());
                machine.push_data(a);
            }
            None => thunk_cont!(),
        },
        "Drop" => match machine.pop_data(1) {
            Some(_) => {
                machine.pop_code(1);
            }
            None => thunk_cont!(),
        },
        "Swap" => match machine.pop_data(2) {
            Some(pair) => {
                let [a, b]: [Value; 2] = pair.try_into().expect("popped exactly 2");
                machine.pop_code(1);
                machine.push_data(b);
                machine.push_data(a);
            }
            None => thunk_cont!(),
        },
        "Cat" => {
            let fst = machine.get_data(1).and_then(Value::quote_body);
            let snd = machine.get_data(0).and_then(Value::quote_body);
            if fst.is_none() || snd.is_none() {
                thunk_cont!();
            }
            let popped = machine.pop_data(2).expect("presence checked above");
            let [a, b]: [Value; 2] = popped.try_into().expect("popped exactly 2");
            let a_body = a.into_quote_body().expect("checked above");
            let b_body = b.into_quote_body().expect("checked above");
            machine.pop_code(1);
            machine.push_data(crate::value::catenate([a_body, b_body]).quoted());
        }
        "Abs" => match machine.pop_data(1) {
            Some(popped) => {
                let a = popped.into_iter().next().expect("len 1");
                machine.pop_code(1);
                machine.push_data(a.quoted());
            }
            None => thunk_cont!(),
        },
        "App" => {
            let is_quote = matches!(machine.get_data(0), Some(Value::Quote(_)));
            if !is_quote {
                thunk_stop!();
            }
            let popped = machine.pop_data(1).expect("checked above");
            let body = popped
                .into_iter()
                .next()
                .expect("len 1")
                .into_quote_body()
                .expect("checked above");
            machine.pop_code(1);
            machine.push_code_one(body);
        }
        "Inl" | "Inr" => {
            // Selects a branch and leaves it quoted on `data`, behind the
            // carried value: `[l] [r] v -> v [l]` (or `[r]`). The branch is
            // not unwrapped here; an explicit `App` after `Inl`/`Inr` is
            // what runs it, same as for any other quote on the stack.
            let want_left = name == "Inl";
            let l_is_quote = matches!(machine.get_data(2), Some(Value::Quote(_)));
            let r_is_quote = matches!(machine.get_data(1), Some(Value::Quote(_)));
            let has_value = machine.get_data(0).is_some();
            if !l_is_quote || !r_is_quote || !has_value {
                thunk_stop!();
            }
            let popped = machine.pop_data(3).expect("presence checked above");
            let [l, r, v]: [Value; 3] = popped.try_into().expect("popped exactly 3");
            let branch = if want_left { l } else { r };
            machine.pop_code(1);
            machine.push_data(v);
            machine.push_data(branch);
        }
        "Pair" => match machine.pop_data(2) {
            Some(pair) => {
                let [a, b]: [Value; 2] = pair.try_into().expect("popped exactly 2");
                machine.pop_code(1);
                machine.push_data(crate::value::catenate([a, b]).quoted());
            }
            None => thunk_cont!(),
        },
        "Shift" => match try_shift(machine) {
            ShiftOutcome::Fired => {}
            ShiftOutcome::Fail => thunk_stop!(),
        },
        "Reset" => thunk_stop!(),
        "Define" => {
            let Some(dict) = dictionary.as_deref_mut() else {
                thunk_stop!();
            };
            let name_is_text = matches!(machine.get_data(0), Some(Value::Text(_)));
            let body_is_quote = matches!(machine.get_data(1), Some(Value::Quote(_)));
            if !name_is_text || !body_is_quote {
                thunk_stop!();
            }
            let popped = machine.pop_data(2).expect("presence checked above");
            let [body, key]: [Value; 2] = popped.try_into().expect("popped exactly 2");
            let body = body.into_quote_body().expect("checked above");
            let key = match key {
                Value::Text(s) => s,
                _ => unreachable!("checked above"),
            };
            dict.define(key, body);
            machine.pop_code(1);
        }
        "Delete" => {
            let Some(dict) = dictionary.as_deref_mut() else {
                thunk_stop!();
            };
            let key_is_text = matches!(machine.get_data(0), Some(Value::Text(_)));
            if !key_is_text {
                thunk_stop!();
            }
            let popped = machine.pop_data(1).expect("presence checked above");
            let key = match popped.into_iter().next().expect("len 1") {
                Value::Text(s) => s,
                _ => unreachable!("checked above"),
            };
            dict.delete(&key);
            machine.pop_code(1);
        }
        other => return Err(Error::Unknown(other.to_string())),
    }
    Ok(gas)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(src: &str) -> String {
        evaluate(src, None, DEFAULT_GAS).unwrap().to_string()
    }

    fn run_with_dict(src: &str, dict: &mut Dictionary) -> String {
        evaluate(src, Some(dict), DEFAULT_GAS).unwrap().to_string()
    }

    #[test]
    fn copy() {
        assert_eq!(run("[foo] Copy"), "[foo] [foo]");
    }

    #[test]
    fn drop_combinator() {
        assert_eq!(run("[foo] Drop"), "");
    }

    #[test]
    fn swap() {
        assert_eq!(run("[foo] [bar] Swap"), "[bar] [foo]");
    }

    #[test]
    fn cat() {
        assert_eq!(run("[foo] [bar] Cat"), "[foo bar]");
    }

    #[test]
    fn abs() {
        assert_eq!(run("[foo] Abs"), "[[foo]]");
    }

    #[test]
    fn app() {
        assert_eq!(run("[foo] App"), "foo");
    }

    #[test]
    fn inl_then_app() {
        assert_eq!(run("[inl] [inr] [value] Inl App"), "[value] inl");
    }

    #[test]
    fn inr_then_app() {
        assert_eq!(run("[inl] [inr] [value] Inr App"), "[value] inr");
    }

    #[test]
    fn pair_then_app() {
        assert_eq!(run("[fst] [snd] Pair App"), "[fst] [snd]");
    }

    #[test]
    fn swap_on_text() {
        assert_eq!(run("\"Hello\" \"world\" Swap"), "\"world\" \"Hello\"");
    }

    #[test]
    fn prompt_passes_through() {
        assert_eq!(run("{ Hello, world. }"), "{ Hello, world. }");
    }

    #[test]
    fn shift_reset() {
        assert_eq!(
            run("[handler] Shift body0 body1 body2 Reset"),
            "[body0 body1 body2] handler"
        );
    }

    #[test]
    fn copy_with_empty_data_is_full_passthrough() {
        assert_eq!(run("Copy"), "Copy");
    }

    #[test]
    fn shift_without_reset_is_full_passthrough() {
        assert_eq!(run("[h] Shift a b c"), "[h] Shift a b c");
    }

    #[test]
    fn unresolved_variable_thunks() {
        assert_eq!(run("foo"), "foo");
        assert_eq!(run("[x] foo Copy"), "[x] foo Copy");
    }

    #[test]
    fn define_then_use() {
        let mut dict = Dictionary::new();
        run_with_dict("[Copy] \"twice\" Define", &mut dict);
        assert_eq!(dict.get("twice"), Some(&Value::constant("Copy")));
        assert_eq!(run_with_dict("[a] twice", &mut dict), "[a] [a]");
    }

    #[test]
    fn delete_removes_binding() {
        let mut dict = Dictionary::new();
        dict.define("foo", Value::constant("Copy"));
        run_with_dict("\"foo\" Delete", &mut dict);
        assert_eq!(dict.get("foo"), None);
    }

    #[test]
    fn define_without_dictionary_thunks() {
        assert_eq!(run("[Copy] \"twice\" Define"), "[Copy] \"twice\" Define");
    }

    #[test]
    fn unknown_combinator_is_hard_error() {
        let err = evaluate("Bogus", None, DEFAULT_GAS).unwrap_err();
        assert!(matches!(err, Error::Unknown(name) if name == "Bogus"));
    }

    #[test]
    fn gas_exhaustion_leaves_unrun_suffix() {
        // Each Copy doubles the top; with only 1 unit of gas we dispatch
        // exactly one step then stop, independent of how much work remains.
        let residual = evaluate("[a] Copy Copy Copy", None, 1).unwrap();
        // One step unfolds the top-level Catenate; nothing else runs.
        assert_eq!(residual.to_string(), "[a] Copy Copy Copy");
    }

    #[test]
    fn gas_boundedness_recovers_with_more_gas() {
        let mid = evaluate("[a] Copy", None, 1).unwrap();
        let done = evaluate(mid, None, DEFAULT_GAS).unwrap();
        assert_eq!(done.to_string(), "[a] [a]");
    }

    #[test]
    fn empty_program_is_id() {
        assert_eq!(evaluate("", None, DEFAULT_GAS).unwrap(), Value::Id);
        assert_eq!(run(""), "");
    }

    #[test]
    fn define_side_effects_are_in_source_order() {
        let mut dict = Dictionary::new();
        run_with_dict(
            "[Copy] \"a\" Define [Drop] \"b\" Define [Swap] \"a\" Define",
            &mut dict,
        );
        // The third Define should have won, matching source order.
        assert_eq!(dict.get("a"), Some(&Value::constant("Swap")));
        assert_eq!(dict.get("b"), Some(&Value::constant("Drop")));
    }
}
