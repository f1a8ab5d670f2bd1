//! The reducer's runtime state: three stacks, with the getters/pushers the
//! reducer uses to inspect and rewrite them.
//!
//! `code`, `data` and `sink` are all `Vec<Value>` with the *top* at the end,
//! so `Vec::push`/`Vec::pop` is "push/pop the top" directly. Pushing a
//! sequence onto a stack needs its first element to end up on top (so that
//! catenation unfolds left-to-right); since the vector's top is its last
//! element, that means iterating the pushed sequence in reverse.

use crate::value::Value;

/// Three-stack configuration of the reducer: instructions pending execution
/// (`code`), values produced by reduction (`data`), and residual values that
/// could not reduce (`sink`).
#[derive(Debug, Default)]
pub struct Machine {
    pub(crate) code: Vec<Value>,
    pub(crate) data: Vec<Value>,
    pub(crate) sink: Vec<Value>,
}

impl Machine {
    /// Start a fresh machine with `initial` as the sole pending instruction.
    pub fn new(initial: Value) -> Self {
        Machine {
            code: vec![initial],
            data: Vec::new(),
            sink: Vec::new(),
        }
    }

    // -- code stack -----------------------------------------------------

    /// Peek the `i`-th item from the top of `code` without removing it.
    /// `None` if `i >= code.len()`.
    pub fn get_code(&self, i: usize) -> Option<&Value> {
        let len = self.code.len();
        if i >= len {
            None
        } else {
            self.code.get(len - 1 - i)
        }
    }

    /// Remove the top `n` items of `code`. No-op (returns nothing useful)
    /// beyond what `Vec::truncate` would already tolerate; callers only call
    /// this after confirming `n <= code.len()` via `get_code`.
    pub fn pop_code(&mut self, n: usize) {
        let new_len = self.code.len().saturating_sub(n);
        self.code.truncate(new_len);
    }

    pub fn push_code_one(&mut self, v: Value) {
        self.code.push(v);
    }

    /// Remove the top `n` items of `code` and return them, ordered top-first
    /// (index 0 of the result is what `get_code(0)` would have returned).
    /// `None` if `n > code.len()`.
    pub fn pop_code_n(&mut self, n: usize) -> Option<Vec<Value>> {
        if n > self.code.len() {
            return None;
        }
        let split_at = self.code.len() - n;
        let tail = self.code.split_off(split_at);
        Some(tail.into_iter().rev().collect())
    }

    /// Push a sequence of values so the *first* element ends up on top.
    pub fn push_code_seq(&mut self, values: impl DoubleEndedIterator<Item = Value>) {
        for v in values.rev() {
            self.code.push(v);
        }
    }

    pub fn code_len(&self) -> usize {
        self.code.len()
    }

    // -- data stack -------------------------------------------------------

    pub fn get_data(&self, i: usize) -> Option<&Value> {
        let len = self.data.len();
        if i >= len {
            None
        } else {
            self.data.get(len - 1 - i)
        }
    }

    pub fn pop_data(&mut self, n: usize) -> Option<Vec<Value>> {
        if n > self.data.len() {
            return None;
        }
        let split_at = self.data.len() - n;
        Some(self.data.split_off(split_at))
    }

    pub fn push_data(&mut self, v: Value) {
        self.data.push(v);
    }

    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    // -- sink ---------------------------------------------------------------

    /// Move everything currently in `data` into `sink`, in order, then
    /// clear `data`. Used by `thunk` before the offending code element is
    /// flushed too.
    pub fn drain_data_to_sink(&mut self) {
        self.sink.append(&mut self.data);
    }

    pub fn push_sink(&mut self, v: Value) {
        self.sink.push(v);
    }

    /// Consume the machine and build the residual program: `sink` (in
    /// order), then `data` (bottom-to-top), then `code` reversed (so the
    /// top of code becomes the last token printed).
    pub fn into_residual(self) -> Value {
        let Machine {
            code, data, sink, ..
        } = self;
        let mut parts = sink;
        parts.extend(data);
        parts.extend(code.into_iter().rev());
        crate::value::catenate(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn get_code_peeks_from_top() {
        let m = Machine::new(Value::constant("A"));
        assert_eq!(m.get_code(0), Some(&Value::constant("A")));
        assert_eq!(m.get_code(1), None);
    }

    #[test]
    fn push_code_seq_keeps_first_element_on_top() {
        let mut m = Machine::new(Value::constant("Z"));
        m.pop_code(1);
        m.push_code_seq(vec![Value::constant("A"), Value::constant("B")].into_iter());
        // A should be on top (get_code(0)), B underneath.
        assert_eq!(m.get_code(0), Some(&Value::constant("A")));
        assert_eq!(m.get_code(1), Some(&Value::constant("B")));
    }

    #[test]
    fn pop_data_returns_none_when_starved() {
        let mut m = Machine::new(Value::Id);
        assert_eq!(m.pop_data(1), None);
        m.push_data(Value::constant("X"));
        assert_eq!(m.pop_data(1), Some(vec![Value::constant("X")]));
    }

    #[test]
    fn residual_orders_sink_then_data_then_reversed_code() {
        let mut m = Machine::new(Value::Id);
        m.pop_code(1);
        m.push_sink(Value::Text("s".into()));
        m.push_data(Value::Text("d".into()));
        m.push_code_one(Value::Text("c1".into()));
        m.push_code_one(Value::Text("c2".into()));
        // code stack top-to-bottom is [c2, c1] (c2 pushed last => on top).
        let residual = m.into_residual();
        assert_eq!(residual.to_string(), "\"s\" \"d\" \"c1\" \"c2\"");
    }
}
