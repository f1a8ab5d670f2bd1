//! The per-client keyed mapping mutated by `Define`/`Delete`.
//!
//! One `Dictionary` belongs to exactly one machine/session; the core places
//! no mutex around it and imposes no eviction policy or size bound (see
//! SPEC_FULL.md §4.7, §9). An embedder wanting bounded memory growth under
//! adversarial `Define` streams enforces that externally.

use std::collections::HashMap;

use crate::value::Value;

/// A keyed mapping from `Variable` name to an owned [`Value`] body.
#[derive(Debug, Default, Clone)]
pub struct Dictionary {
    entries: HashMap<String, Value>,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn define(&mut self, name: impl Into<String>, body: Value) {
        let name = name.into();
        tracing::debug!(target: "catterm::dictionary", name = %name, "define");
        self.entries.insert(name, body);
    }

    pub fn delete(&mut self, name: &str) {
        tracing::debug!(target: "catterm::dictionary", name, "delete");
        self.entries.remove(name);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
