//! Resource limits an embedder can apply before calling [`evaluate`].
//!
//! [`evaluate`]: crate::evaluate

/// Every configurable ceiling the core exposes. All fields are optional;
/// `Limits::default()` reproduces the unbounded-by-default contract exactly.
///
/// # Example
///
/// ```
/// use catterm::Limits;
///
/// let limits = Limits {
///     gas: 10_000,
///     max_quote_depth: Some(64),
///     max_dictionary_entries: Some(256),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Step budget passed to `evaluate`.
    pub gas: u64,
    /// Ceiling on `[`-nesting depth, enforced by the parser. `None` is
    /// unbounded.
    pub max_quote_depth: Option<usize>,
    /// Ceiling on dictionary size. Not enforced by `evaluate` itself (which
    /// has no notion of "too many definitions") — an embedder applies this
    /// when it observes a `Define` effect, before it reaches the
    /// dictionary. `None` is unbounded.
    pub max_dictionary_entries: Option<usize>,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            gas: crate::reduce::DEFAULT_GAS,
            max_quote_depth: None,
            max_dictionary_entries: None,
        }
    }
}
