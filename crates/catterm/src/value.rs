//! The term representation.
//!
//! A [`Value`] is the only shape the reducer ever inspects. The set of
//! variants is closed and every smart constructor keeps the tree in a
//! canonical, flat form so the reducer never has to re-normalize as it goes.

use std::fmt;

/// A term in the combinator language.
///
/// `Value` is immutable once built: reduction consumes a tree and produces a
/// new one rather than mutating in place. Cloning is cheap enough at
/// command-channel program sizes that we use owned `String`/`Vec` storage
/// throughout instead of interning or reference counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// The empty program. Identity under catenation.
    Id,
    /// A primitive combinator, e.g. `Copy`, `Swap`, `Define`.
    Constant(String),
    /// A name resolved through the dictionary at reduction time.
    Variable(String),
    /// Sequential composition of two or more values, none of which is
    /// `Id` or itself a `Catenate`. Build this only through [`catenate`].
    Catenate(Vec<Value>),
    /// A deferred program: a first-class datum, unwrapped by `App`.
    Quote(Box<Value>),
    /// An opaque string literal.
    Text(String),
    /// An opaque natural-language message. Never reduced; always thunked.
    Prompt(String),
}

impl Value {
    /// Build a `Constant` from a static name.
    pub fn constant(name: impl Into<String>) -> Self {
        Value::Constant(name.into())
    }

    /// Build a `Variable` from a static name.
    pub fn variable(name: impl Into<String>) -> Self {
        Value::Variable(name.into())
    }

    /// Wrap `self` in a `Quote`.
    pub fn quoted(self) -> Self {
        Value::Quote(Box::new(self))
    }

    /// True for `Value::Id`.
    pub fn is_id(&self) -> bool {
        matches!(self, Value::Id)
    }

    /// The unwrapped body of a `Quote`, or `None` for every other variant.
    ///
    /// This stands in for the source's accessor-raises-on-mismatch idiom:
    /// callers that need a hard error construct one themselves from `None`,
    /// the reducer instead treats `None` as a cue to thunk.
    pub fn quote_body(&self) -> Option<&Value> {
        match self {
            Value::Quote(body) => Some(body),
            _ => None,
        }
    }

    pub fn into_quote_body(self) -> Option<Value> {
        match self {
            Value::Quote(body) => Some(*body),
            _ => None,
        }
    }

    /// The payload of a `Prompt`, or `None` otherwise. Used by collaborators
    /// that watch the residual for an out-of-band terminator (see
    /// `catterm-worker`'s `{Quit}` handling) without reaching into the enum.
    pub fn as_prompt(&self) -> Option<&str> {
        match self {
            Value::Prompt(s) => Some(s),
            _ => None,
        }
    }

    /// The name of a `Constant` or `Variable`, or `None` otherwise.
    pub fn name(&self) -> Option<&str> {
        match self {
            Value::Constant(n) | Value::Variable(n) => Some(n),
            _ => None,
        }
    }

    /// Render `self` back into source syntax. Equivalent to `to_string()`
    /// (both go through the `Display` impl below); provided for callers that
    /// want the printer without pulling in `std::fmt`.
    pub fn to_source(&self) -> String {
        self.to_string()
    }

    /// A short tag identifying the variant, used for `tracing` events where
    /// printing the full (potentially large) value would be wasteful.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Id => "Id",
            Value::Constant(_) => "Constant",
            Value::Variable(_) => "Variable",
            Value::Catenate(_) => "Catenate",
            Value::Quote(_) => "Quote",
            Value::Text(_) => "Text",
            Value::Prompt(_) => "Prompt",
        }
    }
}

/// Build a `Catenate` from a sequence of values, maintaining the flatness
/// invariant: children of any `Catenate` argument are spliced in, and every
/// `Id` argument is dropped. Zero surviving elements collapses to `Id`; one
/// surviving element is returned directly instead of being wrapped.
pub fn catenate(values: impl IntoIterator<Item = Value>) -> Value {
    let mut flat = Vec::new();
    for v in values {
        match v {
            Value::Id => {}
            Value::Catenate(children) => flat.extend(children),
            other => flat.push(other),
        }
    }
    match flat.len() {
        0 => Value::Id,
        1 => flat.into_iter().next().expect("len checked above"),
        _ => Value::Catenate(flat),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Id => Ok(()),
            Value::Constant(name) | Value::Variable(name) => write!(f, "{name}"),
            Value::Catenate(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{child}")?;
                }
                Ok(())
            }
            Value::Quote(body) => write!(f, "[{body}]"),
            Value::Text(s) => write!(f, "\"{s}\""),
            Value::Prompt(s) => write!(f, "{{{s}}}"),
        }
    }
}
