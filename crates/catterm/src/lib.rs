//! catterm - a rewriting interpreter for a small concatenative combinator
//! language.
//!
//! A program is a sequence of combinators and literals operating on two
//! stacks: `code` (what's left to run) and `data` (what's been produced).
//! Evaluation is small-step and gas-bounded: anything that can't make
//! progress (missing arguments, an unresolved name, a bare `{prompt}`) is
//! suspended into a third stack, `sink`, rather than causing a panic or an
//! error. The result of evaluating a program is always another program —
//! either fully reduced, or a residual capturing exactly how far it got.
//!
//! # Quick start
//!
//! ```
//! use catterm::evaluate;
//!
//! let residual = evaluate("[foo] Copy", None, catterm::DEFAULT_GAS).unwrap();
//! assert_eq!(residual.to_string(), "[foo] [foo]");
//! ```
//!
//! `Define`/`Delete` mutate a [`Dictionary`] that the caller owns and passes
//! in; there is no implicit global namespace, so a server embedding this
//! crate gives each client its own:
//!
//! ```
//! use catterm::{evaluate, Dictionary};
//!
//! let mut dict = Dictionary::new();
//! evaluate("[Copy] \"twice\" Define", Some(&mut dict), catterm::DEFAULT_GAS).unwrap();
//! let residual = evaluate("[a] twice", Some(&mut dict), catterm::DEFAULT_GAS).unwrap();
//! assert_eq!(residual.to_string(), "[a] [a]");
//! ```
//!
//! # What's not here
//!
//! There is no type checker, no garbage collection of dictionary entries,
//! and no guarantee that any given program terminates — only that it stops
//! trying after its gas runs out. See `SPEC_FULL.md` in the repository root
//! for the full contract this crate implements.

mod dictionary;
mod error;
mod limits;
mod machine;
mod parse;
mod reduce;
mod shift;
mod value;

pub use dictionary::Dictionary;
pub use error::{Error, Result};
pub use limits::Limits;
pub use parse::{read, read_with_limit};
pub use reduce::{evaluate, Initial, DEFAULT_GAS};
pub use value::{catenate, Value};
