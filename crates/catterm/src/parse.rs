//! Lifting a flat character stream into a [`Value`] tree.
//!
//! The parser is a single linear scan with a build stack: a running `build`
//! list holds the siblings seen so far at the current nesting level, and a
//! stack of saved lists unwinds as `]` closes each `[`. There is no lookahead
//! beyond the single delimiter character that ends a token.

use crate::error::{Error, Result};
use crate::value::{catenate, Value};

/// Parse `src` into a [`Value`].
///
/// Returns `Err(Error::Unreadable)` on any lexical or bracket-balancing
/// problem; the error carries the offending source and a human-readable
/// reason naming the unbalanced delimiter.
pub fn read(src: &str) -> Result<Value> {
    Parser::new(src).run()
}

/// Optional ceiling on `[`-nesting depth, consulted by [`read_with_limit`].
///
/// `None` reproduces the unbounded original contract.
pub fn read_with_limit(src: &str, max_quote_depth: Option<usize>) -> Result<Value> {
    Parser::new(src).with_limit(max_quote_depth).run()
}

struct Parser<'a> {
    src: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    build: Vec<Value>,
    saved: Vec<Vec<Value>>,
    max_quote_depth: Option<usize>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Parser {
            src,
            chars: src.char_indices().peekable(),
            build: Vec::new(),
            saved: Vec::new(),
            max_quote_depth: None,
        }
    }

    fn with_limit(mut self, max_quote_depth: Option<usize>) -> Self {
        self.max_quote_depth = max_quote_depth;
        self
    }

    fn fail(&self, reason: impl Into<String>) -> Error {
        Error::unreadable(self.src.to_string(), reason.into())
    }

    fn run(mut self) -> Result<Value> {
        while let Some(&(start, ch)) = self.chars.peek() {
            match ch {
                c if c.is_whitespace() => {
                    self.chars.next();
                }
                '[' => {
                    self.chars.next();
                    if let Some(limit) = self.max_quote_depth {
                        if self.saved.len() + 1 > limit {
                            return Err(self.fail("Quote nesting too deep"));
                        }
                    }
                    self.saved.push(std::mem::take(&mut self.build));
                }
                ']' => {
                    self.chars.next();
                    let parent = self
                        .saved
                        .pop()
                        .ok_or_else(|| self.fail("Unbalanced brackets"))?;
                    let body = catenate(std::mem::take(&mut self.build));
                    self.build = parent;
                    self.build.push(body.quoted());
                }
                '"' => {
                    self.chars.next();
                    let text = self.take_until('"', "Unbalanced quotes")?;
                    self.build.push(Value::Text(text));
                }
                '{' => {
                    self.chars.next();
                    let text = self.take_until('}', "Unbalanced braces")?;
                    self.build.push(Value::Prompt(text));
                }
                _ => {
                    let token = self.take_token(start);
                    self.build.push(classify(&token, &self)?);
                }
            }
        }
        if !self.saved.is_empty() {
            return Err(self.fail("Unbalanced brackets"));
        }
        Ok(catenate(self.build))
    }

    /// Consume characters up to (and including) `closer`, returning the
    /// text between the opening delimiter (already consumed) and `closer`.
    fn take_until(&mut self, closer: char, unbalanced_reason: &str) -> Result<String> {
        let mut out = String::new();
        loop {
            match self.chars.next() {
                Some((_, c)) if c == closer => return Ok(out),
                Some((_, c)) => out.push(c),
                None => return Err(self.fail(unbalanced_reason)),
            }
        }
    }

    /// Consume a bare token: everything up to the next whitespace, bracket,
    /// quote or brace.
    fn take_token(&mut self, start: usize) -> String {
        let mut end = start;
        while let Some(&(idx, c)) = self.chars.peek() {
            if c.is_whitespace() || matches!(c, '[' | ']' | '"' | '{' | '}') {
                break;
            }
            end = idx + c.len_utf8();
            self.chars.next();
        }
        self.src[start..end].to_string()
    }
}

fn classify(token: &str, parser: &Parser<'_>) -> Result<Value> {
    let mut chars = token.chars();
    let first = chars.next().expect("take_token never returns empty");
    if first.is_ascii_uppercase() && token.chars().all(is_ident_char) {
        Ok(Value::Constant(token.to_string()))
    } else if first.is_ascii_lowercase() && token.chars().all(is_ident_char) {
        Ok(Value::Variable(token.to_string()))
    } else {
        Err(parser.fail(format!("Unknown symbol: {token}")))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_id() {
        assert_eq!(read("").unwrap(), Value::Id);
        assert_eq!(read("   ").unwrap(), Value::Id);
    }

    #[test]
    fn bracket_of_nothing_renders_brackets() {
        assert_eq!(read("[]").unwrap().to_string(), "[]");
    }

    #[test]
    fn constant_and_variable() {
        assert_eq!(read("Copy").unwrap(), Value::Constant("Copy".into()));
        assert_eq!(read("foo").unwrap(), Value::Variable("foo".into()));
    }

    #[test]
    fn identifiers_allow_digits_underscore_dash() {
        assert_eq!(read("foo-bar_2").unwrap(), Value::Variable("foo-bar_2".into()));
        assert_eq!(read("Foo-Bar_2").unwrap(), Value::Constant("Foo-Bar_2".into()));
    }

    #[test]
    fn nested_quotes() {
        let v = read("[[a] b]").unwrap();
        assert_eq!(v.to_string(), "[[a] b]");
    }

    #[test]
    fn text_and_prompt_are_opaque() {
        assert_eq!(read("\"hi there\"").unwrap(), Value::Text("hi there".into()));
        assert_eq!(
            read("{ Hello, world. }").unwrap(),
            Value::Prompt(" Hello, world. ".into())
        );
    }

    #[test]
    fn unbalanced_bracket_is_unreadable() {
        let err = read("[a b").unwrap_err();
        match err {
            Error::Unreadable { reason, .. } => assert_eq!(reason, "Unbalanced brackets"),
            _ => panic!("expected Unreadable"),
        }
    }

    #[test]
    fn stray_close_bracket_is_unreadable() {
        let err = read("a]").unwrap_err();
        match err {
            Error::Unreadable { reason, .. } => assert_eq!(reason, "Unbalanced brackets"),
            _ => panic!("expected Unreadable"),
        }
    }

    #[test]
    fn unbalanced_quote_is_unreadable() {
        let err = read("\"abc").unwrap_err();
        match err {
            Error::Unreadable { reason, .. } => assert_eq!(reason, "Unbalanced quotes"),
            _ => panic!("expected Unreadable"),
        }
    }

    #[test]
    fn unbalanced_brace_is_unreadable() {
        let err = read("{abc").unwrap_err();
        match err {
            Error::Unreadable { reason, .. } => assert_eq!(reason, "Unbalanced braces"),
            _ => panic!("expected Unreadable"),
        }
    }

    #[test]
    fn unknown_symbol_is_unreadable() {
        let err = read("123abc").unwrap_err();
        match err {
            Error::Unreadable { reason, .. } => assert!(reason.starts_with("Unknown symbol")),
            _ => panic!("expected Unreadable"),
        }
    }

    #[test]
    fn round_trip_is_a_fixed_point() {
        let programs = [
            "[foo] Copy",
            "[a b] [c] Cat",
            "\"hi\" {there}",
            "[[nested] [pair]] App",
        ];
        for p in programs {
            let once = read(p).unwrap();
            let printed = once.to_string();
            let twice = read(&printed).unwrap();
            assert_eq!(once, twice, "round trip mismatch for {p:?}");
        }
    }

    #[test]
    fn quote_depth_limit_rejects_deep_nesting() {
        let src = "[[[a]]]";
        assert!(read_with_limit(src, Some(2)).is_err());
        assert!(read_with_limit(src, Some(3)).is_ok());
        assert!(read_with_limit(src, None).is_ok());
    }
}
