// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small CSS selector subset.
//!
//! ## Grammar
//!
//! A selector is one or more compound selectors separated by whitespace (the
//! descendant combinator). A compound selector is any sequence of:
//!
//! - a tag name (`section`) or `*`, first in the compound only,
//! - `.class`,
//! - `#id`,
//! - `[attr]`, `[attr=value]`, `[attr^=value]`, `[attr*=value]`, `[attr$=value]`,
//!   where `value` is a bare identifier or a single/double quoted string.
//!
//! Prefix, suffix and substring matches against an empty value never match,
//! as in CSS. `[class...]` compares against the element's class list joined
//! with single spaces.
//!
//! ```
//! use vitrine_dom::Selector;
//!
//! let sel: Selector = r#".nav-link[href*="about"]"#.parse().unwrap();
//! assert_eq!(sel.to_string(), r#".nav-link[href*="about"]"#);
//! assert!(Selector::parse("a[href").is_err());
//! ```

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

/// Errors produced by [`Selector::parse`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// The input was empty or only whitespace.
    #[error("empty selector")]
    Empty,
    /// A character that cannot start or continue a selector.
    #[error("unexpected character {found:?} at offset {offset}")]
    Unexpected {
        /// The offending character.
        found: char,
        /// Byte offset into the input.
        offset: usize,
    },
    /// A name was required (after `.`, `#` or `[`) but none was found.
    #[error("expected a name at offset {offset}")]
    ExpectedName {
        /// Byte offset into the input.
        offset: usize,
    },
    /// A `[` or a quote was opened but never closed.
    #[error("unterminated attribute selector starting at offset {offset}")]
    UnterminatedAttribute {
        /// Byte offset of the opening `[`.
        offset: usize,
    },
}

/// How an attribute selector compares the attribute value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
    Contains(String),
    Suffix(String),
}

impl AttrOp {
    pub(crate) fn matches(&self, value: &str) -> bool {
        match self {
            Self::Exists => true,
            Self::Equals(v) => value == v,
            Self::Prefix(v) => !v.is_empty() && value.starts_with(v.as_str()),
            Self::Contains(v) => !v.is_empty() && value.contains(v.as_str()),
            Self::Suffix(v) => !v.is_empty() && value.ends_with(v.as_str()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AttrMatch {
    pub(crate) name: String,
    pub(crate) op: AttrOp,
}

/// One compound selector, e.g. `a.nav-link[href^="#"]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    pub(crate) tag: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<AttrMatch>,
}

/// A parsed selector.
///
/// Matching lives on [`Document`](crate::Document): see
/// [`Document::matches`](crate::Document::matches) and the `query_*` methods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    /// Compounds from outermost ancestor to subject.
    pub(crate) parts: Vec<Compound>,
    source: String,
}

impl Selector {
    /// Parse a selector.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut p = Parser { src: input, pos: 0 };
        let mut parts = Vec::new();
        p.skip_ws();
        while p.peek().is_some() {
            parts.push(p.compound()?);
            let had_ws = p.skip_ws();
            if !had_ws && let Some(found) = p.peek() {
                return Err(SelectorError::Unexpected {
                    found,
                    offset: p.pos,
                });
            }
        }
        if parts.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Self {
            parts,
            source: input.trim().to_string(),
        })
    }

    /// Build an `#id` selector without going through the parser.
    pub fn for_id(id: &str) -> Self {
        let mut source = String::from("#");
        source.push_str(id);
        Self {
            parts: alloc::vec![Compound {
                id: Some(id.to_string()),
                ..Compound::default()
            }],
            source,
        }
    }

    /// Narrow the subject compound with `[name*="value"]`, without going through the parser.
    ///
    /// `value` is taken verbatim, so any character is allowed. Quotes and
    /// backslashes are escaped in the selector text only.
    pub fn with_attr_contains(&self, name: &str, value: &str) -> Self {
        let mut out = self.clone();
        if let Some(subject) = out.parts.last_mut() {
            subject.attrs.push(AttrMatch {
                name: name.to_string(),
                op: AttrOp::Contains(value.to_string()),
            });
        }
        out.source.push('[');
        out.source.push_str(name);
        out.source.push_str("*=\"");
        for c in value.chars() {
            if c == '"' || c == '\\' {
                out.source.push('\\');
            }
            out.source.push(c);
        }
        out.source.push_str("\"]");
        out
    }

    /// The selector text, trimmed.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos != start
    }

    fn name(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(is_name_char) {
            self.bump();
        }
        if self.pos == start {
            return Err(SelectorError::ExpectedName { offset: start });
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let mut out = Compound::default();
        let mut empty = true;
        loop {
            match self.peek() {
                Some('*') if empty => {
                    self.bump();
                }
                Some(c) if empty && is_name_char(c) => {
                    out.tag = Some(self.name()?.to_ascii_lowercase());
                }
                Some('.') => {
                    self.bump();
                    out.classes.push(self.name()?);
                }
                Some('#') => {
                    self.bump();
                    out.id = Some(self.name()?);
                }
                Some('[') => out.attrs.push(self.attribute()?),
                Some(c) if empty => {
                    return Err(SelectorError::Unexpected {
                        found: c,
                        offset: self.pos,
                    });
                }
                _ => return Ok(out),
            }
            empty = false;
        }
    }

    fn attribute(&mut self) -> Result<AttrMatch, SelectorError> {
        let open = self.pos;
        let unterminated = SelectorError::UnterminatedAttribute { offset: open };
        self.bump();
        self.skip_ws();
        if self.peek().is_none() {
            return Err(unterminated);
        }
        let name = self.name()?.to_ascii_lowercase();
        self.skip_ws();
        let op: fn(String) -> AttrOp = match self.bump() {
            Some(']') => {
                return Ok(AttrMatch {
                    name,
                    op: AttrOp::Exists,
                });
            }
            Some('=') => AttrOp::Equals,
            Some(c @ ('^' | '*' | '$')) => {
                match self.bump() {
                    Some('=') => {}
                    Some(found) => {
                        return Err(SelectorError::Unexpected {
                            found,
                            offset: self.pos - found.len_utf8(),
                        });
                    }
                    None => return Err(unterminated),
                }
                match c {
                    '^' => AttrOp::Prefix,
                    '*' => AttrOp::Contains,
                    _ => AttrOp::Suffix,
                }
            }
            Some(found) => {
                return Err(SelectorError::Unexpected {
                    found,
                    offset: self.pos - found.len_utf8(),
                });
            }
            None => return Err(unterminated),
        };
        self.skip_ws();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let start = self.pos;
                let Some(len) = self.src[start..].find(quote) else {
                    return Err(unterminated);
                };
                self.pos = start + len + 1;
                self.src[start..start + len].to_string()
            }
            Some(_) => self.name()?,
            None => return Err(unterminated),
        };
        self.skip_ws();
        match self.bump() {
            Some(']') => Ok(AttrMatch {
                name,
                op: op(value),
            }),
            Some(found) => Err(SelectorError::Unexpected {
                found,
                offset: self.pos - found.len_utf8(),
            }),
            None => Err(unterminated),
        }
    }
}
