//! Minimal CSS selector matching
//!
//! Covers the compound selectors the extractor is configured with:
//! `tag`, `tag.class`, `tag[attr]`, `tag[attr="v"]`, `tag[attr*="v"]` and
//! `tag[attr^="v"]`. Combinators are not supported. In the browser the same
//! selector strings go straight to `querySelector`; this parser only backs
//! documents that are not live DOM.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected '{ch}' at offset {pos}")]
    Unexpected { ch: char, pos: usize },

    #[error("unterminated attribute condition")]
    Unterminated,
}

/// Comparison applied to an attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrMatch {
    Exists,
    Equals(String),
    Contains(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrCondition {
    pub name: String,
    pub op: AttrMatch,
}

impl AttrCondition {
    fn accepts(&self, value: Option<&str>) -> bool {
        match (&self.op, value) {
            (_, None) => false,
            (AttrMatch::Exists, Some(_)) => true,
            (AttrMatch::Equals(expected), Some(v)) => v == expected,
            (AttrMatch::Contains(needle), Some(v)) => v.contains(needle.as_str()),
            (AttrMatch::Prefix(prefix), Some(v)) => v.starts_with(prefix.as_str()),
        }
    }
}

/// A single compound selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Lowercased tag name; `None` matches any element
    pub tag: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrCondition>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut cursor = Cursor { src: input, pos: 0 };
        let tag = match cursor.peek() {
            Some('*') => {
                cursor.bump();
                None
            }
            Some('.') | Some('[') => None,
            _ => Some(cursor.ident()?.to_ascii_lowercase()),
        };

        let mut classes = Vec::new();
        let mut attrs = Vec::new();

        while let Some(ch) = cursor.peek() {
            match ch {
                '.' => {
                    cursor.bump();
                    classes.push(cursor.ident()?.to_string());
                }
                '[' => {
                    cursor.bump();
                    attrs.push(cursor.attr_condition()?);
                }
                other => {
                    return Err(SelectorError::Unexpected { ch: other, pos: cursor.pos });
                }
            }
        }

        Ok(Self { tag, classes, attrs })
    }

    /// Test an element given its tag name and an attribute lookup
    pub fn matches<'a, F>(&self, tag: &str, attr: F) -> bool
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        if let Some(expected) = &self.tag {
            if !tag.eq_ignore_ascii_case(expected) {
                return false;
            }
        }

        if !self.classes.is_empty() {
            let class_list = attr("class").unwrap_or("");
            let has_all = self
                .classes
                .iter()
                .all(|class| class_list.split_whitespace().any(|c| c == class));
            if !has_all {
                return false;
            }
        }

        self.attrs.iter().all(|cond| cond.accepts(attr(&cond.name)))
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, wanted: char) -> Result<(), SelectorError> {
        match self.peek() {
            Some(ch) if ch == wanted => {
                self.bump();
                Ok(())
            }
            Some(ch) => Err(SelectorError::Unexpected { ch, pos: self.pos }),
            None => Err(SelectorError::Unterminated),
        }
    }

    fn ident(&mut self) -> Result<&'a str, SelectorError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            self.bump();
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(ch) => SelectorError::Unexpected { ch, pos: self.pos },
                None => SelectorError::Unterminated,
            });
        }
        Ok(&self.src[start..self.pos])
    }

    fn value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let start = self.pos;
                let len = self.src[start..]
                    .find(quote)
                    .ok_or(SelectorError::Unterminated)?;
                self.pos = start + len + quote.len_utf8();
                Ok(self.src[start..start + len].to_string())
            }
            _ => Ok(self.ident()?.to_string()),
        }
    }

    /// Everything after `[` up to and including `]`
    fn attr_condition(&mut self) -> Result<AttrCondition, SelectorError> {
        self.skip_whitespace();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let op = match self.peek() {
            Some(']') => AttrMatch::Exists,
            Some('=') => {
                self.bump();
                self.skip_whitespace();
                AttrMatch::Equals(self.value()?)
            }
            Some(modifier @ ('*' | '^')) => {
                self.bump();
                self.expect('=')?;
                self.skip_whitespace();
                let value = self.value()?;
                if modifier == '*' {
                    AttrMatch::Contains(value)
                } else {
                    AttrMatch::Prefix(value)
                }
            }
            Some(ch) => return Err(SelectorError::Unexpected { ch, pos: self.pos }),
            None => return Err(SelectorError::Unterminated),
        };

        self.skip_whitespace();
        self.expect(']')?;
        Ok(AttrCondition { name, op })
    }
}
