//! Parser for dotted property path strings.
//!
//! Accepts the canonical form produced by the renderer (`dog.loves[1][*].name`)
//! and the raw form used by the command line, where segment names may still be
//! getter method names (`getDog.getLoves[1]`).

use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};

use super::accessor::{Accessor, AccessorKind, IndexedAccessor};
use super::builder::Expression;
use super::error::ExpressionError;
use super::node::{is_name_char, Index, IntoIndex, Node};

/// One dotted segment: a name followed by zero or more subscripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub name: String,
    pub indices: Vec<Index>,
}

impl Segment {
    /// Turns the segment into an accessor of the given kind with its subscripts.
    pub fn into_selector(self, kind: AccessorKind) -> IndexedAccessor {
        IndexedAccessor {
            accessor: Accessor::new(kind, self.name),
            indices: self.indices,
        }
    }
}

/// Parser for property path strings.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given path string.
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Parses the path string into segments.
    pub fn parse(input: &str) -> Result<Vec<Segment>, ExpressionError> {
        Parser::new(input).parse_segments()
    }

    /// Parses a canonical path string into nodes, keeping names verbatim.
    pub fn parse_nodes(input: &str) -> Result<Vec<Node>, ExpressionError> {
        let segments = Parser::parse(input)?;
        let mut nodes = Vec::new();
        for segment in segments {
            nodes.push(Node::Field(segment.name));
            nodes.extend(segment.indices.into_iter().map(Node::Index));
        }
        Ok(nodes)
    }

    fn parse_segments(&mut self) -> Result<Vec<Segment>, ExpressionError> {
        let mut segments = vec![self.parse_segment()?];

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('.') => {
                    self.next();
                    segments.push(self.parse_segment()?);
                }
                Some(ch) => return Err(self.error(format!("unexpected '{}'", ch))),
            }
        }

        Ok(segments)
    }

    fn parse_segment(&mut self) -> Result<Segment, ExpressionError> {
        let name = self.parse_identifier()?;
        let mut indices = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() != Some('[') {
                break;
            }
            indices.push(self.parse_bracket_index()?);
        }
        Ok(Segment { name, indices })
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.next();
        }
    }

    fn error(&self, message: impl Into<String>) -> ExpressionError {
        ExpressionError::Parse {
            position: self.position,
            message: message.into(),
        }
    }

    /// Expects a specific character and advances, or returns an error.
    fn expect(&mut self, expected: char) -> Result<(), ExpressionError> {
        self.skip_whitespace();
        let pos = self.position;
        match self.next() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(ExpressionError::Parse {
                position: pos,
                message: format!("expected '{}', found '{}'", expected, ch),
            }),
            None => Err(ExpressionError::Parse {
                position: pos,
                message: format!("expected '{}', found end of input", expected),
            }),
        }
    }

    /// Parses a property name.
    fn parse_identifier(&mut self) -> Result<String, ExpressionError> {
        self.skip_whitespace();
        let start = self.position;
        while self.peek().is_some_and(is_name_char) {
            self.next();
        }
        if start == self.position {
            Err(self.error("expected property name"))
        } else {
            Ok(self.input[start..self.position].to_string())
        }
    }

    /// Parses `[n]` or `[*]`.
    fn parse_bracket_index(&mut self) -> Result<Index, ExpressionError> {
        self.expect('[')?;
        self.skip_whitespace();
        let start = self.position;
        while self.peek().is_some_and(|ch| ch != ']' && !ch.is_whitespace()) {
            self.next();
        }
        let token = &self.input[start..self.position];
        let index = token.into_index().map_err(|_| ExpressionError::Parse {
            position: start,
            message: format!("invalid index '{}'", token),
        })?;
        self.expect(']')?;
        Ok(index)
    }
}

impl<T> FromStr for Expression<T> {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::parse_nodes(s).map(Expression::from_nodes)
    }
}

impl<T> Serialize for Expression<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rendered = self.render().map_err(ser::Error::custom)?;
        serializer.serialize_str(&rendered)
    }
}

impl<'de, T> Deserialize<'de> for Expression<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
