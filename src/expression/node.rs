//! Node types that make up a property expression.

use std::fmt;

use super::error::ExpressionError;

/// The position selected by an index node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Index {
    /// A concrete element position (`[3]`).
    Position(usize),
    /// Every element of the collection (`[*]`).
    Wildcard,
}

impl Index {
    /// Text used for the wildcard inside brackets.
    pub const WILDCARD_TOKEN: &'static str = "*";

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Index::Wildcard)
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Index::Position(position) => write!(f, "{}", position),
            Index::Wildcard => f.write_str(Index::WILDCARD_TOKEN),
        }
    }
}

/// Conversion of subscript values into an [`Index`].
///
/// Implemented for unsigned and signed integers and for strings, so callers
/// can write `at(1)` as well as `at("*")`. Signed values below zero and
/// strings that are neither `*` nor a decimal literal are rejected.
pub trait IntoIndex {
    fn into_index(self) -> Result<Index, ExpressionError>;
}

impl IntoIndex for Index {
    fn into_index(self) -> Result<Index, ExpressionError> {
        Ok(self)
    }
}

macro_rules! impl_into_index_int {
    ($($ty:ty),*) => {
        $(
            impl IntoIndex for $ty {
                fn into_index(self) -> Result<Index, ExpressionError> {
                    // try_from fails for every negative value
                    usize::try_from(self)
                        .map(Index::Position)
                        .map_err(|_| ExpressionError::invalid_index(self))
                }
            }
        )*
    };
}

impl_into_index_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl IntoIndex for &str {
    fn into_index(self) -> Result<Index, ExpressionError> {
        if self == Index::WILDCARD_TOKEN {
            return Ok(Index::Wildcard);
        }
        if self.is_empty() || !self.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ExpressionError::invalid_index(self));
        }
        self.parse::<usize>()
            .map(Index::Position)
            .map_err(|_| ExpressionError::invalid_index(self))
    }
}

impl IntoIndex for String {
    fn into_index(self) -> Result<Index, ExpressionError> {
        self.as_str().into_index()
    }
}

impl IntoIndex for char {
    fn into_index(self) -> Result<Index, ExpressionError> {
        let mut buf = [0u8; 4];
        self.encode_utf8(&mut buf).into_index()
    }
}

/// Whether `ch` may appear in a property name.
///
/// Shared by the resolver and the parser so every rendered name parses back.
pub fn is_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// A single segment of a property expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// A named property (`dog`).
    Field(String),
    /// A collection subscript (`[1]`, `[*]`).
    Index(Index),
}

impl Node {
    /// Returns the property name for field nodes.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Node::Field(name) => Some(name.as_str()),
            Node::Index(_) => None,
        }
    }

    /// Returns the index for index nodes.
    pub fn index(&self) -> Option<Index> {
        match self {
            Node::Field(_) => None,
            Node::Index(index) => Some(*index),
        }
    }
}
