//! Symbolic property accessors and their resolution to property names.
//!
//! An [`Accessor`] stands in for a field or method reference on a model type.
//! Rust has no runtime reflection, so the raw identifier is supplied by the
//! caller: as a string literal, through a name hook, or through the
//! [`field!`](crate::field) and [`method!`](crate::method) macros, which also
//! check at compile time that the member exists.

use std::borrow::Cow;

use tracing::trace;

use super::error::ExpressionError;
use super::node::{is_name_char, Index, IntoIndex};

/// How the raw identifier of an accessor is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    /// A data member, used as-is.
    Field,
    /// A method, normalized when it follows the getter convention.
    Method,
}

/// Options controlling accessor resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolverOptions {
    /// Also treat `isX` methods as getters for `x`.
    pub boolean_getters: bool,
}

/// A symbolic reference to a property of a model type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Accessor {
    kind: AccessorKind,
    raw: Cow<'static, str>,
}

impl Accessor {
    /// Creates an accessor for a data member.
    pub const fn field(name: &'static str) -> Self {
        Self {
            kind: AccessorKind::Field,
            raw: Cow::Borrowed(name),
        }
    }

    /// Creates an accessor for a method.
    pub const fn method(name: &'static str) -> Self {
        Self {
            kind: AccessorKind::Method,
            raw: Cow::Borrowed(name),
        }
    }

    /// Creates an accessor from an owned identifier.
    pub fn new(kind: AccessorKind, raw: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            raw: raw.into(),
        }
    }

    /// Creates an accessor whose identifier is produced by a caller hook,
    /// typically backed by whatever metadata the host model exposes.
    pub fn from_hook<F>(kind: AccessorKind, hook: F) -> Self
    where
        F: FnOnce() -> String,
    {
        Self::new(kind, hook())
    }

    pub fn kind(&self) -> AccessorKind {
        self.kind
    }

    /// The identifier exactly as supplied.
    pub fn raw_name(&self) -> &str {
        &self.raw
    }

    /// Resolves the property name using the default options.
    pub fn resolve(&self) -> Result<String, ExpressionError> {
        self.resolve_with(ResolverOptions::default())
    }

    /// Resolves the property name using the given options.
    pub fn resolve_with(&self, options: ResolverOptions) -> Result<String, ExpressionError> {
        resolve_name(self.kind, &self.raw, options)
    }

    /// Applies a subscript directly to this accessor.
    ///
    /// `accessor.at(1)?.at("*")?` selects the same property as appending the
    /// accessor and then both indices one after another.
    pub fn at(self, index: impl IntoIndex) -> Result<IndexedAccessor, ExpressionError> {
        IndexedAccessor::from(self).at(index)
    }
}

/// An accessor with subscripts applied before it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexedAccessor {
    pub(crate) accessor: Accessor,
    pub(crate) indices: Vec<Index>,
}

impl IndexedAccessor {
    /// Adds one more subscript.
    pub fn at(mut self, index: impl IntoIndex) -> Result<Self, ExpressionError> {
        self.indices.push(index.into_index()?);
        Ok(self)
    }

    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    pub fn indices(&self) -> &[Index] {
        &self.indices
    }
}

impl From<Accessor> for IndexedAccessor {
    fn from(accessor: Accessor) -> Self {
        Self {
            accessor,
            indices: Vec::new(),
        }
    }
}

/// Maps a raw identifier to the canonical property name.
///
/// The identifier may only contain letters, digits, `_` and `$`.
/// Fields keep their identifier. Methods named `getX...` become `x...`, and
/// with `boolean_getters` enabled `isX...` becomes `x...` too. Any other
/// method name passes through unchanged.
pub fn resolve_name(
    kind: AccessorKind,
    raw: &str,
    options: ResolverOptions,
) -> Result<String, ExpressionError> {
    if raw.is_empty() {
        return Err(ExpressionError::unresolvable(raw, "identifier is empty"));
    }
    if let Some(ch) = raw.chars().find(|ch| !is_name_char(*ch)) {
        return Err(ExpressionError::unresolvable(
            raw,
            &format!("identifier contains '{}'", ch),
        ));
    }

    let name = match kind {
        AccessorKind::Field => raw.to_string(),
        AccessorKind::Method => {
            let stripped = strip_getter_prefix(raw, "get").or_else(|| {
                options
                    .boolean_getters
                    .then(|| strip_getter_prefix(raw, "is"))
                    .flatten()
            });
            match stripped {
                Some(suffix) => decapitalize(suffix),
                None => raw.to_string(),
            }
        }
    };

    // lowercasing can yield combining marks, e.g. 'İ' -> "i\u{307}"
    if !name.chars().all(is_name_char) {
        return Err(ExpressionError::unresolvable(
            raw,
            "normalized name is not an identifier",
        ));
    }

    trace!(raw, name = %name, ?kind, "resolved accessor");
    Ok(name)
}

/// Returns the part after `prefix` when it starts with an uppercase letter.
fn strip_getter_prefix<'a>(raw: &'a str, prefix: &str) -> Option<&'a str> {
    raw.strip_prefix(prefix)
        .filter(|rest| rest.chars().next().is_some_and(char::is_uppercase))
}

fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Creates a field [`Accessor`] after checking that the field exists.
///
/// ```
/// use propath::field;
///
/// struct Dog {
///     name: String,
/// }
///
/// let accessor = field!(Dog, name);
/// assert_eq!(accessor.resolve().unwrap(), "name");
/// ```
#[macro_export]
macro_rules! field {
    ($owner:ty, $name:ident) => {{
        let _ = |owner: &$owner| {
            let _ = &owner.$name;
        };
        $crate::expression::Accessor::field(stringify!($name))
    }};
}

/// Creates a method [`Accessor`] after checking that the method exists.
///
/// ```
/// use propath::method;
///
/// struct Dog {
///     name: String,
/// }
///
/// #[allow(non_snake_case)]
/// impl Dog {
///     fn getName(&self) -> &str {
///         &self.name
///     }
/// }
///
/// let accessor = method!(Dog, getName);
/// assert_eq!(accessor.resolve().unwrap(), "name");
/// ```
#[macro_export]
macro_rules! method {
    ($owner:ty, $name:ident) => {{
        let _ = <$owner>::$name;
        $crate::expression::Accessor::method(stringify!($name))
    }};
}
