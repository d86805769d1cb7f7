//! Fluent construction of property expressions.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use super::accessor::{Accessor, IndexedAccessor, ResolverOptions};
use super::error::ExpressionError;
use super::node::{IntoIndex, Node};
use super::render;

/// A property path rooted at the model type `T`.
///
/// Expressions are values: every builder call returns a new expression and
/// leaves the receiver untouched, so a failed call never corrupts a path that
/// was already built. `T` only tags the root type and is never rendered.
///
/// # Example
///
/// ```
/// use propath::expression::{Accessor, Expression};
///
/// struct Person;
///
/// let path = Expression::<Person>::create()
///     .append_field(Accessor::field("dog"))?
///     .append_field(Accessor::field("loves"))?
///     .append_index(1)?
///     .render()?;
/// assert_eq!(path, "dog.loves[1]");
/// # Ok::<(), propath::expression::ExpressionError>(())
/// ```
pub struct Expression<T> {
    nodes: Arc<[Node]>,
    options: ResolverOptions,
    root: PhantomData<fn() -> T>,
}

impl<T> Expression<T> {
    /// Creates an empty expression rooted at `T`.
    pub fn create() -> Self {
        Self::with_resolver(ResolverOptions::default())
    }

    /// Creates an empty expression that resolves accessors with `options`.
    pub fn with_resolver(options: ResolverOptions) -> Self {
        Self {
            nodes: Arc::from(Vec::<Node>::new()),
            options,
            root: PhantomData,
        }
    }

    pub(crate) fn from_nodes(nodes: Vec<Node>) -> Self {
        Self {
            nodes: Arc::from(nodes),
            options: ResolverOptions::default(),
            root: PhantomData,
        }
    }

    /// The nodes appended so far, in order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn resolver_options(&self) -> ResolverOptions {
        self.options
    }

    /// Resolves `accessor` and appends it as a field node.
    pub fn append_field(&self, accessor: Accessor) -> Result<Self, ExpressionError> {
        let name = accessor.resolve_with(self.options)?;
        debug!(field = %name, depth = self.nodes.len(), "append field");
        Ok(self.extended(Node::Field(name)))
    }

    /// Appends an index node.
    ///
    /// Accepts non-negative integers, decimal strings and `"*"` for every
    /// element. The expression must already contain a field.
    pub fn append_index(&self, index: impl IntoIndex) -> Result<Self, ExpressionError> {
        if self.nodes.is_empty() {
            return Err(ExpressionError::LeadingIndex);
        }
        let index = index.into_index()?;
        debug!(%index, depth = self.nodes.len(), "append index");
        Ok(self.extended(Node::Index(index)))
    }

    /// Appends an accessor together with any subscripts applied to it.
    ///
    /// `select(accessor.at(i)?.at(j)?)` is exactly
    /// `append_field(accessor)?.append_index(i)?.append_index(j)`.
    pub fn select(&self, selector: impl Into<IndexedAccessor>) -> Result<Self, ExpressionError> {
        let IndexedAccessor { accessor, indices } = selector.into();
        indices
            .into_iter()
            .try_fold(self.append_field(accessor)?, |exp, index| {
                exp.append_index(index)
            })
    }

    /// Renders the canonical path string.
    pub fn render(&self) -> Result<String, ExpressionError> {
        render::render(&self.nodes)
    }

    fn extended(&self, node: Node) -> Self {
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.extend_from_slice(&self.nodes);
        nodes.push(node);
        Self {
            nodes: Arc::from(nodes),
            options: self.options,
            root: PhantomData,
        }
    }
}

impl<T> Default for Expression<T> {
    fn default() -> Self {
        Self::create()
    }
}

impl<T> Clone for Expression<T> {
    fn clone(&self) -> Self {
        Self {
            nodes: Arc::clone(&self.nodes),
            options: self.options,
            root: PhantomData,
        }
    }
}

/// Two expressions are equal when they hold the same nodes and resolve
/// further accessors with the same options.
impl<T> PartialEq for Expression<T> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.options == other.options
    }
}

impl<T> Eq for Expression<T> {}

impl<T> fmt::Debug for Expression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expression")
            .field("root", &std::any::type_name::<T>())
            .field("nodes", &self.nodes)
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::node::Index;

    struct Person;

    fn person() -> Expression<Person> {
        Expression::create()
    }

    #[test]
    fn test_create_is_empty() {
        let exp = person();
        assert!(exp.is_empty());
        assert_eq!(exp.len(), 0);
    }

    #[test]
    fn test_append_field_adds_one_node() {
        let exp = person().append_field(Accessor::field("dog")).unwrap();
        assert_eq!(exp.nodes(), &[Node::Field("dog".to_string())]);
    }

    #[test]
    fn test_append_does_not_touch_receiver() {
        let base = person().append_field(Accessor::field("dogs")).unwrap();
        let indexed = base.append_index(3).unwrap();
        assert_eq!(base.len(), 1);
        assert_eq!(indexed.len(), 2);
        assert_eq!(indexed.nodes()[1], Node::Index(Index::Position(3)));
    }

    #[test]
    fn test_leading_index_rejected() {
        assert_eq!(
            person().append_index(0).unwrap_err(),
            ExpressionError::LeadingIndex
        );
        assert!(person().select(Accessor::field("dogs").at(0).unwrap()).is_ok());
    }

    #[test]
    fn test_failed_append_keeps_prior_state() {
        let base = person().append_field(Accessor::field("dogs")).unwrap();
        assert!(base.append_index(-1).is_err());
        assert!(base.append_index("first").is_err());
        assert!(base.append_field(Accessor::field("")).is_err());
        assert_eq!(base.render().unwrap(), "dogs");
    }

    #[test]
    fn test_select_matches_explicit_appends() {
        let sugar = person()
            .select(Accessor::field("nestedDogs").at(1).unwrap().at("*").unwrap())
            .unwrap();
        let explicit = person()
            .append_field(Accessor::field("nestedDogs"))
            .unwrap()
            .append_index(1)
            .unwrap()
            .append_index("*")
            .unwrap();
        assert_eq!(sugar, explicit);
    }

    #[test]
    fn test_resolver_options_carry_through() {
        let options = ResolverOptions {
            boolean_getters: true,
        };
        let exp = Expression::<Person>::with_resolver(options)
            .append_field(Accessor::method("isActive"))
            .unwrap();
        assert_eq!(exp.resolver_options(), options);
        assert_eq!(exp.render().unwrap(), "active");
    }

    #[test]
    fn test_equality_includes_resolver_options() {
        let strict = person().append_field(Accessor::field("account")).unwrap();
        let lenient = Expression::<Person>::with_resolver(ResolverOptions {
            boolean_getters: true,
        })
        .append_field(Accessor::field("account"))
        .unwrap();

        assert_eq!(strict.render(), lenient.render());
        assert_ne!(strict, lenient);

        let next = Accessor::method("isActive");
        assert_ne!(
            strict.append_field(next.clone()).unwrap().render(),
            lenient.append_field(next).unwrap().render()
        );
    }

    #[test]
    fn test_expression_is_send_and_sync() {
        fn assert_send_sync<S: Send + Sync>() {}
        struct NotSync(std::cell::Cell<u8>);
        assert_send_sync::<Expression<NotSync>>();
    }
}
