//! Canonical string rendering of expression nodes.

use super::error::ExpressionError;
use super::node::Node;

/// Renders nodes into the canonical path string.
///
/// The first node must be a field and is written bare. Later fields are
/// prefixed with `.`, and indices are written as `[n]` or `[*]` with no
/// separator.
pub fn render(nodes: &[Node]) -> Result<String, ExpressionError> {
    let (first, rest) = match nodes.split_first() {
        Some((Node::Field(name), rest)) => (name, rest),
        Some((Node::Index(_), _)) => return Err(ExpressionError::LeadingIndex),
        None => return Err(ExpressionError::EmptyExpressionRender),
    };

    let mut out = String::with_capacity(first.len() + rest.len() * 8);
    out.push_str(first);
    for node in rest {
        match node {
            Node::Field(name) => {
                out.push('.');
                out.push_str(name);
            }
            Node::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    Ok(out)
}
