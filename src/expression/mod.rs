//! Property expressions for targeting parts of a data model.
//!
//! An expression is an ordered list of field and index nodes built from
//! symbolic accessors and rendered into a canonical path string that fixture
//! generators use to select properties.
//!
//! # Syntax
//!
//! - `name` - The first property, written bare
//! - `.name` - A nested property
//! - `[3]` - A collection position
//! - `[*]` - Every element of a collection
//!
//! # Examples
//!
//! ```
//! // dog.name - the name of the person's dog
//! // dogs[1] - the second dog
//! // nestedDogs[*][*].name - every name in a list of lists
//! ```

pub mod accessor;
pub mod builder;
pub mod error;
pub mod node;
pub mod parser;
pub mod render;

pub use accessor::{resolve_name, Accessor, AccessorKind, IndexedAccessor, ResolverOptions};
pub use builder::Expression;
pub use error::ExpressionError;
pub use node::{Index, IntoIndex, Node};
pub use parser::{Parser, Segment};
