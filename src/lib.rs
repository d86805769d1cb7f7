//! propath - canonical property path expressions for fixture generation.
//!
//! Build a path from symbolic accessors instead of hand-written strings:
//!
//! ```
//! use propath::expression::{Accessor, Expression};
//!
//! struct Person;
//!
//! let path = Expression::<Person>::create()
//!     .select(Accessor::method("getNestedDogs").at(1)?.at("*")?)?
//!     .select(Accessor::field("name"))?
//!     .render()?;
//! assert_eq!(path, "nestedDogs[1][*].name");
//! # Ok::<(), propath::expression::ExpressionError>(())
//! ```

pub mod config;
pub mod expression;

pub use expression::{Accessor, Expression, ExpressionError};
