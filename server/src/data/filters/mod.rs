//! Product search filters
//!
//! Builds AND-composed predicates over a closed set of product columns and
//! compiles them into a parameterized WHERE fragment.
//!
//! ## Usage
//!
//! ```
//! use catalog_server::data::filters::{Filtration, ProductField, compile};
//!
//! let filtration = Filtration::new()
//!     .equal(ProductField::Id, Some("5"), Some(255))
//!     .contains(ProductField::Name, Some("pro"), Some(255));
//! let criteria = compile(&filtration);
//! assert_eq!(criteria.values, vec!["5", "%pro%"]);
//! ```

mod builder;
mod compiler;
mod types;

pub use builder::Filtration;
pub use compiler::{CompiledCriteria, compile, compile_with};
pub use types::{Filter, FilterOp, FilterValue, ProductField};
