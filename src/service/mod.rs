//! Catalog: typed data access built on the SQL builder.

mod catalog;
mod validation;
pub use catalog::{Catalog, BULK_LIMIT};
pub use validation::{Assignments, RequestValidator};
