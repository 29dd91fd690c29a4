//! # List Shaping
//!
//! Filtering, projection, sorting and pagination for collection routes.
//!
//! Query strings follow the bracket grammar clients already use:
//! `?averageCost[lte]=10000&careers[in]=Business,UI/UX&select=name&sort=-name&page=2&limit=10`.
//! [`ListQuery::parse`] turns the raw parameters into a query and
//! [`ListQuery::apply`] returns the shaped page directly to the caller.

pub mod errors;
pub mod filter;
pub mod parser;
pub mod results;

pub use errors::{QueryError, QueryResult};
pub use filter::{FilterExpr, FilterOperator, FilterSet};
pub use parser::{ListQuery, SortKey, DEFAULT_LIMIT, MAX_LIMIT};
pub use results::{PageRef, Pagination, ShapedPage};
