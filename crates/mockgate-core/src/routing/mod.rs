//! Route declaration and dispatch.

mod pattern;
mod query;
mod router;

pub use pattern::PathPattern;
pub use query::parse_query_string;
pub use router::{Handler, Params, Router, RouterBuilder};
