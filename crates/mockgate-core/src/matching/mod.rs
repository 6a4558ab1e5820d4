//! URL matching for mock APIs.

mod endpoint;

pub use endpoint::{Endpoint, EndpointMatcher};
