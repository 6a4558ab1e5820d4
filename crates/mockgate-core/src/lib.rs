//! Mock HTTP APIs for tests: declare a fake API as a base URL plus routed
//! handlers, mount it, and intercepted requests are served by the mock's
//! handlers instead of reaching the network.
//!
//! A [`MockApi`] pairs a compiled [`EndpointMatcher`] with a [`Router`];
//! mounting it registers its interception rule with the interception
//! mechanism, and [`dispatch`] serves intercepted requests from the
//! mounted rules in mount order.
//!
//! ```
//! use mockgate_core::{mock, HttpMethod, Request, Response, Router};
//!
//! let posts = mock(
//!     "http://example.com",
//!     Router::builder()
//!         .get("/posts", |_, _| Response::text("first post"))
//!         .build(),
//! )?;
//!
//! mockgate_core::with_mounted(&[posts], || {
//!     let request = Request::new(HttpMethod::Get, "http://example.com/posts?page=1");
//!     let response = mockgate_core::dispatch(&request).expect("intercepted");
//!     assert_eq!(response.body, "first post");
//! });
//! # Ok::<(), mockgate_core::EndpointError>(())
//! ```
//!
//! The process-wide registry assumes one test execution context at a
//! time; mounting and serving mocks from concurrent threads without
//! external synchronization is unsupported.

pub mod error;
pub mod intercept;
pub mod matching;
pub mod mocks;
pub mod routing;
pub mod types;

pub use error::EndpointError;
pub use intercept::{InterceptMechanism, InterceptRule, RuleRegistry};
pub use matching::{Endpoint, EndpointMatcher};
pub use mocks::{ApiId, MockApi, MockRegistry};
pub use routing::{Handler, Params, PathPattern, Router, RouterBuilder};
pub use types::request::{HttpMethod, Request};
pub use types::response::Response;

use once_cell::sync::Lazy;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, MutexGuard, PoisonError};

static REGISTRY: Lazy<Mutex<MockRegistry>> = Lazy::new(|| Mutex::new(MockRegistry::new()));

fn registry() -> MutexGuard<'static, MockRegistry> {
    // A poisoned lock only means a handler panicked mid-dispatch; the
    // mounted set itself is still consistent
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Build a mock API from an endpoint specification and a router.
///
/// Pass [`Endpoint::Any`] to intercept regardless of host.
pub fn mock(endpoint: impl Into<Endpoint>, router: Router) -> Result<MockApi, EndpointError> {
    MockApi::new(endpoint, router)
}

/// Mount the given APIs on the process-wide registry.
///
/// Returns the newly mounted subset; already-mounted arguments are
/// silently skipped.
pub fn mount(apis: &[MockApi]) -> Vec<MockApi> {
    registry().mount(apis)
}

/// Unmount the given APIs from the process-wide registry.
///
/// Returns the subset that was actually unmounted.
pub fn unmount(apis: &[MockApi]) -> Vec<MockApi> {
    registry().unmount(apis)
}

/// Whether every given API is currently mounted.
pub fn mounted(apis: &[MockApi]) -> bool {
    registry().is_mounted(apis)
}

/// Currently mounted APIs, in mount order.
pub fn mounted_apis() -> Vec<MockApi> {
    registry().mounted_apis().to_vec()
}

/// Mount the given APIs for the duration of `body`.
///
/// The registry lock is released while `body` runs, so the body can issue
/// intercepted calls. Only the subset newly mounted by this call is
/// unmounted afterwards, on every exit path including panics.
pub fn with_mounted<R>(apis: &[MockApi], body: impl FnOnce() -> R) -> R {
    let added = mount(apis);
    let result = panic::catch_unwind(AssertUnwindSafe(body));
    unmount(&added);

    match result {
        Ok(value) => value,
        Err(payload) => panic::resume_unwind(payload),
    }
}

/// Unmount every currently mounted API. Returns the unmounted set.
pub fn unmount_all() -> Vec<MockApi> {
    registry().unmount_all()
}

/// Alias for [`unmount_all`].
pub fn reset() -> Vec<MockApi> {
    registry().reset()
}

/// Serve an intercepted request from the process-wide registry.
///
/// This is the entry point an HTTP-client interception shim calls.
/// Returns `None` when no mounted API claims the request.
pub fn dispatch(request: &Request) -> Option<Response> {
    registry().dispatch(request)
}
