//! Mock API handles: an endpoint matcher bound to a request handler.

use crate::error::EndpointError;
use crate::intercept::InterceptRule;
use crate::matching::{Endpoint, EndpointMatcher};
use crate::routing::Router;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

static NEXT_API_ID: AtomicU64 = AtomicU64::new(0);

/// Opaque identity token assigned to a mock API at construction.
///
/// Mock APIs compare by identity, never structurally: two constructions
/// from identical arguments yield distinct tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApiId(u64);

impl ApiId {
    fn next() -> Self {
        ApiId(NEXT_API_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[cfg(test)]
    pub(crate) fn from_raw(raw: u64) -> Self {
        ApiId(raw)
    }
}

/// A mock API: a compiled endpoint matcher paired with the router serving
/// its declared routes.
///
/// `MockApi` is a cheap handle; clones share the same underlying API and
/// the same identity. The handle is immutable after construction and is
/// torn down only by being dropped by all holders.
#[derive(Debug, Clone)]
pub struct MockApi {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    id: ApiId,
    matcher: EndpointMatcher,
    router: Arc<Router>,
    rule: OnceLock<InterceptRule>,
}

impl MockApi {
    /// Build a mock API from an endpoint specification and a router.
    ///
    /// The endpoint matcher is compiled against the router's declared
    /// path patterns. Fails with an [`EndpointError`] for a malformed
    /// endpoint; nothing is constructed in that case.
    pub fn new(endpoint: impl Into<Endpoint>, router: Router) -> Result<Self, EndpointError> {
        let endpoint = endpoint.into();
        let matcher = EndpointMatcher::compile(&endpoint, &router.path_patterns())?;

        Ok(Self {
            inner: Arc::new(Inner {
                id: ApiId::next(),
                matcher,
                router: Arc::new(router),
                rule: OnceLock::new(),
            }),
        })
    }

    pub fn id(&self) -> ApiId {
        self.inner.id
    }

    pub fn matcher(&self) -> &EndpointMatcher {
        &self.inner.matcher
    }

    /// Whether the given URL belongs to this mock API.
    pub fn endpoint_matches(&self, url: &str) -> bool {
        self.inner.matcher.matches(url)
    }

    /// The interception rule derived from this mock API.
    ///
    /// Computed on first use and cached for the lifetime of the instance.
    pub fn intercept_rule(&self) -> InterceptRule {
        self.inner
            .rule
            .get_or_init(|| {
                InterceptRule::new(
                    self.inner.id,
                    self.inner.matcher.clone(),
                    Arc::clone(&self.inner.router),
                )
            })
            .clone()
    }
}

impl PartialEq for MockApi {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for MockApi {}

impl std::hash::Hash for MockApi {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}
