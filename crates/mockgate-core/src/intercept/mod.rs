//! Interception mechanism boundary: rules and their registry.
//!
//! The mock registry only talks to the interception side through the
//! [`InterceptMechanism`] trait; [`RuleRegistry`] is the in-process
//! implementation that an HTTP-client shim consults to serve intercepted
//! requests locally.

use crate::matching::EndpointMatcher;
use crate::mocks::ApiId;
use crate::routing::Router;
use crate::types::request::Request;
use crate::types::response::Response;
use std::sync::Arc;
use tracing::{debug, trace};

/// The pairing of a URL matcher and a handling capability, registered with
/// the interception mechanism when its mock API is mounted.
#[derive(Debug, Clone)]
pub struct InterceptRule {
    api_id: ApiId,
    matcher: EndpointMatcher,
    router: Arc<Router>,
}

impl InterceptRule {
    pub(crate) fn new(api_id: ApiId, matcher: EndpointMatcher, router: Arc<Router>) -> Self {
        Self {
            api_id,
            matcher,
            router,
        }
    }

    /// Identity of the mock API this rule was derived from.
    pub fn api_id(&self) -> ApiId {
        self.api_id
    }

    /// Whether this rule claims the given request URL.
    pub fn matches(&self, url: &str) -> bool {
        self.matcher.matches(url)
    }

    /// Serve a request this rule claimed.
    ///
    /// A claimed request that no declared route accepts gets a plain 404,
    /// the same as a real app would answer for an unknown path.
    pub fn handle(&self, request: &Request) -> Response {
        self.router
            .dispatch(request)
            .unwrap_or_else(Response::not_found)
    }
}

/// Rules compare by the identity of the API they were derived from.
impl PartialEq for InterceptRule {
    fn eq(&self, other: &Self) -> bool {
        self.api_id == other.api_id
    }
}

impl Eq for InterceptRule {}

/// Registration surface of the interception mechanism.
///
/// Implementations must preserve registration order: when several rules
/// claim the same URL, the one registered first wins, and reproducibility
/// of that ordering is part of the contract.
pub trait InterceptMechanism {
    /// Register a rule for interception.
    fn register_rule(&mut self, rule: InterceptRule);

    /// Remove a previously registered rule.
    fn remove_rule(&mut self, rule: &InterceptRule);

    /// Currently registered rules, in registration order.
    fn rules(&self) -> &[InterceptRule];

    /// Existence check used defensively before removal.
    fn has_rule(&self, rule: &InterceptRule) -> bool {
        self.rules().iter().any(|r| r == rule)
    }
}

/// In-process interception mechanism.
///
/// Holds the registered rules and serves intercepted requests by scanning
/// them in registration order.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<InterceptRule>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve an intercepted request from the first rule claiming its URL.
    ///
    /// Returns `None` when no rule claims the request, meaning it is not
    /// intercepted and would go out to the network.
    pub fn dispatch(&self, request: &Request) -> Option<Response> {
        let rule = self.rules.iter().find(|rule| rule.matches(&request.url))?;
        trace!("rule for api {:?} claimed {}", rule.api_id(), request.url);
        Some(rule.handle(request))
    }
}

impl InterceptMechanism for RuleRegistry {
    fn register_rule(&mut self, rule: InterceptRule) {
        debug!("registering rule for api {:?}", rule.api_id());
        self.rules.push(rule);
    }

    fn remove_rule(&mut self, rule: &InterceptRule) {
        debug!("removing rule for api {:?}", rule.api_id());
        self.rules.retain(|r| r != rule);
    }

    fn rules(&self) -> &[InterceptRule] {
        &self.rules
    }
}
