//! Registry of mounted mock APIs.

use crate::intercept::{InterceptMechanism, RuleRegistry};
use crate::mocks::api::MockApi;
use crate::types::request::Request;
use crate::types::response::Response;
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

/// The set of currently active mock APIs.
///
/// Membership is by identity and mounting is idempotent. The registry
/// keeps its interception mechanism in lockstep with the mounted set: an
/// API is a member exactly when its rule is registered, and rules are
/// registered in mount order so overlapping matchers resolve the same way
/// on every run.
///
/// The registry performs no locking of its own; it is designed for one
/// test execution context at a time. Driving one registry from several
/// threads without external synchronization is unsupported.
#[derive(Debug)]
pub struct MockRegistry<M: InterceptMechanism = RuleRegistry> {
    mounted: Vec<MockApi>,
    mechanism: M,
}

impl MockRegistry<RuleRegistry> {
    /// An empty registry over the in-process interception mechanism.
    pub fn new() -> Self {
        Self::with_mechanism(RuleRegistry::new())
    }

    /// Serve an intercepted request from the mounted APIs.
    ///
    /// Returns `None` when no mounted API claims the request.
    pub fn dispatch(&self, request: &Request) -> Option<Response> {
        self.mechanism.dispatch(request)
    }
}

impl Default for MockRegistry<RuleRegistry> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: InterceptMechanism> MockRegistry<M> {
    /// An empty registry over the given interception mechanism.
    pub fn with_mechanism(mechanism: M) -> Self {
        Self {
            mounted: Vec::new(),
            mechanism,
        }
    }

    fn contains(&self, api: &MockApi) -> bool {
        self.mounted.iter().any(|mounted| mounted == api)
    }

    /// Mount the given APIs.
    ///
    /// Each argument not already mounted is added to the set and its
    /// interception rule registered, in argument order. Already-mounted
    /// arguments (including duplicates within one call) are silently
    /// skipped. Returns exactly the newly mounted subset.
    pub fn mount(&mut self, apis: &[MockApi]) -> Vec<MockApi> {
        let mut added = Vec::new();

        for api in apis {
            if self.contains(api) {
                continue;
            }
            debug!("mounting api {:?}", api.id());
            self.mounted.push(api.clone());
            self.mechanism.register_rule(api.intercept_rule());
            added.push(api.clone());
        }

        added
    }

    /// Unmount the given APIs.
    ///
    /// Each argument currently mounted is removed from the set; its rule
    /// is removed from the mechanism only if still registered there, so an
    /// externally drifted mechanism is tolerated rather than escalated.
    /// Returns exactly the subset that was actually unmounted.
    pub fn unmount(&mut self, apis: &[MockApi]) -> Vec<MockApi> {
        let mut removed = Vec::new();

        for api in apis {
            let Some(position) = self.mounted.iter().position(|mounted| mounted == api) else {
                continue;
            };
            debug!("unmounting api {:?}", api.id());
            self.mounted.remove(position);

            let rule = api.intercept_rule();
            if self.mechanism.has_rule(&rule) {
                self.mechanism.remove_rule(&rule);
            } else {
                debug!("rule for api {:?} already gone from mechanism", api.id());
            }
            removed.push(api.clone());
        }

        removed
    }

    /// Whether every given API is currently mounted.
    ///
    /// Vacuously true for an empty slice.
    pub fn is_mounted(&self, apis: &[MockApi]) -> bool {
        apis.iter().all(|api| self.contains(api))
    }

    /// Currently mounted APIs, in mount order.
    pub fn mounted_apis(&self) -> &[MockApi] {
        &self.mounted
    }

    /// Mount the given APIs for the duration of `body`.
    ///
    /// Only the subset newly mounted by this call is unmounted afterwards;
    /// APIs that were already mounted stay mounted even if also passed in.
    /// Cleanup runs on every exit path, including a panicking `body`.
    pub fn with_mounted<R>(
        &mut self,
        apis: &[MockApi],
        body: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let added = self.mount(apis);
        let result = panic::catch_unwind(AssertUnwindSafe(|| body(self)));
        self.unmount(&added);

        match result {
            Ok(value) => value,
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    /// Unmount every currently mounted API, in mount order.
    ///
    /// Returns the unmounted set.
    pub fn unmount_all(&mut self) -> Vec<MockApi> {
        let mounted = self.mounted.clone();
        self.unmount(&mounted)
    }

    /// Alias for [`unmount_all`](Self::unmount_all).
    pub fn reset(&mut self) -> Vec<MockApi> {
        self.unmount_all()
    }

    /// The interception mechanism this registry drives.
    pub fn mechanism(&self) -> &M {
        &self.mechanism
    }
}
