//! Route-dispatch engine turning declared routes into a callable handler set.

use crate::routing::pattern::PathPattern;
use crate::routing::query::parse_query_string;
use crate::types::request::{HttpMethod, Request};
use crate::types::response::Response;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Parameters captured for a matched route.
///
/// Path placeholders and query parameters are kept separate and are never
/// interpreted beyond capture; what they mean is the handler's business.
#[derive(Debug, Clone, Default)]
pub struct Params {
    path: HashMap<String, String>,
    query: HashMap<String, String>,
}

impl Params {
    /// A captured `{name}` path segment.
    pub fn path(&self, name: &str) -> Option<&str> {
        self.path.get(name).map(String::as_str)
    }

    /// A query parameter; repeated keys are comma-joined.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Path capture if present, query parameter otherwise.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.path(name).or_else(|| self.query(name))
    }
}

/// Handler called when a route matches a request.
pub type Handler = Arc<dyn Fn(&Request, &Params) -> Response + Send + Sync>;

struct Route {
    method: HttpMethod,
    pattern: PathPattern,
    handler: Handler,
}

/// Builder collecting route declarations for a [`Router`].
#[derive(Default)]
pub struct RouterBuilder {
    routes: Vec<Route>,
}

impl RouterBuilder {
    /// Declare a route with an explicit method.
    pub fn route(
        mut self,
        method: HttpMethod,
        path: &str,
        handler: impl Fn(&Request, &Params) -> Response + Send + Sync + 'static,
    ) -> Self {
        self.routes.push(Route {
            method,
            pattern: PathPattern::compile(path),
            handler: Arc::new(handler),
        });
        self
    }

    pub fn get(
        self,
        path: &str,
        handler: impl Fn(&Request, &Params) -> Response + Send + Sync + 'static,
    ) -> Self {
        self.route(HttpMethod::Get, path, handler)
    }

    pub fn post(
        self,
        path: &str,
        handler: impl Fn(&Request, &Params) -> Response + Send + Sync + 'static,
    ) -> Self {
        self.route(HttpMethod::Post, path, handler)
    }

    pub fn put(
        self,
        path: &str,
        handler: impl Fn(&Request, &Params) -> Response + Send + Sync + 'static,
    ) -> Self {
        self.route(HttpMethod::Put, path, handler)
    }

    pub fn patch(
        self,
        path: &str,
        handler: impl Fn(&Request, &Params) -> Response + Send + Sync + 'static,
    ) -> Self {
        self.route(HttpMethod::Patch, path, handler)
    }

    pub fn delete(
        self,
        path: &str,
        handler: impl Fn(&Request, &Params) -> Response + Send + Sync + 'static,
    ) -> Self {
        self.route(HttpMethod::Delete, path, handler)
    }

    pub fn head(
        self,
        path: &str,
        handler: impl Fn(&Request, &Params) -> Response + Send + Sync + 'static,
    ) -> Self {
        self.route(HttpMethod::Head, path, handler)
    }

    pub fn options(
        self,
        path: &str,
        handler: impl Fn(&Request, &Params) -> Response + Send + Sync + 'static,
    ) -> Self {
        self.route(HttpMethod::Options, path, handler)
    }

    pub fn build(self) -> Router {
        Router {
            routes: self.routes,
        }
    }
}

/// A set of declared routes callable as one request handler.
///
/// Routes are matched in declaration order; the first route whose method
/// and path pattern both accept the request wins.
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::default()
    }

    /// The path patterns this router was declared with, in declaration
    /// order. Used by endpoint matching to recombine route bodies.
    pub fn path_patterns(&self) -> Vec<&PathPattern> {
        self.routes.iter().map(|r| &r.pattern).collect()
    }

    /// Dispatch a request to the first matching route.
    ///
    /// Returns `None` when no declared route accepts the request.
    pub fn dispatch(&self, request: &Request) -> Option<Response> {
        let (path, query) = request.path_and_query();

        for route in &self.routes {
            if route.method != request.method {
                continue;
            }
            if let Some(captured) = route.pattern.matches(&path) {
                let params = Params {
                    path: captured,
                    query: query.as_deref().map(parse_query_string).unwrap_or_default(),
                };
                return Some((route.handler)(request, &params));
            }
        }

        None
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field(
                "routes",
                &self
                    .routes
                    .iter()
                    .map(|r| format!("{:?} {}", r.method, r.pattern.raw()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn test_router() -> Router {
        Router::builder()
            .get("/index.html", |_, _| Response::text("index"))
            .post("/submit/here", |_, _| Response::new(201).with_body("created"))
            .get("/users/{id}", |_, params| {
                Response::text(params.path("id").unwrap_or("").to_string())
            })
            .build()
    }

    #[rstest]
    #[case(HttpMethod::Get, "http://example.com/index.html", Some(200))]
    #[case(HttpMethod::Get, "http://example.com/index.html?page=1", Some(200))]
    #[case(HttpMethod::Post, "http://example.com/submit/here", Some(201))]
    #[case(HttpMethod::Post, "http://example.com/index.html", None)]
    #[case(HttpMethod::Get, "http://example.com/other", None)]
    #[case(HttpMethod::Get, "/index.html", Some(200))]
    #[case(HttpMethod::Get, "/index.html/", Some(200))]
    fn test_dispatch(
        #[case] method: HttpMethod,
        #[case] url: &str,
        #[case] status: Option<u16>,
    ) {
        let router = test_router();
        let response = router.dispatch(&Request::new(method, url));
        assert_eq!(response.map(|r| r.status), status);
    }

    #[rstest]
    fn test_dispatch_captures_path_params() {
        let router = test_router();
        let response = router
            .dispatch(&Request::new(HttpMethod::Get, "http://example.com/users/42"))
            .unwrap();
        assert_eq!(response.body, "42");
    }

    #[rstest]
    fn test_dispatch_parses_query_params() {
        let router = Router::builder()
            .get("/search", |_, params| {
                Response::text(params.query("q").unwrap_or("none").to_string())
            })
            .build();

        let response = router
            .dispatch(&Request::new(
                HttpMethod::Get,
                "http://example.com/search?q=rust",
            ))
            .unwrap();
        assert_eq!(response.body, "rust");
    }

    #[rstest]
    fn test_dispatch_declaration_order_wins() {
        let router = Router::builder()
            .get("/users/{id}", |_, _| Response::text("first"))
            .get("/users/{name}", |_, _| Response::text("second"))
            .build();

        let response = router
            .dispatch(&Request::new(HttpMethod::Get, "/users/1"))
            .unwrap();
        assert_eq!(response.body, "first");
    }

    #[rstest]
    fn test_params_get_prefers_path_capture() {
        let router = Router::builder()
            .get("/users/{id}", |_, params| {
                Response::text(params.get("id").unwrap_or("").to_string())
            })
            .build();

        let response = router
            .dispatch(&Request::new(HttpMethod::Get, "/users/7?id=9"))
            .unwrap();
        assert_eq!(response.body, "7");
    }

    #[rstest]
    fn test_path_patterns_in_declaration_order() {
        let router = test_router();
        let raws: Vec<&str> = router.path_patterns().iter().map(|p| p.raw()).collect();
        assert_eq!(raws, vec!["/index.html", "/submit/here", "/users/{id}"]);
    }

    #[rstest]
    fn test_empty_router_never_matches() {
        let router = Router::builder().build();
        assert!(router
            .dispatch(&Request::new(HttpMethod::Get, "/anything"))
            .is_none());
    }
}
