//! Endpoint matching: which request URLs belong to a mock API.

use crate::error::EndpointError;
use crate::routing::PathPattern;
use regex::Regex;
use url::Url;

/// Endpoint specification for a mock API, resolved once at construction.
#[derive(Debug, Clone)]
pub enum Endpoint {
    /// Intercept regardless of host.
    Any,
    /// A literal base URL; scheme and host only, path must be empty or `/`.
    Url(String),
    /// A pre-built pattern, used as-is. The caller takes full
    /// responsibility for matching semantics.
    Pattern(Regex),
}

impl From<&str> for Endpoint {
    fn from(url: &str) -> Self {
        Endpoint::Url(url.to_string())
    }
}

impl From<String> for Endpoint {
    fn from(url: String) -> Self {
        Endpoint::Url(url)
    }
}

impl From<Regex> for Endpoint {
    fn from(pattern: Regex) -> Self {
        Endpoint::Pattern(pattern)
    }
}

/// Compiled matcher deciding whether a request URL belongs to a mock API.
///
/// For a literal base URL the matcher is fully anchored: the escaped base,
/// followed by an alternation of the declared route path bodies, followed
/// by an optional query string. Anchoring keeps one mock from swallowing
/// requests meant for another mock whose base URL is a prefix of this one.
#[derive(Debug, Clone)]
pub struct EndpointMatcher {
    regex: Regex,
}

impl EndpointMatcher {
    /// Compile an endpoint specification against the declared route
    /// patterns.
    ///
    /// Route patterns participate only for literal base URLs; `Any`
    /// accepts every URL and `Pattern` is taken verbatim.
    pub fn compile(
        endpoint: &Endpoint,
        patterns: &[&PathPattern],
    ) -> Result<Self, EndpointError> {
        let regex = match endpoint {
            // Escaped literals and compiled pattern bodies always form a
            // valid regex
            Endpoint::Any => Regex::new(".*").expect("valid regex"),
            Endpoint::Pattern(pattern) => pattern.clone(),
            Endpoint::Url(url) => {
                let base = validate_base_url(url)?;
                let source = compose(&regex::escape(&base), patterns);
                Regex::new(&source).expect("valid regex")
            }
        };

        Ok(Self { regex })
    }

    /// Whether the given URL belongs to this mock API.
    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    /// The source text of the compiled pattern.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Validate a literal endpoint URL and reduce it to its base.
///
/// Returns the scheme + host (+ non-default port) serialization.
fn validate_base_url(url: &str) -> Result<String, EndpointError> {
    let parsed = Url::parse(url).map_err(|_| EndpointError::NotAUrl)?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(EndpointError::NotAUrl);
    }

    if !matches!(parsed.path(), "" | "/") {
        return Err(EndpointError::HasPath);
    }

    Ok(parsed.origin().ascii_serialization())
}

/// Build the composite URL pattern source for an escaped base.
fn compose(escaped_base: &str, patterns: &[&PathPattern]) -> String {
    let bodies: Vec<&str> = patterns.iter().map(|p| p.pattern_body()).collect();

    if bodies.is_empty() {
        return format!(r"\A{escaped_base}/.*\z");
    }

    let paths = if bodies.len() == 1 {
        bodies[0].to_string()
    } else {
        format!("(?:{})", bodies.join("|"))
    };

    format!(r"\A{escaped_base}{paths}(?:\?.*)?\z")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn matcher(endpoint: Endpoint, paths: &[&str]) -> EndpointMatcher {
        let patterns: Vec<PathPattern> = paths.iter().map(|p| PathPattern::compile(p)).collect();
        let refs: Vec<&PathPattern> = patterns.iter().collect();
        EndpointMatcher::compile(&endpoint, &refs).unwrap()
    }

    #[rstest]
    #[case("ftp://example.com", EndpointError::NotAUrl)]
    #[case("not a url", EndpointError::NotAUrl)]
    #[case("example.com", EndpointError::NotAUrl)]
    #[case("http://example.com/a", EndpointError::HasPath)]
    #[case("https://example.com/deep/path", EndpointError::HasPath)]
    fn test_invalid_endpoints(#[case] url: &str, #[case] expected: EndpointError) {
        let result = EndpointMatcher::compile(&Endpoint::from(url), &[]);
        assert_eq!(result.unwrap_err(), expected);
    }

    #[rstest]
    #[case("http://example.com")]
    #[case("http://example.com/")]
    #[case("https://example.com")]
    #[case("http://example.com:8080")]
    fn test_valid_endpoints(#[case] url: &str) {
        assert!(EndpointMatcher::compile(&Endpoint::from(url), &[]).is_ok());
    }

    #[rstest]
    #[case("http://example.com/index.html", true)]
    #[case("http://example.com/index.html/", true)]
    #[case("http://example.com/index.html?page=1&sort=asc", true)]
    #[case("http://example.com/submit/here", true)]
    #[case("http://example.com/other", false)]
    #[case("http://another.com/index.html", false)]
    #[case("https://example.com/index.html", false)]
    #[case("http://example.com:8080/index.html", false)]
    #[case("http://example.com.evil.com/index.html", false)]
    fn test_url_endpoint_with_routes(#[case] url: &str, #[case] expected: bool) {
        let matcher = matcher(
            Endpoint::from("http://example.com"),
            &["/index.html", "/submit/here"],
        );
        assert_eq!(matcher.matches(url), expected);
    }

    #[rstest]
    #[case("http://example.com/users/42", true)]
    #[case("http://example.com/users/42?verbose=1", true)]
    #[case("http://example.com/users", false)]
    #[case("http://example.com/users/42/extra", false)]
    fn test_url_endpoint_with_captures(#[case] url: &str, #[case] expected: bool) {
        let matcher = matcher(Endpoint::from("http://example.com"), &["/users/{id}"]);
        assert_eq!(matcher.matches(url), expected);
    }

    #[rstest]
    #[case("http://example.com/anything/at/all", true)]
    #[case("http://example.com/anything?page=1", true)]
    #[case("http://example.com/", true)]
    #[case("http://example.com", false)]
    #[case("http://another.com/anything", false)]
    fn test_url_endpoint_without_routes_matches_any_path(
        #[case] url: &str,
        #[case] expected: bool,
    ) {
        let matcher = matcher(Endpoint::from("http://example.com"), &[]);
        assert_eq!(matcher.matches(url), expected);
    }

    #[rstest]
    #[case("http://example.com/whatever")]
    #[case("https://some.other.host/x?y=z")]
    #[case("anything at all")]
    fn test_any_endpoint_matches_everything(#[case] url: &str) {
        let matcher = matcher(Endpoint::Any, &["/declared"]);
        assert!(matcher.matches(url));
    }

    #[rstest]
    fn test_pattern_endpoint_used_verbatim() {
        let pattern = Regex::new(r"\Ahttp://example\.com/v\d+/.*\z").unwrap();
        let matcher = matcher(Endpoint::from(pattern), &["/ignored"]);
        assert!(matcher.matches("http://example.com/v2/posts"));
        assert!(!matcher.matches("http://example.com/posts"));
    }

    #[rstest]
    fn test_default_port_is_normalized() {
        let matcher = matcher(Endpoint::from("http://example.com:80"), &["/a"]);
        assert!(matcher.matches("http://example.com/a"));
    }

    #[rstest]
    fn test_composite_source_shape() {
        let matcher = matcher(Endpoint::from("http://example.com"), &["/a", "/b"]);
        assert_eq!(
            matcher.as_str(),
            r"\Ahttp://example\.com(?:/a/?|/b/?)(?:\?.*)?\z"
        );
    }
}
