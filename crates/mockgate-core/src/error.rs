//! Error types for endpoint validation.

use thiserror::Error;

/// Endpoint validation error, raised at mock construction time.
///
/// Construction never partially succeeds: a mock whose endpoint fails
/// validation is not created at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// The endpoint string did not parse as a URL, or its scheme was
    /// neither `http` nor `https`.
    #[error("endpoint should be a valid URL")]
    NotAUrl,
    /// The endpoint URL carried a path component other than `/`.
    #[error("endpoint URL should not include path")]
    HasPath,
}
