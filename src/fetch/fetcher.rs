//! Page fetcher capability and its error type

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a page fetcher
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Navigation or document read did not finish in time
    #[error("timed out after {timeout:?} loading {url}")]
    Timeout { url: String, timeout: Duration },

    /// Browser or connection fault reported by the driver
    #[error("browser driver error: {0}")]
    Driver(String),

    /// Anything else; never retried
    #[error("unexpected fetch error: {0}")]
    Unexpected(String),
}

impl FetchError {
    /// Check if error is transient and should be retried
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Timeout { .. } | FetchError::Driver(_))
    }
}

/// Something that can load a URL and hand back the rendered markup
///
/// Implementations own the browser (or a stand-in for tests); callers only
/// navigate and read. Rendering time after `navigate` is the caller's concern.
pub trait PageFetcher: Send + Sync {
    /// Load `url`, replacing the current document
    fn navigate(&self, url: &str) -> impl Future<Output = Result<(), FetchError>> + Send;

    /// Markup of the current document as rendered so far
    fn current_document(&self) -> impl Future<Output = Result<String, FetchError>> + Send;
}
