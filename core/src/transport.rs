//! Transport collaborator contract.
//!
//! The state layer never talks HTTP directly; it consumes this trait.
//! The production implementation lives in `storefront-api`, the test
//! double in `storefront-testing`.
//!
//! The trait uses explicit `Pin<Box<dyn Future>>` returns instead of
//! `async fn` so it stays dyn-compatible (`Arc<dyn Transport>` is held
//! by the checkout state across the submission await point).

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors a transport operation can surface.
///
/// Transport and shape failures are always propagated to the caller;
/// the state layer never silently retries or partially applies a
/// malformed response.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The request never produced a response (connection refused, DNS,
    /// timeout).
    #[error("request failed: {0}")]
    Network(String),

    /// The server answered with a non-2xx status. The message is the
    /// response body's `error` field when present, the status text
    /// otherwise.
    #[error("{message} (status {status})")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Failure reason reported by the server.
        message: String,
    },

    /// A 2xx response whose body could not be parsed into the expected
    /// shape.
    #[error("malformed response: {0}")]
    Shape(String),
}

/// Future returned by transport operations.
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<serde_json::Value, TransportError>> + Send + 'a>>;

/// HTTP collaborator consumed by the catalog and checkout states.
///
/// Both operations resolve with the parsed response body and reject
/// with a [`TransportError`] on non-2xx responses.
pub trait Transport: Send + Sync {
    /// Fetch `path` relative to the base URL.
    fn get(&self, path: &str) -> TransportFuture<'_>;

    /// Post `body` to `path` relative to the base URL.
    fn post(&self, path: &str, body: serde_json::Value) -> TransportFuture<'_>;
}
