//! Stub transport with canned per-path responses.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use storefront_core::transport::{Transport, TransportError, TransportFuture};

type Stub = Result<serde_json::Value, TransportError>;
type PostLog = Arc<Mutex<Vec<(String, serde_json::Value)>>>;

/// A [`Transport`] double serving canned responses and recording every
/// posted body.
///
/// Stubs are registered per method and path with the builder-style
/// [`MockTransport::on_get`] / [`MockTransport::on_post`]; a request
/// for an unstubbed route resolves to [`TransportError::Network`], so
/// a test that forgets a stub fails loudly instead of hanging.
///
/// ```
/// use serde_json::json;
/// use storefront_testing::MockTransport;
///
/// let transport = MockTransport::new()
///     .on_get("/product/", Ok(json!({ "total": 0, "items": [] })));
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    gets: HashMap<String, Stub>,
    posts: HashMap<String, Stub>,
    posted: PostLog,
}

impl MockTransport {
    /// A transport with no stubs; every request fails.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stub the response of `GET path`.
    #[must_use]
    pub fn on_get(mut self, path: impl Into<String>, response: Stub) -> Self {
        self.gets.insert(path.into(), response);
        self
    }

    /// Stub the response of `POST path`.
    #[must_use]
    pub fn on_post(mut self, path: impl Into<String>, response: Stub) -> Self {
        self.posts.insert(path.into(), response);
        self
    }

    /// Every `(path, body)` posted so far, in request order.
    #[must_use]
    pub fn posts(&self) -> Vec<(String, serde_json::Value)> {
        self.posted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// A handle onto the post log that stays usable after the
    /// transport has been moved behind an `Arc<dyn Transport>`.
    #[must_use]
    pub fn posts_handle(&self) -> PostLog {
        Arc::clone(&self.posted)
    }
}

impl Transport for MockTransport {
    fn get(&self, path: &str) -> TransportFuture<'_> {
        let response = self
            .gets
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(TransportError::Network(format!("no stub for GET {path}"))));
        Box::pin(std::future::ready(response))
    }

    fn post(&self, path: &str, body: serde_json::Value) -> TransportFuture<'_> {
        self.posted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((path.to_owned(), body));
        let response = self
            .posts
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(TransportError::Network(format!("no stub for POST {path}"))));
        Box::pin(std::future::ready(response))
    }
}
