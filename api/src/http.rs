//! Production HTTP transport.

use reqwest::Client;
use storefront_core::transport::{Transport, TransportError, TransportFuture};

/// [`Transport`] implementation over HTTP with JSON bodies.
///
/// Every response goes through the same normalization: a non-2xx
/// status becomes [`TransportError::Status`] carrying the body's
/// `error` field when the server provided one and the canonical status
/// text otherwise, so callers see a uniform failure shape regardless
/// of endpoint.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport resolving paths against `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn handle_response(
        response: reqwest::Response,
    ) -> Result<serde_json::Value, TransportError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| TransportError::Shape(e.to_string()));
        }

        // Prefer the server's own failure reason over the status text.
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("error")?.as_str().map(str::to_owned))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_owned()
            });
        tracing::warn!(status = status.as_u16(), message = %message, "request rejected");

        Err(TransportError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str) -> TransportFuture<'_> {
        let request = self.client.get(format!("{}{path}", self.base_url));
        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            Self::handle_response(response).await
        })
    }

    fn post(&self, path: &str, body: serde_json::Value) -> TransportFuture<'_> {
        let request = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(&body);
        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            Self::handle_response(response).await
        })
    }
}
