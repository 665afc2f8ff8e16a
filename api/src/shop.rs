//! Typed client for the shop backend.

use std::sync::Arc;
use storefront_core::transport::{Transport, TransportError};
use storefront_core::types::{ApiListResponse, Product};

/// Path of the catalog list endpoint.
const PRODUCTS_PATH: &str = "/product/";

/// Typed shop API over any [`Transport`].
///
/// Responses are parsed in full before anything is handed to the
/// caller; a malformed body surfaces as [`TransportError::Shape`] and
/// yields no products at all.
#[derive(Clone)]
pub struct ShopApi {
    transport: Arc<dyn Transport>,
}

impl ShopApi {
    /// Create a client calling through `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch the full product catalog.
    ///
    /// # Errors
    ///
    /// Propagates the transport failure, or [`TransportError::Shape`]
    /// when the response body is not a product list.
    pub async fn fetch_products(&self) -> Result<Vec<Product>, TransportError> {
        let value = self.transport.get(PRODUCTS_PATH).await?;
        let list: ApiListResponse<Product> =
            serde_json::from_value(value).map_err(|e| TransportError::Shape(e.to_string()))?;
        tracing::debug!(count = list.items.len(), total = list.total, "catalog fetched");
        Ok(list.items)
    }
}

impl std::fmt::Debug for ShopApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopApi").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;
    use storefront_testing::MockTransport;

    #[tokio::test]
    async fn parses_the_catalog_list() {
        let transport = MockTransport::new().on_get(
            PRODUCTS_PATH,
            Ok(json!({
                "total": 2,
                "items": [
                    {
                        "id": "p-1",
                        "title": "Widget",
                        "description": "",
                        "category": "soft",
                        "image": "w.svg",
                        "price": 100,
                    },
                    {
                        "id": "p-2",
                        "title": "Gadget",
                        "description": "",
                        "category": "hard",
                        "image": "g.svg",
                        "price": null,
                    },
                ],
            })),
        );
        let api = ShopApi::new(Arc::new(transport));

        let products = api.fetch_products().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].price, Some(100));
        assert!(products[1].is_priceless());
    }

    #[tokio::test]
    async fn malformed_list_yields_no_products() {
        let transport =
            MockTransport::new().on_get(PRODUCTS_PATH, Ok(json!({ "total": 2 })));
        let api = ShopApi::new(Arc::new(transport));

        let result = api.fetch_products().await;
        assert!(matches!(result, Err(TransportError::Shape(_))));
    }

    #[tokio::test]
    async fn server_rejection_is_propagated() {
        let transport = MockTransport::new().on_get(
            PRODUCTS_PATH,
            Err(TransportError::Status {
                status: 503,
                message: "maintenance".into(),
            }),
        );
        let api = ShopApi::new(Arc::new(transport));

        match api.fetch_products().await {
            Err(TransportError::Status { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
