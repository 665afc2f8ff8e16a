//! Catalog state: the loaded product set and the preview selection.

use std::sync::Arc;
use storefront_core::bus::EventBus;
use storefront_core::events::AppEvent;
use storefront_core::model::Model;
use storefront_core::types::Product;

/// Payload of [`CatalogState`].
#[derive(Clone, Debug, Default)]
pub struct CatalogData {
    /// The loaded product set.
    pub products: Vec<Product>,
    /// The currently previewed product, if any.
    pub preview: Option<Product>,
}

/// Holds the product set and the currently previewed product.
///
/// Loading the catalog is delegated to the transport collaborator (see
/// `storefront-api`); [`CatalogState::set_products`] is only ever
/// called with a fully parsed, well-shaped list. A malformed response
/// surfaces as an error to the caller and mutates nothing here.
#[derive(Debug)]
pub struct CatalogState {
    model: Model<CatalogData, AppEvent>,
}

impl CatalogState {
    /// Create an empty catalog publishing on `bus`.
    #[must_use]
    pub fn new(bus: Arc<EventBus<AppEvent>>) -> Self {
        Self {
            model: Model::new(CatalogData::default(), bus),
        }
    }

    /// Replace the held product set and publish `items:changed`.
    pub fn set_products(&mut self, products: Vec<Product>) {
        tracing::debug!(count = products.len(), "catalog replaced");
        self.model.data_mut().products = products;
        self.model.emit_change(AppEvent::ItemsChanged {
            items: self.model.data().products.clone(),
        });
    }

    /// The product with the given identifier, if present.
    #[must_use]
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.model.data().products.iter().find(|p| p.id == id)
    }

    /// All loaded products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.model.data().products
    }

    /// Set or clear the currently inspected product and publish
    /// `preview:changed`.
    pub fn set_preview(&mut self, preview: Option<Product>) {
        self.model.data_mut().preview = preview.clone();
        self.model.emit_change(AppEvent::PreviewChanged { preview });
    }

    /// The currently previewed product, if any.
    #[must_use]
    pub fn preview(&self) -> Option<&Product> {
        self.model.data().preview.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use storefront_core::events::AppTopic;
    use storefront_testing::EventRecorder;
    use storefront_testing::fixtures;

    #[test]
    fn set_products_replaces_and_publishes() {
        let bus = Arc::new(EventBus::new());
        let recorder = EventRecorder::attach(&bus);
        let mut catalog = CatalogState::new(bus);

        catalog.set_products(fixtures::sample_catalog());
        assert_eq!(catalog.products().len(), 3);
        assert_eq!(recorder.count(AppTopic::ItemsChanged), 1);

        match recorder.last().unwrap() {
            AppEvent::ItemsChanged { items } => assert_eq!(items.len(), 3),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn lookup_by_id() {
        let bus = Arc::new(EventBus::new());
        let mut catalog = CatalogState::new(bus);
        catalog.set_products(fixtures::sample_catalog());

        assert!(catalog.product("hoodie").is_some());
        assert!(catalog.product("missing").is_none());
    }

    #[test]
    fn preview_can_be_set_and_cleared() {
        let bus = Arc::new(EventBus::new());
        let recorder = EventRecorder::attach(&bus);
        let mut catalog = CatalogState::new(bus);

        let product = fixtures::product("hoodie", 1000);
        catalog.set_preview(Some(product.clone()));
        assert_eq!(catalog.preview(), Some(&product));

        catalog.set_preview(None);
        assert!(catalog.preview().is_none());
        assert_eq!(recorder.count(AppTopic::PreviewChanged), 2);
    }
}
