//! Cart state: the basket entries and their derived total.
//!
//! Entries are unique by product identifier and the total is a pure
//! fold over the current entries, recomputed synchronously on every
//! mutation before the change event goes out, so subscribers always
//! observe a consistent `(items, total)` pair.

use std::sync::Arc;
use storefront_core::bus::EventBus;
use storefront_core::events::AppEvent;
use storefront_core::model::Model;
use storefront_core::types::{BasketItem, Product};

/// Payload of [`CartState`].
#[derive(Clone, Debug, Default)]
pub struct CartData {
    /// Basket entries, in insertion order.
    pub items: Vec<BasketItem>,
    /// Sum of the entries' prices; never stale.
    pub total: u64,
}

/// Holds the set of items added for purchase and their derived total.
///
/// Domain-rule rejections (duplicate add, priceless product, removing
/// an absent entry) are never fatal: they are no-ops observable by the
/// absence of a `basket:changed` event plus a `tracing` warning.
#[derive(Debug)]
pub struct CartState {
    model: Model<CartData, AppEvent>,
}

impl CartState {
    /// Create an empty cart publishing on `bus`.
    #[must_use]
    pub fn new(bus: Arc<EventBus<AppEvent>>) -> Self {
        Self {
            model: Model::new(CartData::default(), bus),
        }
    }

    /// Add a product to the basket.
    ///
    /// Rejects priceless products and products already present, as a
    /// no-op returning `false`. Otherwise snapshots the product's title
    /// and price into an entry, recomputes the total and publishes
    /// `basket:changed`.
    pub fn add(&mut self, product: &Product) -> bool {
        if self.contains(&product.id) {
            tracing::warn!(id = %product.id, "product already in the basket, ignoring add");
            return false;
        }
        let Some(entry) = BasketItem::snapshot_of(product) else {
            tracing::warn!(id = %product.id, title = %product.title, "refusing to add priceless product to the basket");
            return false;
        };

        let data = self.model.data_mut();
        data.items.push(entry);
        data.total = Self::fold_total(&data.items);
        self.publish_changed();
        true
    }

    /// Remove the entry with the given product id.
    ///
    /// A no-op returning `false` when no such entry exists; otherwise
    /// recomputes the total and publishes `basket:changed`.
    pub fn remove(&mut self, id: &str) -> bool {
        let data = self.model.data_mut();
        let before = data.items.len();
        data.items.retain(|item| item.id != id);
        if data.items.len() == before {
            tracing::warn!(id = %id, "no such basket entry, ignoring remove");
            return false;
        }

        data.total = Self::fold_total(&data.items);
        self.publish_changed();
        true
    }

    /// Empty the basket and publish `basket:changed`.
    pub fn clear(&mut self) {
        let data = self.model.data_mut();
        data.items.clear();
        data.total = 0;
        self.publish_changed();
    }

    /// The ordered list of contained product ids, used verbatim to
    /// build an order payload.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.model
            .data()
            .items
            .iter()
            .map(|item| item.id.clone())
            .collect()
    }

    /// Current basket entries, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[BasketItem] {
        &self.model.data().items
    }

    /// Sum of the current entries' prices.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.model.data().total
    }

    /// Number of entries in the basket.
    #[must_use]
    pub fn len(&self) -> usize {
        self.model.data().items.len()
    }

    /// Whether the basket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.model.data().items.is_empty()
    }

    /// Whether an entry with the given product id is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.model.data().items.iter().any(|item| item.id == id)
    }

    fn fold_total(items: &[BasketItem]) -> u64 {
        items.iter().map(|item| item.price).sum()
    }

    fn publish_changed(&self) {
        let data = self.model.data();
        self.model.emit_change(AppEvent::BasketChanged {
            items: data.items.clone(),
            total: data.total,
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use storefront_core::events::AppTopic;
    use storefront_testing::EventRecorder;
    use storefront_testing::fixtures;

    fn cart_with_recorder() -> (CartState, EventRecorder) {
        let bus = Arc::new(EventBus::new());
        let recorder = EventRecorder::attach(&bus);
        (CartState::new(bus), recorder)
    }

    #[test]
    fn add_is_idempotent_per_product() {
        let (mut cart, recorder) = cart_with_recorder();
        let product = fixtures::product("hoodie", 100);

        assert!(cart.add(&product));
        assert!(!cart.add(&product));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), 100);
        assert_eq!(recorder.count(AppTopic::BasketChanged), 1);
    }

    #[test]
    fn priceless_product_never_enters_the_cart() {
        let (mut cart, recorder) = cart_with_recorder();
        let priceless = fixtures::priceless_product("artifact");

        assert!(!cart.add(&priceless));
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
        assert_eq!(recorder.count(AppTopic::BasketChanged), 0);
    }

    #[test]
    fn remove_recomputes_total_and_reports_remaining_items() {
        let (mut cart, recorder) = cart_with_recorder();
        cart.add(&fixtures::product("a", 100));
        cart.add(&fixtures::product("b", 250));
        assert_eq!(cart.total(), 350);

        assert!(cart.remove("a"));
        assert_eq!(cart.total(), 250);

        match recorder.last().unwrap() {
            AppEvent::BasketChanged { items, total } => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].id, "b");
                assert_eq!(total, 250);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn remove_of_absent_entry_is_a_silent_no_op() {
        let (mut cart, recorder) = cart_with_recorder();
        cart.add(&fixtures::product("a", 100));

        assert!(!cart.remove("missing"));
        assert_eq!(cart.total(), 100);
        assert_eq!(recorder.count(AppTopic::BasketChanged), 1);
    }

    #[test]
    fn clear_empties_and_zeroes() {
        let (mut cart, recorder) = cart_with_recorder();
        cart.add(&fixtures::product("a", 100));
        cart.add(&fixtures::product("b", 250));

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
        assert_eq!(recorder.count(AppTopic::BasketChanged), 3);
    }

    #[test]
    fn ids_preserve_insertion_order() {
        let (mut cart, _recorder) = cart_with_recorder();
        cart.add(&fixtures::product("z", 1));
        cart.add(&fixtures::product("a", 2));
        cart.add(&fixtures::product("m", 3));

        assert_eq!(cart.ids(), vec!["z", "a", "m"]);
    }

    #[test]
    fn entry_snapshots_title_and_price_at_addition() {
        let (mut cart, _recorder) = cart_with_recorder();
        let product = fixtures::product("hoodie", 100);
        cart.add(&product);

        assert_eq!(cart.items()[0].title, product.title);
        assert_eq!(cart.items()[0].price, 100);
    }

    proptest! {
        /// For any sequence of add/remove calls the total equals the
        /// sum of the currently present entries' prices.
        #[test]
        fn total_always_matches_fold(ops in proptest::collection::vec((0u8..8, 1u64..1000), 0..40)) {
            let bus = Arc::new(EventBus::new());
            let mut cart = CartState::new(bus);

            for (slot, price) in ops {
                let id = format!("p-{slot}");
                if cart.contains(&id) {
                    cart.remove(&id);
                } else {
                    cart.add(&fixtures::product(&id, price));
                }
                let expected: u64 = cart.items().iter().map(|item| item.price).sum();
                prop_assert_eq!(cart.total(), expected);
            }
        }
    }
}
