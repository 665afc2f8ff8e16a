//! # Storefront State
//!
//! The concrete state components of the storefront client, built on
//! the `storefront-core` primitives:
//!
//! - [`CatalogState`]: the product set and the currently previewed
//!   product
//! - [`CartState`]: the basket entries and their derived total
//! - [`CheckoutState`]: the two-step order draft workflow and the
//!   submission state machine
//!
//! ## Data flow
//!
//! User actions (reported by presentation collaborators) call mutator
//! methods here; each mutation recomputes whatever is derived, then
//! publishes a typed change event on the shared bus. Handlers invoked
//! on those events are observers only: any follow-up mutation must be
//! dispatched as a new, distinct call into a state component, never
//! performed inside the handler.
//!
//! For submission, data flows cart → checkout: the order's item ids
//! and total are read from [`CartState`] at the moment of submission
//! and handed to [`CheckoutState::submit_order`], never hand-edited.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use storefront_core::{AppTopic, EventBus, PaymentMethod, Product};
//! use storefront_state::{CartState, CatalogState};
//!
//! let bus = Arc::new(EventBus::new());
//! bus.subscribe(AppTopic::BasketChanged, |event| {
//!     println!("basket changed: {event:?}");
//! });
//!
//! let mut catalog = CatalogState::new(Arc::clone(&bus));
//! catalog.set_products(vec![Product {
//!     id: "p-1".into(),
//!     title: "Widget".into(),
//!     description: String::new(),
//!     category: "other".into(),
//!     image: "w.svg".into(),
//!     price: Some(100),
//! }]);
//!
//! let mut cart = CartState::new(bus);
//! if let Some(product) = catalog.product("p-1") {
//!     cart.add(product);
//! }
//! assert_eq!(cart.total(), 100);
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use cart::CartState;
pub use catalog::CatalogState;
pub use checkout::{CheckoutPhase, CheckoutState, SubmitError};
