//! # Storefront Core
//!
//! Core abstractions for the storefront client's reactive state layer.
//!
//! This crate provides the primitives the concrete state components
//! (`storefront-state`) are built from:
//!
//! - **Notification Bus**: a typed, synchronous publish/subscribe
//!   primitive ([`bus::EventBus`])
//! - **State Container**: a base that pairs a data payload with the bus
//!   ([`model::Model`])
//! - **Domain model**: products, basket entries and the order draft
//!   ([`types`])
//! - **Validation**: eager per-field checks for the checkout workflow
//!   ([`validation`])
//! - **Transport**: the HTTP collaborator contract consumed by the
//!   state layer ([`transport::Transport`])
//!
//! ## Architecture
//!
//! ```text
//! user action ──► state component ──► mutate ──► publish change event
//!                                                      │
//!                     subscribers (presentation) ◄─────┘
//! ```
//!
//! Mutation and notification dispatch are synchronous on the caller's
//! thread of control. The only suspension point in the whole layer is
//! the order submission network call, which goes through the
//! [`transport::Transport`] collaborator.

pub mod bus;
pub mod events;
pub mod model;
pub mod transport;
pub mod types;
pub mod validation;

pub use bus::{Event, EventBus, Subscription};
pub use events::{AppEvent, AppTopic};
pub use model::Model;
pub use transport::{Transport, TransportError};
pub use types::{
    ApiListResponse, BasketItem, FormErrors, OrderDraft, OrderField, OrderPayload, OrderReceipt,
    PaymentMethod, Product,
};
