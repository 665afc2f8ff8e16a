//! The closed enumeration of application events.
//!
//! Each [`AppEvent`] variant binds one event name to one fixed payload
//! shape; [`AppTopic`] is the corresponding discriminant used for
//! subscriptions. Publishers and subscribers therefore agree on the
//! payload per topic at compile time; there are no string-keyed event
//! maps in this layer.

use crate::bus::Event;
use crate::types::{BasketItem, FormErrors, PaymentMethod, Product};

/// A state-change notification published by a state component.
#[derive(Clone, Debug, PartialEq)]
pub enum AppEvent {
    /// The catalog product set was replaced.
    ItemsChanged {
        /// The new product list.
        items: Vec<Product>,
    },
    /// The currently previewed product changed (or was cleared).
    PreviewChanged {
        /// The previewed product, if any.
        preview: Option<Product>,
    },
    /// The basket contents changed; carries a consistent pair of items
    /// and their recomputed total.
    BasketChanged {
        /// Current basket entries, in insertion order.
        items: Vec<BasketItem>,
        /// Sum of the entries' prices.
        total: u64,
    },
    /// The draft's payment method was set.
    PaymentChanged {
        /// The chosen method.
        payment: PaymentMethod,
    },
    /// The draft's delivery address was set.
    AddressChanged {
        /// The entered address.
        address: String,
    },
    /// The draft's contact fields were set.
    ContactsChanged {
        /// The entered email.
        email: String,
        /// The entered phone.
        phone: String,
    },
    /// Validation errors were recomputed for the step that mutated.
    FormErrorsChanged {
        /// Field → message; absent fields are valid.
        errors: FormErrors,
    },
    /// An order submission was accepted and the draft reset.
    OrderSuccess,
    /// An order submission failed; the draft is preserved for retry.
    OrderError {
        /// Human-readable failure reason.
        reason: String,
    },
    /// The draft and error map were reset.
    OrderCleared,
}

/// Event-name discriminant for [`AppEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppTopic {
    /// `items:changed`
    ItemsChanged,
    /// `preview:changed`
    PreviewChanged,
    /// `basket:changed`
    BasketChanged,
    /// `payment:changed`
    PaymentChanged,
    /// `address:changed`
    AddressChanged,
    /// `contacts:changed`
    ContactsChanged,
    /// `formErrors:changed`
    FormErrorsChanged,
    /// `order:success`
    OrderSuccess,
    /// `order:error`
    OrderError,
    /// `order:cleared`
    OrderCleared,
}

impl AppTopic {
    /// Every topic, in a stable order. Used by recorders and other
    /// subscribe-to-everything consumers.
    pub const ALL: [Self; 10] = [
        Self::ItemsChanged,
        Self::PreviewChanged,
        Self::BasketChanged,
        Self::PaymentChanged,
        Self::AddressChanged,
        Self::ContactsChanged,
        Self::FormErrorsChanged,
        Self::OrderSuccess,
        Self::OrderError,
        Self::OrderCleared,
    ];
}

impl Event for AppEvent {
    type Topic = AppTopic;

    fn topic(&self) -> AppTopic {
        match self {
            Self::ItemsChanged { .. } => AppTopic::ItemsChanged,
            Self::PreviewChanged { .. } => AppTopic::PreviewChanged,
            Self::BasketChanged { .. } => AppTopic::BasketChanged,
            Self::PaymentChanged { .. } => AppTopic::PaymentChanged,
            Self::AddressChanged { .. } => AppTopic::AddressChanged,
            Self::ContactsChanged { .. } => AppTopic::ContactsChanged,
            Self::FormErrorsChanged { .. } => AppTopic::FormErrorsChanged,
            Self::OrderSuccess => AppTopic::OrderSuccess,
            Self::OrderError { .. } => AppTopic::OrderError,
            Self::OrderCleared => AppTopic::OrderCleared,
        }
    }
}
