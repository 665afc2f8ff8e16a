//! Domain data model for the storefront client.
//!
//! Wire-facing shapes (`Product`, [`ApiListResponse`], [`OrderPayload`],
//! [`OrderReceipt`]) carry serde derives matching the remote API.
//! Prices are integer currency units; a missing price (`null` on the
//! wire) marks a *priceless* product, which can never be purchased.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A catalog product, immutable once loaded from the catalog source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Category label (presentation maps it onto styling).
    pub category: String,
    /// Image reference, resolved against the CDN by presentation code.
    pub image: String,
    /// Sale price; `None` is the priceless sentinel.
    pub price: Option<u64>,
}

impl Product {
    /// Whether this product has no sale price and cannot be purchased.
    #[must_use]
    pub const fn is_priceless(&self) -> bool {
        self.price.is_none()
    }
}

/// A basket entry: a product id plus the title/price snapshot taken at
/// the time of addition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItem {
    /// Identifier of the source product.
    pub id: String,
    /// Title snapshot.
    pub title: String,
    /// Price snapshot.
    pub price: u64,
}

impl BasketItem {
    /// Snapshot a product into a basket entry.
    ///
    /// Returns `None` for priceless products, which may not enter the
    /// basket.
    #[must_use]
    pub fn snapshot_of(product: &Product) -> Option<Self> {
        product.price.map(|price| Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price,
        })
    }
}

/// Payment method of an order; `"card"` or `"cash"` on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Pay online by card.
    Card,
    /// Pay in cash on delivery.
    Cash,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::Cash => write!(f, "cash"),
        }
    }
}

/// The in-progress, not-yet-submitted order record.
///
/// Owned exclusively by the checkout state. Item ids and the total are
/// *not* part of the draft; they are taken from the cart at the moment
/// of submission, never hand-edited.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderDraft {
    /// Chosen payment method, initially unset.
    pub payment: Option<PaymentMethod>,
    /// Delivery address, initially empty.
    pub address: String,
    /// Contact email, initially empty.
    pub email: String,
    /// Contact phone, initially empty.
    pub phone: String,
}

/// The order submission wire payload, posted to `/order`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    /// Payment method.
    pub payment: PaymentMethod,
    /// Delivery address.
    pub address: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Ordered list of purchased product ids.
    pub items: Vec<String>,
    /// Sum of the purchased items' prices.
    pub total: u64,
}

/// Success response body of an order submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    /// Identifier assigned to the accepted order.
    pub id: String,
    /// Total the backend recorded for the order.
    pub total: u64,
}

/// Paged list response shape of the catalog endpoint.
///
/// A response missing `items` fails deserialization outright; the
/// catalog is never partially applied from a malformed body.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ApiListResponse<T> {
    /// Total number of items the backend knows about.
    pub total: u64,
    /// The items in this response.
    pub items: Vec<T>,
}

/// A field of the order draft that validation can reject.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OrderField {
    /// Payment method (step 1).
    Payment,
    /// Delivery address (step 1).
    Address,
    /// Contact email (step 2).
    Email,
    /// Contact phone (step 2).
    Phone,
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Payment => write!(f, "payment"),
            Self::Address => write!(f, "address"),
            Self::Email => write!(f, "email"),
            Self::Phone => write!(f, "phone"),
        }
    }
}

/// Field-level validation errors; absence of a key means the field is
/// currently valid.
pub type FormErrors = BTreeMap<OrderField, String>;
