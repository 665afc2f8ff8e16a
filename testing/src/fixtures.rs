//! Canned products and catalogs.

use storefront_core::types::Product;

/// A priced product with the given id, title derived from the id.
#[must_use]
pub fn product(id: &str, price: u64) -> Product {
    Product {
        id: id.to_owned(),
        title: format!("Test {id}"),
        description: format!("Description of {id}"),
        category: "other".to_owned(),
        image: format!("{id}.svg"),
        price: Some(price),
    }
}

/// A product without a sale price; may never enter the basket.
#[must_use]
pub fn priceless_product(id: &str) -> Product {
    Product {
        price: None,
        ..product(id, 0)
    }
}

/// A small catalog: two priced products and one priceless.
#[must_use]
pub fn sample_catalog() -> Vec<Product> {
    vec![
        product("hoodie", 1000),
        product("mug", 250),
        priceless_product("artifact"),
    ]
}
