//! # Storefront API
//!
//! The network edge of the storefront client:
//!
//! - [`HttpTransport`]: the production
//!   [`Transport`](storefront_core::Transport) over HTTP/JSON, with
//!   uniform error normalization
//! - [`ShopApi`]: the typed client for the shop backend, built on any
//!   transport

pub mod http;
pub mod shop;

pub use http::HttpTransport;
pub use shop::ShopApi;
