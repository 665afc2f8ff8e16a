//! # Storefront Testing
//!
//! Shared test support for the storefront crates:
//!
//! - [`MockTransport`]: a stub [`Transport`](storefront_core::Transport)
//!   with canned per-path responses and a record of posted bodies
//! - [`EventRecorder`]: subscribes to every application topic and
//!   keeps the published events for assertion
//! - [`fixtures`]: canned products and catalogs
//! - [`init_tracing`]: opt-in log output for debugging a failing test

pub mod fixtures;
mod recorder;
mod transport;

pub use recorder::EventRecorder;
pub use transport::MockTransport;

/// Install a tracing subscriber honoring `RUST_LOG`, once per process.
///
/// Call at the top of a test to see the state layer's log output while
/// debugging; repeated calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
