//! State container base.
//!
//! [`Model`] pairs one payload value with the notification bus every
//! state component publishes on. The base never performs validation or
//! business logic; that belongs to the concrete component composing
//! it. Read access hands out references; callers needing a snapshot
//! must copy.

use crate::bus::{Event, EventBus};
use std::sync::Arc;

/// Base state container: a payload plus the owning notification bus.
///
/// Concrete state components compose a `Model`, mutate the payload
/// through [`Model::data_mut`], and announce the mutation through
/// [`Model::emit_change`] once the payload is fully updated. Handlers
/// must never observe a half-applied state.
#[derive(Debug)]
pub struct Model<T, E: Event> {
    data: T,
    bus: Arc<EventBus<E>>,
}

impl<T, E: Event> Model<T, E> {
    /// Create a container holding `data`, publishing on `bus`.
    #[must_use]
    pub const fn new(data: T, bus: Arc<EventBus<E>>) -> Self {
        Self { data, bus }
    }

    /// The current payload, by reference.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Mutable access to the payload for the owning component.
    pub const fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// The bus this container publishes on.
    #[must_use]
    pub const fn bus(&self) -> &Arc<EventBus<E>> {
        &self.bus
    }

    /// Publish a change notification carrying the component's state
    /// snapshot for the named change.
    pub fn emit_change(&self, event: E) {
        self.bus.publish(&event);
    }
}
