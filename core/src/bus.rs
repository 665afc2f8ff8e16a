//! Typed notification bus for decoupling state mutation from
//! presentation updates.
//!
//! The bus is deliberately synchronous: [`EventBus::publish`] invokes
//! every handler registered for the event's topic before returning, in
//! registration order, passing the payload by reference. There is no
//! event persistence: a handler registered after a publish never sees
//! past events.
//!
//! Event names form a closed enumeration: an event type implements
//! [`Event`] and maps each value onto a [`Event::Topic`] discriminant,
//! so publishers and subscribers agree on the payload shape per topic
//! at compile time rather than by string convention.
//!
//! # Re-entrancy
//!
//! Dispatch snapshots the handler list before invoking anything, so a
//! handler may subscribe, unsubscribe or publish on the same bus
//! without corrupting the in-flight notification loop. Handlers always
//! observe state that was fully updated before the publish started.
//!
//! # Example
//!
//! ```
//! use storefront_core::bus::{Event, EventBus};
//!
//! #[derive(Clone, Debug)]
//! enum Ping {
//!     Counted(u32),
//! }
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum PingTopic {
//!     Counted,
//! }
//!
//! impl Event for Ping {
//!     type Topic = PingTopic;
//!
//!     fn topic(&self) -> PingTopic {
//!         match self {
//!             Ping::Counted(_) => PingTopic::Counted,
//!         }
//!     }
//! }
//!
//! let bus = EventBus::new();
//! bus.subscribe(PingTopic::Counted, |event: &Ping| {
//!     let Ping::Counted(n) = event;
//!     assert_eq!(*n, 7);
//! });
//! bus.publish(&Ping::Counted(7));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// An event that can travel over the [`EventBus`].
///
/// Implementors are closed enumerations where every variant carries a
/// fixed payload shape and maps onto exactly one topic discriminant.
pub trait Event: Clone + fmt::Debug {
    /// Discriminant identifying the event name.
    type Topic: Copy + Eq + Hash + fmt::Debug;

    /// The topic this event value belongs to.
    fn topic(&self) -> Self::Topic;
}

/// Handle identifying a registered subscriber.
///
/// Returned by [`EventBus::subscribe`] and accepted by
/// [`EventBus::unsubscribe`]. Ids are unique for the lifetime of the
/// bus, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Entry<E> {
    id: Subscription,
    handler: Handler<E>,
}

/// Synchronous typed publish/subscribe bus.
///
/// Distinct topics are independent; there is no wildcard subscription.
/// A handler that panics is isolated: the panic is caught, reported via
/// `tracing`, and the remaining handlers still run.
pub struct EventBus<E: Event> {
    subscribers: Mutex<HashMap<E::Topic, Vec<Entry<E>>>>,
    next_id: AtomicU64,
}

impl<E: Event> EventBus<E> {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register a handler for a topic.
    ///
    /// Handlers for the same topic are invoked in registration order.
    pub fn subscribe<F>(&self, topic: E::Topic, handler: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = Subscription(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.entry(topic).or_default().push(Entry {
            id,
            handler: Arc::new(handler),
        });
        id
    }

    /// Remove a previously registered handler.
    ///
    /// A no-op if the subscription is unknown or was already removed.
    pub fn unsubscribe(&self, topic: E::Topic, subscription: Subscription) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(entries) = subscribers.get_mut(&topic) {
            entries.retain(|entry| entry.id != subscription);
        }
    }

    /// Deliver an event to every handler currently registered for its
    /// topic, synchronously and in registration order.
    ///
    /// The handler list is snapshotted before dispatch, so handlers may
    /// mutate subscriptions or publish again re-entrantly.
    pub fn publish(&self, event: &E) {
        let topic = event.topic();
        let snapshot: Vec<Handler<E>> = {
            let subscribers = self
                .subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            subscribers
                .get(&topic)
                .map(|entries| entries.iter().map(|e| Arc::clone(&e.handler)).collect())
                .unwrap_or_default()
        };

        for handler in snapshot {
            // A panicking subscriber must not starve the rest.
            if catch_unwind(AssertUnwindSafe(|| handler(event))).is_err() {
                tracing::error!(topic = ?topic, "event handler panicked");
            }
        }
    }

    /// Number of handlers currently registered for a topic.
    #[must_use]
    pub fn subscriber_count(&self, topic: E::Topic) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&topic)
            .map_or(0, Vec::len)
    }
}

impl<E: Event> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("EventBus")
            .field("topics", &subscribers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum TestEvent {
        Counted(u32),
        Named(String),
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum TestTopic {
        Counted,
        Named,
    }

    impl Event for TestEvent {
        type Topic = TestTopic;

        fn topic(&self) -> TestTopic {
            match self {
                TestEvent::Counted(_) => TestTopic::Counted,
                TestEvent::Named(_) => TestTopic::Named,
            }
        }
    }

    fn recording_bus() -> (Arc<EventBus<TestEvent>>, Arc<Mutex<Vec<u32>>>) {
        (Arc::new(EventBus::new()), Arc::new(Mutex::new(Vec::new())))
    }

    #[test]
    fn delivers_in_registration_order() {
        let (bus, seen) = recording_bus();

        for tag in 0..3 {
            let sink = Arc::clone(&seen);
            bus.subscribe(TestTopic::Counted, move |_: &TestEvent| {
                sink.lock().unwrap().push(tag);
            });
        }

        bus.publish(&TestEvent::Counted(1));
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn payload_reaches_handler() {
        let (bus, seen) = recording_bus();
        let sink = Arc::clone(&seen);
        bus.subscribe(TestTopic::Counted, move |event: &TestEvent| {
            if let TestEvent::Counted(n) = event {
                sink.lock().unwrap().push(*n);
            }
        });

        bus.publish(&TestEvent::Counted(42));
        assert_eq!(*seen.lock().unwrap(), vec![42]);
    }

    #[test]
    fn topics_are_independent() {
        let (bus, seen) = recording_bus();
        let sink = Arc::clone(&seen);
        bus.subscribe(TestTopic::Named, move |_: &TestEvent| {
            sink.lock().unwrap().push(0);
        });

        bus.publish(&TestEvent::Counted(1));
        assert!(seen.lock().unwrap().is_empty());

        bus.publish(&TestEvent::Named("hi".into()));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn unsubscribe_removes_handler_and_is_idempotent() {
        let (bus, seen) = recording_bus();
        let sink = Arc::clone(&seen);
        let sub = bus.subscribe(TestTopic::Counted, move |_: &TestEvent| {
            sink.lock().unwrap().push(0);
        });

        bus.unsubscribe(TestTopic::Counted, sub);
        bus.unsubscribe(TestTopic::Counted, sub);
        // Unknown topic is also a no-op.
        bus.unsubscribe(TestTopic::Named, sub);

        bus.publish(&TestEvent::Counted(1));
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(bus.subscriber_count(TestTopic::Counted), 0);
    }

    #[test]
    fn panicking_handler_does_not_starve_the_rest() {
        let (bus, seen) = recording_bus();

        bus.subscribe(TestTopic::Counted, |_: &TestEvent| {
            panic!("broken subscriber");
        });
        let sink = Arc::clone(&seen);
        bus.subscribe(TestTopic::Counted, move |_: &TestEvent| {
            sink.lock().unwrap().push(1);
        });

        bus.publish(&TestEvent::Counted(1));
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn late_subscriber_sees_no_past_events() {
        let (bus, seen) = recording_bus();
        bus.publish(&TestEvent::Counted(1));

        let sink = Arc::clone(&seen);
        bus.subscribe(TestTopic::Counted, move |_: &TestEvent| {
            sink.lock().unwrap().push(0);
        });
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn reentrant_publish_from_handler_is_tolerated() {
        let (bus, seen) = recording_bus();

        let inner_bus = Arc::clone(&bus);
        bus.subscribe(TestTopic::Counted, move |event: &TestEvent| {
            if let TestEvent::Counted(n) = event {
                if *n > 0 {
                    inner_bus.publish(&TestEvent::Counted(n - 1));
                }
            }
        });
        let sink = Arc::clone(&seen);
        bus.subscribe(TestTopic::Counted, move |event: &TestEvent| {
            if let TestEvent::Counted(n) = event {
                sink.lock().unwrap().push(*n);
            }
        });

        bus.publish(&TestEvent::Counted(2));
        // Depth-first: each re-entrant publish completes before the
        // outer dispatch reaches the recording handler.
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn subscribing_during_publish_skips_current_event() {
        let (bus, seen) = recording_bus();

        let inner_bus = Arc::clone(&bus);
        let sink = Arc::clone(&seen);
        bus.subscribe(TestTopic::Counted, move |_: &TestEvent| {
            let late_sink = Arc::clone(&sink);
            inner_bus.subscribe(TestTopic::Counted, move |_: &TestEvent| {
                late_sink.lock().unwrap().push(9);
            });
        });

        bus.publish(&TestEvent::Counted(1));
        assert!(seen.lock().unwrap().is_empty());

        bus.publish(&TestEvent::Counted(2));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
