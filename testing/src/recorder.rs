//! Records every event published on an application bus.

use std::sync::{Arc, Mutex, PoisonError};
use storefront_core::bus::EventBus;
use storefront_core::events::{AppEvent, AppTopic};

/// Subscribes to every [`AppTopic`] of a bus and keeps the published
/// events, in publication order, for later assertion.
///
/// ```
/// use std::sync::Arc;
/// use storefront_core::{AppEvent, AppTopic, EventBus};
/// use storefront_testing::EventRecorder;
///
/// let bus = Arc::new(EventBus::new());
/// let recorder = EventRecorder::attach(&bus);
/// bus.publish(&AppEvent::OrderSuccess);
/// assert_eq!(recorder.count(AppTopic::OrderSuccess), 1);
/// ```
#[derive(Debug)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<AppEvent>>>,
}

impl EventRecorder {
    /// Attach a fresh recorder to `bus`, subscribing to every topic.
    #[must_use]
    pub fn attach(bus: &EventBus<AppEvent>) -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        for topic in AppTopic::ALL {
            let sink = Arc::clone(&events);
            bus.subscribe(topic, move |event: &AppEvent| {
                sink.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(event.clone());
            });
        }
        Self { events }
    }

    /// All recorded events, in publication order.
    #[must_use]
    pub fn events(&self) -> Vec<AppEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The topics of the recorded events, in publication order.
    #[must_use]
    pub fn topics(&self) -> Vec<AppTopic> {
        use storefront_core::bus::Event as _;
        self.events().iter().map(AppEvent::topic).collect()
    }

    /// How many recorded events carry the given topic.
    #[must_use]
    pub fn count(&self, topic: AppTopic) -> usize {
        self.topics().iter().filter(|&&t| t == topic).count()
    }

    /// The most recently recorded event, if any.
    #[must_use]
    pub fn last(&self) -> Option<AppEvent> {
        self.events().last().cloned()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_publication_order() {
        let bus = Arc::new(EventBus::new());
        let recorder = EventRecorder::attach(&bus);

        bus.publish(&AppEvent::OrderSuccess);
        bus.publish(&AppEvent::OrderCleared);

        assert_eq!(
            recorder.topics(),
            vec![AppTopic::OrderSuccess, AppTopic::OrderCleared]
        );
        assert!(matches!(recorder.last(), Some(AppEvent::OrderCleared)));

        recorder.clear();
        assert!(recorder.events().is_empty());
    }
}
