//! Lifecycle event signals broadcast while the SDK drives transactions.
//!
//! The bus is an explicit value handed to managers at construction, so tests
//! and embedders can substitute their own rather than sharing process-wide
//! state.

use std::fmt;
use std::sync::{Arc, Mutex};

/// The closed set of lifecycle signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Waiting,
    Pending,
    Transaction,
    Completed,
    Error,
    Initialized,
    Paused,
    Unpaused,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Waiting => "waiting",
            EventKind::Pending => "pending",
            EventKind::Transaction => "transaction",
            EventKind::Completed => "completed",
            EventKind::Error => "error",
            EventKind::Initialized => "initialized",
            EventKind::Paused => "paused",
            EventKind::Unpaused => "unpaused",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One emitted event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkEvent {
    pub kind: EventKind,
    pub message: String,
    /// Which transaction of the operation this event belongs to, 1-based
    pub transaction_index: u32,
    /// Total number of transactions the operation will submit
    pub transaction_count: u32,
}

impl SdkEvent {
    pub fn new(
        kind: EventKind,
        message: impl Into<String>,
        transaction_index: u32,
        transaction_count: u32,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            transaction_index,
            transaction_count,
        }
    }
}

type Subscriber = Box<dyn Fn(&SdkEvent) + Send + Sync>;

/// Broadcast bus for [`SdkEvent`]s. Cloning shares the subscriber list.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every subsequent event
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&SdkEvent) + Send + Sync + 'static,
    {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(Box::new(listener));
        }
    }

    /// Broadcast an event to all listeners
    pub fn emit(&self, event: SdkEvent) {
        tracing::debug!(kind = %event.kind, message = %event.message, "sdk event");
        if let Ok(subscribers) = self.subscribers.lock() {
            for listener in subscribers.iter() {
                listener(&event);
            }
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.subscribers.lock().map(|s| s.len()).unwrap_or(0);
        f.debug_struct("EventBus").field("subscribers", &count).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_reach_all_subscribers() {
        let bus = EventBus::new();
        let first: Arc<Mutex<Vec<EventKind>>> = Arc::default();
        let second: Arc<Mutex<Vec<EventKind>>> = Arc::default();

        let sink = first.clone();
        bus.subscribe(move |event| sink.lock().unwrap().push(event.kind));
        let sink = second.clone();
        bus.subscribe(move |event| sink.lock().unwrap().push(event.kind));

        bus.emit(SdkEvent::new(EventKind::Pending, "waiting for clearance", 1, 2));

        assert_eq!(*first.lock().unwrap(), vec![EventKind::Pending]);
        assert_eq!(*second.lock().unwrap(), vec![EventKind::Pending]);
    }

    #[test]
    fn test_cloned_bus_shares_subscribers() {
        let bus = EventBus::new();
        let clone = bus.clone();
        let seen: Arc<Mutex<Vec<String>>> = Arc::default();

        let sink = seen.clone();
        bus.subscribe(move |event| sink.lock().unwrap().push(event.message.clone()));
        clone.emit(SdkEvent::new(EventKind::Transaction, "sent", 1, 1));

        assert_eq!(*seen.lock().unwrap(), vec!["sent".to_string()]);
    }

    #[test]
    fn test_event_kind_names() {
        assert_eq!(EventKind::Waiting.as_str(), "waiting");
        assert_eq!(EventKind::Completed.to_string(), "completed");
    }
}
