// events/bus/event_bus.rs
//
// Core event bus implementation.
//
// DESIGN PRINCIPLES:
// 1. Synchronous - handlers execute immediately in subscription order
// 2. Deterministic - same events → same result
// 3. Observable - every emission is logged
// 4. Type-safe - events are strongly typed

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::events::types::DomainEvent;

/// Type-erased event handler function
type EventHandler = Box<dyn Fn(&dyn Any) + Send + Sync>;

/// The Event Bus
///
/// Central coordination point for the overlay's domain events. The
/// resolution pipeline and the session controller emit here; consumers
/// subscribe without either side depending on the other.
///
/// Handlers run synchronously, in subscription order, on the emitting
/// task. A panicking handler is isolated so the remaining handlers still
/// run.
pub struct EventBus {
    /// Map from event TypeId to list of handlers
    handlers: Arc<RwLock<HashMap<TypeId, Vec<EventHandler>>>>,

    /// Event emission log (for debugging)
    event_log: Arc<RwLock<Vec<EventLogEntry>>>,
}

/// A logged event for debugging and tracing
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    pub handler_count: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            event_log: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Subscribe to a specific event type.
    ///
    /// Handlers are executed in the order they are subscribed.
    ///
    /// Example:
    /// ```ignore
    /// bus.subscribe::<RatingsResolved, _>(|event| {
    ///     println!("resolved via {}", event.stage);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<E>();

        // Wrap the typed handler in a type-erased closure
        let wrapped: EventHandler = Box::new(move |event_any: &dyn Any| {
            if let Some(event) = event_any.downcast_ref::<E>() {
                handler(event);
            } else {
                log::error!(
                    "failed to downcast event in handler for {}",
                    std::any::type_name::<E>()
                );
            }
        });

        let mut handlers = self.handlers.write().unwrap();
        handlers.entry(type_id).or_insert_with(Vec::new).push(wrapped);
    }

    /// Emit an event: log it, then execute every handler registered for
    /// its type, in subscription order. Returns once all handlers ran.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let type_id = TypeId::of::<E>();

        let handlers = self.handlers.read().unwrap();
        let event_handlers = handlers.get(&type_id);
        let handler_count = event_handlers.map(|h| h.len()).unwrap_or(0);

        let log_entry = EventLogEntry {
            event_type: event.event_type().to_string(),
            event_id: event.event_id().to_string(),
            occurred_at: event.occurred_at().to_rfc3339(),
            handler_count,
        };

        {
            let mut log = self.event_log.write().unwrap();
            log.push(log_entry.clone());
        }

        log::debug!(
            "[event] {} (id: {}) | {} handlers",
            log_entry.event_type,
            log_entry.event_id,
            log_entry.handler_count
        );

        if let Some(handlers) = event_handlers {
            for (idx, handler) in handlers.iter().enumerate() {
                // Isolate panics so one handler cannot break the rest
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    handler(&event as &dyn Any);
                }));

                if result.is_err() {
                    log::error!("handler {} for {} panicked", idx, event.event_type());
                }
            }
        }
    }

    /// Get the event log (for debugging)
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        self.event_log.read().unwrap().clone()
    }

    /// Clear the event log
    pub fn clear_event_log(&self) {
        self.event_log.write().unwrap().clear();
    }

    /// Get the number of subscribers for a specific event type
    pub fn subscriber_count<E>(&self) -> usize
    where
        E: 'static,
    {
        let type_id = TypeId::of::<E>();
        let handlers = self.handlers.read().unwrap();
        handlers.get(&type_id).map(|h| h.len()).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

// Make EventBus cloneable (shared reference)
impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            event_log: Arc::clone(&self.event_log),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_subscribe_and_emit() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        bus.subscribe::<SubjectChanged, _>(move |_event| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(SubjectChanged::new(Some("80123456".to_string())));

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_multiple_handlers_execute_in_order() {
        let bus = EventBus::new();
        let sequence = Arc::new(RwLock::new(Vec::new()));

        let seq1 = Arc::clone(&sequence);
        bus.subscribe::<RatingsResolved, _>(move |_| {
            seq1.write().unwrap().push(1);
        });

        let seq2 = Arc::clone(&sequence);
        bus.subscribe::<RatingsResolved, _>(move |_| {
            seq2.write().unwrap().push(2);
        });

        let seq3 = Arc::clone(&sequence);
        bus.subscribe::<RatingsResolved, _>(move |_| {
            seq3.write().unwrap().push(3);
        });

        bus.emit(RatingsResolved::new(
            "80123456".to_string(),
            "direct_constrained".to_string(),
            Some("8.8".to_string()),
            None,
        ));

        let result = sequence.read().unwrap();
        assert_eq!(*result, vec![1, 2, 3]);
    }

    #[test]
    fn test_event_log_records_emissions() {
        let bus = EventBus::new();

        bus.emit(SubjectChanged::new(Some("1".to_string())));
        bus.emit(ResolutionExhausted::new("1".to_string(), "Inception".to_string()));

        let log = bus.get_event_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].event_type, "SubjectChanged");
        assert_eq!(log[1].event_type, "ResolutionExhausted");
    }

    #[test]
    fn test_subscriber_count() {
        let bus = EventBus::new();

        assert_eq!(bus.subscriber_count::<BadgeMounted>(), 0);

        bus.subscribe::<BadgeMounted, _>(|_| {});
        assert_eq!(bus.subscriber_count::<BadgeMounted>(), 1);

        bus.subscribe::<BadgeMounted, _>(|_| {});
        assert_eq!(bus.subscriber_count::<BadgeMounted>(), 2);

        // Different event type
        assert_eq!(bus.subscriber_count::<SubjectChanged>(), 0);
    }

    #[test]
    fn test_handler_panic_doesnt_break_bus() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));

        // First handler panics
        bus.subscribe::<StaleResolutionDiscarded, _>(|_| {
            panic!("Intentional panic");
        });

        // Second handler should still execute
        let counter_clone = Arc::clone(&counter);
        bus.subscribe::<StaleResolutionDiscarded, _>(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(StaleResolutionDiscarded::new("80123456".to_string()));

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
