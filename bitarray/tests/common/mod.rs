//! In-memory [tracing_subscriber::Layer] to collect events for testing purposes.

use std::{
    fmt,
    sync::{Arc, Mutex},
};
use tracing::{field, Event, Level, Subscriber};
use tracing_subscriber::{layer::Context, layer::SubscriberExt, Layer};

/// A recorded [tracing] event.
#[derive(Default, Clone, Debug)]
pub struct RecordedEvent {
    /// The [Level] of the event.
    pub level: Option<Level>,
    /// The message content of the event.
    pub message: String,
    /// The fields associated with the event.
    pub fields: Vec<(String, String)>,
}

impl RecordedEvent {
    /// Returns the rendered value of `name`, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

impl field::Visit for RecordedEvent {
    fn record_debug(&mut self, field: &field::Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = rendered;
        } else {
            self.fields.push((field.name().to_string(), rendered));
        }
    }
}

/// Shared storage for collected events.
#[derive(Clone, Debug, Default)]
pub struct TraceStorage(Arc<Mutex<Vec<RecordedEvent>>>);

impl TraceStorage {
    /// Returns all events with the given `message`.
    pub fn with_message(&self, message: &str) -> Vec<RecordedEvent> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.message == message)
            .cloned()
            .collect()
    }

    /// Returns all events at the given [Level].
    pub fn at_level(&self, level: Level) -> Vec<RecordedEvent> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.level == Some(level))
            .cloned()
            .collect()
    }
}

/// A subscriber layer that appends every event to a [TraceStorage].
pub struct CollectingLayer(TraceStorage);

impl<S: Subscriber> Layer<S> for CollectingLayer {
    fn on_event(&self, event: &Event<'_>, _: Context<'_, S>) {
        let mut recorded = RecordedEvent {
            level: Some(*event.metadata().level()),
            ..Default::default()
        };
        event.record(&mut recorded);
        self.0 .0.lock().unwrap().push(recorded);
    }
}

/// Runs `f` with a collecting subscriber installed on the current thread.
pub fn traced<T>(f: impl FnOnce() -> T) -> (T, TraceStorage) {
    let storage = TraceStorage::default();
    let subscriber = tracing_subscriber::registry().with(CollectingLayer(storage.clone()));
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, storage)
}
