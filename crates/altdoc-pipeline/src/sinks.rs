//! Bundled sink implementations
//!
//! The orchestrator only knows the `DocumentSink` / `EventSink` traits;
//! these implementations cover local operation and testing. Production
//! deployments supply their own sinks at the same seams.

use altdoc_domain::traits::{DocumentSink, EventSink};
use altdoc_domain::{StatusEvent, StoredRecord};
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// In-memory document sink
///
/// Clones share the same backing store, so a caller can keep a handle and
/// read back what the pipeline persisted.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<StoredRecord>>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything persisted so far
    pub fn records(&self) -> Vec<StoredRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl DocumentSink for MemorySink {
    type Error = Infallible;

    fn persist(&self, record: &StoredRecord) -> Result<(), Self::Error> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Event sink that forwards onto an unbounded channel
///
/// A dropped receiver is not an error: emission must never fail the
/// pipeline, so late events are discarded quietly.
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
    tx: mpsc::UnboundedSender<StatusEvent>,
}

impl ChannelEventSink {
    /// Create a sink and the receiver it feeds
    pub fn new() -> (Self, mpsc::UnboundedReceiver<StatusEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: StatusEvent) {
        if self.tx.send(event).is_err() {
            debug!("Event receiver dropped; discarding status event");
        }
    }
}

/// Event sink that logs transitions through tracing
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: StatusEvent) {
        info!(
            document_id = %event.document_id,
            from = %event.from,
            to = %event.to,
            confidence = event.confidence.map(|c| c.value()),
            "State transition"
        );
    }
}

/// Event sink that accumulates events for inspection in tests
#[derive(Debug, Clone, Default)]
pub struct CollectingEventSink {
    events: Arc<Mutex<Vec<StatusEvent>>>,
}

impl CollectingEventSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event emitted so far
    pub fn events(&self) -> Vec<StatusEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for CollectingEventSink {
    fn emit(&self, event: StatusEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use altdoc_domain::{DocumentId, PipelineState};

    #[test]
    fn test_memory_sink_shares_backing_store() {
        let sink = MemorySink::new();
        let handle = sink.clone();
        let record = StoredRecord {
            document_id: DocumentId::new(),
            final_state: PipelineState::Stored,
            doc_type: None,
            fields: Default::default(),
            validation_errors: Vec::new(),
            error_code: None,
            error_message: None,
        };
        sink.persist(&record).unwrap();
        assert_eq!(handle.records().len(), 1);
    }

    #[test]
    fn test_channel_sink_survives_dropped_receiver() {
        let (sink, rx) = ChannelEventSink::new();
        drop(rx);
        sink.emit(StatusEvent::now(
            DocumentId::new(),
            PipelineState::Ingested,
            PipelineState::Classifying,
            None,
        ));
    }
}
