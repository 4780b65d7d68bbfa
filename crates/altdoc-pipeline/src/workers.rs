//! Worker pool for concurrent document processing

use crate::orchestrator::Orchestrator;
use altdoc_domain::traits::{DocumentSink, EventSink, ModelProvider};
use altdoc_domain::Document;
use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

/// Shared receiver for multiple workers pulling from one unbounded channel
pub struct SharedReceiver<T> {
    rx: Arc<Mutex<mpsc::UnboundedReceiver<T>>>,
}

impl<T> SharedReceiver<T> {
    /// Wrap a receiver for shared consumption
    pub fn new_unbounded(rx: mpsc::UnboundedReceiver<T>) -> Self {
        Self {
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// Receive the next item; `None` once the channel closes and drains
    pub async fn recv(&self) -> Option<T> {
        self.rx.lock().await.recv().await
    }
}

impl<T> Clone for SharedReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

/// Spawn document workers over a shared channel
///
/// Each worker pulls documents and runs them through the orchestrator to a
/// terminal record. One document is strictly sequential; documents never
/// block each other beyond pool capacity. Workers exit when the channel
/// closes; await the returned handles to drain.
pub fn spawn_document_workers<M, D, E>(
    count: usize,
    rx: SharedReceiver<Document>,
    orchestrator: Arc<Orchestrator<M, D, E>>,
) -> Vec<JoinHandle<()>>
where
    M: ModelProvider + 'static,
    M::Error: Display,
    D: DocumentSink + 'static,
    D::Error: Display,
    E: EventSink + 'static,
{
    let mut handles = Vec::with_capacity(count);
    for i in 0..count {
        let rx = rx.clone();
        let orchestrator = orchestrator.clone();

        handles.push(tokio::spawn(async move {
            tracing::debug!(worker = i, "Document worker started");

            while let Some(document) = rx.recv().await {
                let id = document.id;
                match orchestrator.process(document).await {
                    Ok(record) => {
                        tracing::debug!(
                            worker = i,
                            document_id = %id,
                            final_state = %record.final_state,
                            "Document finished"
                        );
                    }
                    Err(e) => {
                        tracing::error!(worker = i, document_id = %id, error = %e, "Document lost");
                    }
                }
            }

            tracing::debug!(worker = i, "Document worker stopped");
        }));
    }
    handles
}
