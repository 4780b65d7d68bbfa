//! The pipeline orchestrator
//!
//! Drives one document at a time through the state machine, owning it by
//! value throughout: each step consumes the document and returns the
//! updated record, so no shared mutable state exists between stages.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use altdoc_classifier::{Classifier, ClassifierError};
use altdoc_domain::traits::{DocumentSink, EventSink, ModelProvider};
use altdoc_domain::{
    has_blocking, Confidence, Document, DocumentType, PipelineState, StatusEvent, StoredRecord,
};
use altdoc_extractor::ExtractorRegistry;
use altdoc_validator::Validator;
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Drives documents through classify, extract, validate, and store
///
/// Generic over the model provider and the two collaborator sinks, so
/// tests wire mocks at the same seams production uses. One orchestrator
/// serves many workers; it holds no per-document state.
pub struct Orchestrator<M, D, E>
where
    M: ModelProvider + 'static,
    M::Error: Display,
    D: DocumentSink,
    D::Error: Display,
    E: EventSink,
{
    classifier: Classifier<M>,
    registry: ExtractorRegistry,
    validator: Validator,
    sink: D,
    events: E,
    config: PipelineConfig,
    cancel: Arc<AtomicBool>,
}

impl<M, D, E> Orchestrator<M, D, E>
where
    M: ModelProvider + 'static,
    M::Error: Display,
    D: DocumentSink,
    D::Error: Display,
    E: EventSink,
{
    /// Assemble an orchestrator from its stage components
    pub fn new(
        classifier: Classifier<M>,
        registry: ExtractorRegistry,
        validator: Validator,
        sink: D,
        events: E,
        config: PipelineConfig,
    ) -> Self {
        Self {
            classifier,
            registry,
            validator,
            sink,
            events,
            config,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag that cancels in-flight documents at their next state
    /// entry; an in-progress model call still runs to completion
    pub fn cancellation_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Process one document to a terminal record
    ///
    /// Always produces and persists a `StoredRecord`: success ends in
    /// `stored`, every failure ends in `failed` with the error code from
    /// the taxonomy. The only `Err` here is a storage-sink failure, where
    /// no record could be persisted at all.
    pub async fn process(&self, document: Document) -> Result<StoredRecord, PipelineError> {
        let id = document.id;
        debug!(document_id = %id, "Processing document");

        match self.run(document).await {
            Ok(doc) => {
                info!(
                    document_id = %id,
                    doc_type = doc.doc_type.map(|t| t.as_str()),
                    "Document stored"
                );
                self.persist(record_from(doc, None))
            }
            Err((doc, err)) => {
                warn!(document_id = %id, code = err.code(), error = %err, "Document failed");
                let doc = self.fail(doc);
                self.persist(record_from(doc, Some(err)))
            }
        }
    }

    async fn run(&self, doc: Document) -> Result<Document, (Document, PipelineError)> {
        let doc = self.enter(doc, PipelineState::Classifying, None)?;

        let (doc, classification) = self.classify_with_retry(doc).await?;
        let confidence = classification.confidence;
        let mut doc = self.enter(doc, PipelineState::Classified, Some(confidence))?;
        doc.doc_type = Some(classification.value);
        doc.classification_confidence = Some(confidence);
        info!(
            document_id = %doc.id,
            doc_type = %classification.value,
            tier = %classification.tier,
            confidence = %confidence,
            evidence = %classification.evidence,
            "Classification complete"
        );

        // Unclassified skips extraction: validation emits the single
        // blocking finding and the document fails without retry.
        if classification.value == DocumentType::Unclassified {
            let mut doc = self.enter(doc, PipelineState::Validating, None)?;
            doc.validation_errors = self
                .validator
                .validate(DocumentType::Unclassified, &doc.fields);
            return Err((doc, PipelineError::Unclassified));
        }

        let doc = self.enter(doc, PipelineState::Extracting, None)?;
        let extractor = match self.registry.get(classification.value) {
            Ok(extractor) => extractor,
            Err(_) => {
                return Err((doc, PipelineError::UnsupportedType(classification.value)));
            }
        };
        let fields = extractor.extract(&doc.text, &doc.layout);
        let mut doc = self.enter(doc, PipelineState::Extracted, None)?;
        doc.fields = fields;
        debug!(document_id = %doc.id, fields = doc.fields.len(), "Extraction complete");

        let mut doc = self.enter(doc, PipelineState::Validating, None)?;
        doc.validation_errors = self.validator.validate(classification.value, &doc.fields);
        if has_blocking(&doc.validation_errors) {
            let blocking = doc
                .validation_errors
                .iter()
                .filter(|e| e.is_blocking())
                .count();
            return Err((doc, PipelineError::ValidationBlocking(blocking)));
        }

        self.enter(doc, PipelineState::Stored, None)
    }

    /// Classify, retrying transient model failures with exponential
    /// backoff up to the configured cap
    async fn classify_with_retry(
        &self,
        mut doc: Document,
    ) -> Result<(Document, altdoc_domain::ClassificationResult), (Document, PipelineError)> {
        loop {
            match self.classifier.classify(&doc.text, &doc.layout).await {
                Ok(result) => return Ok((doc, result)),
                Err(ClassifierError::TransientModel(msg)) => {
                    let transient = PipelineError::TransientModel(msg);
                    if doc.retry_count >= self.config.max_retries {
                        return Err((
                            doc,
                            PipelineError::ExhaustedRetries {
                                attempts: self.config.max_retries + 1,
                                last_error: transient.to_string(),
                            },
                        ));
                    }
                    let backoff = self.config.backoff(doc.retry_count);
                    doc.retry_count += 1;
                    warn!(
                        document_id = %doc.id,
                        retry = doc.retry_count,
                        max_retries = self.config.max_retries,
                        backoff_ms = backoff.as_millis() as u64,
                        code = transient.code(),
                        error = %transient,
                        "Transient model failure; retrying"
                    );
                    // Retries re-enter classifying; observers see them as
                    // a self-transition
                    self.events.emit(StatusEvent::now(
                        doc.id,
                        PipelineState::Classifying,
                        PipelineState::Classifying,
                        None,
                    ));
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }

    /// Transition into a state, checking cancellation at entry and
    /// emitting exactly one status event
    fn enter(
        &self,
        doc: Document,
        next: PipelineState,
        confidence: Option<Confidence>,
    ) -> Result<Document, (Document, PipelineError)> {
        if self.cancelled() {
            return Err((doc, PipelineError::Cancelled));
        }
        let from = doc.state;
        match doc.transition(next) {
            Ok(doc) => {
                self.events
                    .emit(StatusEvent::now(doc.id, from, next, confidence));
                Ok(doc)
            }
            Err((doc, msg)) => {
                error!(document_id = %doc.id, error = %msg, "Illegal transition attempted");
                Err((doc, PipelineError::IllegalTransition(msg)))
            }
        }
    }

    /// Best-effort move to `failed`; legal from every non-terminal state
    fn fail(&self, doc: Document) -> Document {
        if doc.is_terminal() {
            return doc;
        }
        let from = doc.state;
        match doc.transition(PipelineState::Failed) {
            Ok(doc) => {
                self.events
                    .emit(StatusEvent::now(doc.id, from, PipelineState::Failed, None));
                doc
            }
            Err((doc, msg)) => {
                error!(document_id = %doc.id, error = %msg, "Could not mark document failed");
                doc
            }
        }
    }

    fn persist(&self, record: StoredRecord) -> Result<StoredRecord, PipelineError> {
        self.sink
            .persist(&record)
            .map_err(|e| PipelineError::Storage(e.to_string()))?;
        Ok(record)
    }
}

fn record_from(doc: Document, err: Option<PipelineError>) -> StoredRecord {
    StoredRecord {
        document_id: doc.id,
        final_state: doc.state,
        doc_type: doc.doc_type,
        fields: doc.fields,
        validation_errors: doc.validation_errors,
        error_code: err.as_ref().map(|e| e.code().to_string()),
        error_message: err.map(|e| e.to_string()),
    }
}
