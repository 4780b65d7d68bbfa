//! Command implementations.

use crate::cli::{ClassifyArgs, ProcessArgs};
use altdoc_classifier::Classifier;
use altdoc_domain::{Document, DocumentId, Layout, PipelineState, StoredRecord};
use altdoc_extractor::ExtractorRegistry;
use altdoc_pipeline::{
    spawn_document_workers, MemorySink, Orchestrator, PipelineConfig, SharedReceiver,
    TracingEventSink,
};
use altdoc_validator::Validator;
use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Run files through the full pipeline; returns true when every document
/// reached `stored`.
pub async fn execute_process(args: ProcessArgs, config: PipelineConfig, json: bool) -> Result<bool> {
    let sink = MemorySink::new();
    let orchestrator = Arc::new(Orchestrator::new(
        Classifier::rule_only(config.classifier.clone()),
        ExtractorRegistry::with_defaults(config.extractor.clone())?,
        Validator::new(config.validator.clone())?,
        sink.clone(),
        TracingEventSink,
        config.clone(),
    ));

    info!(
        files = args.paths.len(),
        workers = config.workers,
        "Processing documents"
    );

    let (tx, rx) = mpsc::unbounded_channel();
    let handles = spawn_document_workers(
        config.workers,
        SharedReceiver::new_unbounded(rx),
        orchestrator,
    );

    let mut submitted: Vec<(PathBuf, DocumentId)> = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        let doc = read_document(path)?;
        debug!(document_id = %doc.id, path = %path.display(), "Submitting document");
        submitted.push((path.clone(), doc.id));
        tx.send(doc)
            .map_err(|_| anyhow!("Worker pool shut down unexpectedly"))?;
    }
    drop(tx);
    for handle in handles {
        handle.await.context("Worker task panicked")?;
    }

    // Workers interleave; report in the order files were given
    let mut records: HashMap<DocumentId, StoredRecord> = sink
        .records()
        .into_iter()
        .map(|r| (r.document_id, r))
        .collect();
    let mut all_stored = true;
    for (path, id) in &submitted {
        let record = records
            .remove(id)
            .ok_or_else(|| anyhow!("No record for {}", path.display()))?;
        if record.final_state != PipelineState::Stored {
            all_stored = false;
        }
        print_record(path, &record, json)?;
    }
    Ok(all_stored)
}

/// Classify files without extraction.
pub async fn execute_classify(args: ClassifyArgs, config: PipelineConfig, json: bool) -> Result<()> {
    let classifier = Classifier::rule_only(config.classifier.clone());
    for path in &args.paths {
        let text = read_text(path)?;
        let layout = Layout::from_text(&text);
        let result = classifier
            .classify(&text, &layout)
            .await
            .map_err(|e| anyhow!("Classification failed for {}: {}", path.display(), e))?;
        if json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "{}: {} (confidence {:.2}, tier {})",
                path.display(),
                result.value,
                result.confidence.value(),
                result.tier
            );
        }
    }
    Ok(())
}

/// Load the pipeline configuration, or defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            debug!(path = %path.display(), "Loading configuration file");
            PipelineConfig::from_toml(&raw).map_err(|e| anyhow!(e))?
        }
        None => PipelineConfig::default(),
    };
    config.validate().map_err(|e| anyhow!(e))?;
    Ok(config)
}

fn read_document(path: &Path) -> Result<Document> {
    let text = read_text(path)?;
    Ok(Document::from_text(DocumentId::new(), text))
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document file {}", path.display()))
}

fn print_record(path: &Path, record: &StoredRecord, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    match record.final_state {
        PipelineState::Stored => {
            let warnings = record.validation_errors.len();
            println!(
                "{}: stored as {} ({} fields, {} warning(s))",
                path.display(),
                record
                    .doc_type
                    .map(|t| t.as_str())
                    .unwrap_or("unclassified"),
                record.fields.len(),
                warnings
            );
        }
        _ => {
            println!(
                "{}: failed [{}] {}",
                path.display(),
                record.error_code.as_deref().unwrap_or("unknown"),
                record.error_message.as_deref().unwrap_or("")
            );
            for finding in &record.validation_errors {
                println!("  - {} ({}): {}", finding.field, finding.rule_id, finding.message);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_defaults_without_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_load_config_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_retries = 1\nretry_backoff_ms = 10\nworkers = 2").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.workers, 2);
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "max_retries = 1\nretry_backoff_ms = 10\nworkers = 0"
        )
        .unwrap();
        assert!(load_config(Some(file.path())).is_err());
    }
}
