use async_trait::async_trait;
use haulsite::config::ContentConfig;
use haulsite::content::{ContentCatalog, JsonFileSource, UnavailableSource};
use haulsite::intake::{SubmissionError, SubmissionId, SubmissionRecord, SubmissionSink};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) upload_dir: Arc<PathBuf>,
}

/// Keeps submissions for the lifetime of the process.
#[derive(Default, Clone)]
pub(crate) struct InMemorySubmissionStore {
    records: Arc<Mutex<HashMap<SubmissionId, SubmissionRecord>>>,
}

impl InMemorySubmissionStore {
    pub(crate) fn records(&self) -> Vec<SubmissionRecord> {
        let mut records: Vec<SubmissionRecord> = self
            .records
            .lock()
            .map(|guard| guard.values().cloned().collect())
            .unwrap_or_default();
        records.sort_by_key(|record| record.submitted_at);
        records
    }
}

#[async_trait]
impl SubmissionSink for InMemorySubmissionStore {
    async fn persist(&self, record: SubmissionRecord) -> Result<(), SubmissionError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| SubmissionError::Unavailable("submission store poisoned".to_string()))?;
        if guard.contains_key(&record.id) {
            return Err(SubmissionError::Conflict);
        }
        guard.insert(record.id.clone(), record);
        Ok(())
    }
}

/// Loads the catalog from `CONTENT_PATH`, or serves empty lists when it is unset.
pub(crate) async fn load_catalog(config: &ContentConfig) -> ContentCatalog {
    match &config.content_path {
        Some(path) => {
            ContentCatalog::load(&JsonFileSource::new(path), config.related_posts_limit).await
        }
        None => {
            warn!("CONTENT_PATH is not set; content routes will return empty lists");
            let source = UnavailableSource("no content document configured".to_string());
            ContentCatalog::load(&source, config.related_posts_limit).await
        }
    }
}
