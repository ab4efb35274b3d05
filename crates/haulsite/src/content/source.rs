use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, warn};

use super::domain::{ContentRecord, ContentTable};

/// Request/response access to the hosted content tables.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self, table: ContentTable) -> Result<Vec<Value>, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("content source unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read content document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed content document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("table `{0}` is not an array")]
    NotAList(ContentTable),
}

/// Reads every table from a single JSON document keyed by table name.
///
/// The document is re-read on each fetch so edits show up on the next catalog load.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn fetch(&self, table: ContentTable) -> Result<Vec<Value>, SourceError> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        let mut document: HashMap<String, Value> = serde_json::from_slice(&raw)?;
        match document.remove(table.name()) {
            Some(Value::Array(rows)) => Ok(rows),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(_) => Err(SourceError::NotAList(table)),
        }
    }
}

/// Fixed in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    tables: HashMap<ContentTable, Vec<Value>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: ContentTable, rows: Vec<Value>) -> Self {
        self.tables.insert(table, rows);
        self
    }
}

#[async_trait]
impl RecordSource for StaticSource {
    async fn fetch(&self, table: ContentTable) -> Result<Vec<Value>, SourceError> {
        Ok(self.tables.get(&table).cloned().unwrap_or_default())
    }
}

/// Source that always fails, used when no content document is configured.
#[derive(Debug, Clone)]
pub struct UnavailableSource(pub String);

#[async_trait]
impl RecordSource for UnavailableSource {
    async fn fetch(&self, _table: ContentTable) -> Result<Vec<Value>, SourceError> {
        Err(SourceError::Unavailable(self.0.clone()))
    }
}

/// Fetches and validates the rows of `T`'s table.
///
/// A failed fetch degrades to an empty list. Rows that fail to deserialize or validate,
/// and rows repeating an earlier key, are dropped. Both cases are logged, never raised.
pub async fn load_records<T, S>(source: &S) -> Vec<T>
where
    T: ContentRecord,
    S: RecordSource + ?Sized,
{
    let rows = match source.fetch(T::TABLE).await {
        Ok(rows) => rows,
        Err(err) => {
            error!(table = %T::TABLE, error = %err, "content fetch failed; serving empty list");
            return Vec::new();
        }
    };

    let total = rows.len();
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(total);

    for (index, row) in rows.into_iter().enumerate() {
        let record: T = match serde_json::from_value(row) {
            Ok(record) => record,
            Err(err) => {
                warn!(table = %T::TABLE, index, error = %err, "dropping malformed content row");
                continue;
            }
        };
        if let Err(err) = record.validate() {
            warn!(table = %T::TABLE, index, error = %err, "dropping invalid content row");
            continue;
        }
        if !seen.insert(record.record_key().clone()) {
            warn!(table = %T::TABLE, key = %record.record_key(), "dropping duplicate content key");
            continue;
        }
        records.push(record);
    }

    debug!(table = %T::TABLE, loaded = records.len(), total, "content table loaded");
    records
}
