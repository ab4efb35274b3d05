use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{info, warn};

use super::notices::{Notice, NoticeBus};

/// Public address of a stored file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(pub String);

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file attached to a form, as received from the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Outcome of an upload. Failures never escape as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Stored(Locator),
    Failed { notice: Notice, cause: FailureCause },
}

/// Whether a failed upload was refused up front or lost in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// Empty, oversized, or aimed at an invalid destination.
    Rejected,
    Storage,
}

impl UploadOutcome {
    pub fn locator(&self) -> Option<&Locator> {
        match self {
            UploadOutcome::Stored(locator) => Some(locator),
            UploadOutcome::Failed { .. } => None,
        }
    }

    pub fn is_stored(&self) -> bool {
        matches!(self, UploadOutcome::Stored(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("file is empty")]
    Empty,
    #[error("file is {size} bytes; the limit is {limit}")]
    TooLarge { size: usize, limit: usize },
    #[error("invalid destination `{0}`")]
    InvalidDestination(String),
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl UploadError {
    pub fn cause(&self) -> FailureCause {
        match self {
            UploadError::Empty
            | UploadError::TooLarge { .. }
            | UploadError::InvalidDestination(_) => FailureCause::Rejected,
            UploadError::Storage(_) | UploadError::Io { .. } => FailureCause::Storage,
        }
    }
}

/// Store-a-file boundary of the hosted storage bucket.
#[async_trait]
pub trait UploadSink: Send + Sync {
    async fn store(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<Locator, UploadError>;
}

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 8;

/// Builds `{destination}/{unix millis}-{random suffix}.{ext}` for a new object.
///
/// The extension comes from `original_name`, lower-cased, and is left off when the name
/// has none. Destinations may nest folders but not climb out of the bucket.
pub fn storage_path<R: Rng + ?Sized>(
    destination: &str,
    original_name: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<String, UploadError> {
    let folder = destination.trim().trim_matches('/');
    let bad_segment = folder
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if !folder.is_empty() && (bad_segment || folder.contains('\\')) {
        return Err(UploadError::InvalidDestination(destination.to_string()));
    }

    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect();

    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();

    let file_name = format!("{}-{}{}", now.timestamp_millis(), suffix, extension);
    if folder.is_empty() {
        Ok(file_name)
    } else {
        Ok(format!("{folder}/{file_name}"))
    }
}

/// Writes objects below a local directory served under `public_base_url`.
#[derive(Debug, Clone)]
pub struct DiskUploadSink {
    root: PathBuf,
    public_base_url: String,
}

impl DiskUploadSink {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl UploadSink for DiskUploadSink {
    async fn store(
        &self,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<Locator, UploadError> {
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| UploadError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|source| UploadError::Io {
                path: target.clone(),
                source,
            })?;
        Ok(Locator(format!("{}/{}", self.public_base_url, path)))
    }
}

/// Stores form attachments, converting every failure into a notice.
#[derive(Debug)]
pub struct FileUploader<U> {
    sink: Arc<U>,
    notices: NoticeBus,
    max_bytes: usize,
}

impl<U> Clone for FileUploader<U> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            notices: self.notices.clone(),
            max_bytes: self.max_bytes,
        }
    }
}

impl<U> FileUploader<U>
where
    U: UploadSink + 'static,
{
    pub fn new(sink: Arc<U>, notices: NoticeBus, max_bytes: usize) -> Self {
        Self {
            sink,
            notices,
            max_bytes,
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub async fn upload(&self, file: UploadFile, destination: &str) -> UploadOutcome {
        let name = file.name.clone();
        match self.try_upload(file, destination).await {
            Ok(locator) => {
                info!(file = %name, %locator, "upload stored");
                UploadOutcome::Stored(locator)
            }
            Err(err) => {
                warn!(file = %name, destination, error = %err, "upload failed");
                let notice = Notice::error(format!(
                    "We couldn't upload {name}. Please try again or choose a different file."
                ));
                self.notices.publish(notice.clone());
                UploadOutcome::Failed {
                    notice,
                    cause: err.cause(),
                }
            }
        }
    }

    async fn try_upload(
        &self,
        file: UploadFile,
        destination: &str,
    ) -> Result<Locator, UploadError> {
        if file.bytes.is_empty() {
            return Err(UploadError::Empty);
        }
        if file.bytes.len() > self.max_bytes {
            return Err(UploadError::TooLarge {
                size: file.bytes.len(),
                limit: self.max_bytes,
            });
        }

        let path = storage_path(destination, &file.name, Utc::now(), &mut rand::thread_rng())?;
        let content_type = mime_guess::from_path(&file.name)
            .first_or_octet_stream()
            .to_string();
        self.sink.store(&path, file.bytes, &content_type).await
    }

    /// Uploads every file independently; outcomes come back in input order.
    pub async fn upload_all(
        &self,
        files: Vec<UploadFile>,
        destination: &str,
    ) -> Vec<UploadOutcome> {
        let mut tasks = JoinSet::new();
        for (index, file) in files.into_iter().enumerate() {
            let uploader = self.clone();
            let destination = destination.to_string();
            tasks.spawn(async move { (index, uploader.upload(file, &destination).await) });
        }

        let aborted = UploadOutcome::Failed {
            notice: Notice::error("An upload was interrupted. Please try again."),
            cause: FailureCause::Storage,
        };
        let mut outcomes = vec![aborted; tasks.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => outcomes[index] = outcome,
                Err(err) => warn!(error = %err, "upload task aborted"),
            }
        }
        outcomes
    }
}
