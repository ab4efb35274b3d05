use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    PageView {
        path: String,
    },
    Event {
        name: String,
        #[serde(default)]
        properties: BTreeMap<String, String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedEvent {
    pub occurred_at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: AnalyticsEvent,
}

/// Destination for tracked events (tag manager, warehouse, ...).
pub trait AnalyticsSink: Send + Sync {
    fn record(&self, event: RecordedEvent) -> Result<(), AnalyticsError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("analytics transport unavailable: {0}")]
    Transport(String),
}

/// Explicitly owned tracking context. Tracking failures are logged and swallowed.
#[derive(Clone)]
pub struct AnalyticsContext {
    sink: Arc<dyn AnalyticsSink>,
}

impl std::fmt::Debug for AnalyticsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsContext").finish_non_exhaustive()
    }
}

impl AnalyticsContext {
    pub fn new(sink: Arc<dyn AnalyticsSink>) -> Self {
        Self { sink }
    }

    pub fn page_view(&self, path: impl Into<String>) {
        self.track(AnalyticsEvent::PageView { path: path.into() });
    }

    pub fn event<I, K, V>(&self, name: impl Into<String>, properties: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let properties = properties
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self.track(AnalyticsEvent::Event {
            name: name.into(),
            properties,
        });
    }

    pub fn track(&self, event: AnalyticsEvent) {
        match &event {
            AnalyticsEvent::PageView { path } => info!(%path, "page view"),
            AnalyticsEvent::Event { name, .. } => info!(%name, "analytics event"),
        }
        let recorded = RecordedEvent {
            occurred_at: Utc::now(),
            event,
        };
        if let Err(err) = self.sink.record(recorded) {
            warn!(error = %err, "analytics event dropped");
        }
    }
}

/// Keeps the most recent events in memory.
#[derive(Debug, Clone)]
pub struct MemoryAnalytics {
    events: Arc<Mutex<VecDeque<RecordedEvent>>>,
    capacity: usize,
}

impl MemoryAnalytics {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events
            .lock()
            .map(|events| events.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for MemoryAnalytics {
    fn default() -> Self {
        Self::new(1_000)
    }
}

impl AnalyticsSink for MemoryAnalytics {
    fn record(&self, event: RecordedEvent) -> Result<(), AnalyticsError> {
        let mut events = self
            .events
            .lock()
            .map_err(|_| AnalyticsError::Transport("event buffer poisoned".to_string()))?;
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event);
        Ok(())
    }
}
