//! Bounded, persisted history of metric snapshots
//!
//! The buffer keeps the most recent `capacity` snapshots in arrival order. Every
//! append rewrites the whole JSON array on disk while the buffer lock is held, so
//! concurrent appends reach the file in the same order they reached the buffer.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::error::HistoryError;
use crate::types::MetricSnapshot;

/// Default number of retained snapshots (one day at one sample per minute)
pub const DEFAULT_CAPACITY: usize = 1440;

/// Default `limit` for history queries
pub const DEFAULT_QUERY_LIMIT: usize = 60;

pub struct HistoryStore {
    path: Option<PathBuf>,
    capacity: usize,
    buffer: Mutex<VecDeque<MetricSnapshot>>,
}

impl HistoryStore {
    /// Store persisting to `path`
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: Some(path.into()),
            capacity,
            buffer: Mutex::new(VecDeque::new()),
        }
    }

    /// Store that never touches the filesystem
    pub fn in_memory(capacity: usize) -> Self {
        Self {
            path: None,
            capacity,
            buffer: Mutex::new(VecDeque::new()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Restore the buffer from disk
    ///
    /// A missing, unreadable or corrupt file leaves the buffer empty. Only the most
    /// recent `capacity` entries of an oversized file are kept.
    pub async fn load(&self) {
        let Some(path) = &self.path else {
            return;
        };

        let entries = match read_snapshots(path).await {
            Ok(Some(entries)) => entries,
            Ok(None) => {
                tracing::info!("No history at {}, starting empty", path.display());
                return;
            }
            Err(e) => {
                tracing::warn!("Discarding history: {}", e);
                return;
            }
        };

        let skip = entries.len().saturating_sub(self.capacity);
        let mut buffer = self.buffer.lock().await;
        buffer.clear();
        buffer.extend(entries.into_iter().skip(skip));

        tracing::info!("Loaded {} history entries from {}", buffer.len(), path.display());
    }

    /// Append a snapshot, evict beyond capacity, then persist
    ///
    /// The in-memory append always succeeds; an `Err` only reports that the file
    /// could not be written.
    pub async fn append(&self, snapshot: MetricSnapshot) -> Result<(), HistoryError> {
        let mut buffer = self.buffer.lock().await;
        buffer.push_back(snapshot);
        while buffer.len() > self.capacity {
            buffer.pop_front();
        }

        match &self.path {
            Some(path) => write_snapshots(path, &buffer).await,
            None => Ok(()),
        }
    }

    /// The most recent `limit` snapshots, oldest first
    pub async fn query(&self, limit: usize) -> Vec<MetricSnapshot> {
        let buffer = self.buffer.lock().await;
        let skip = buffer.len().saturating_sub(limit);
        buffer.iter().skip(skip).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.buffer.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.buffer.lock().await.is_empty()
    }
}

async fn read_snapshots(path: &Path) -> Result<Option<Vec<MetricSnapshot>>, HistoryError> {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(HistoryError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_slice(&raw)
        .map(Some)
        .map_err(|source| HistoryError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
}

async fn write_snapshots(
    path: &Path,
    snapshots: &VecDeque<MetricSnapshot>,
) -> Result<(), HistoryError> {
    let json = serde_json::to_vec_pretty(snapshots)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| HistoryError::Write {
                path: path.to_path_buf(),
                source,
            })?;
    }

    tokio::fs::write(path, json)
        .await
        .map_err(|source| HistoryError::Write {
            path: path.to_path_buf(),
            source,
        })
}
