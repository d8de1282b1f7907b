//! In-memory store of finished workbooks awaiting download.

use std::collections::VecDeque;
use std::sync::Arc;

use axum::body::Bytes;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Bounded FIFO of rendered `.xlsx` buffers keyed by a random id.
///
/// Holds at most `capacity` workbooks; inserting past that evicts the oldest.
/// Clones share the same entries.
#[derive(Debug, Clone)]
pub struct ExportCache {
    capacity: usize,
    entries: Arc<Mutex<VecDeque<(Uuid, Bytes)>>>,
}

impl ExportCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
        }
    }

    /// Stores `bytes` and returns the id to download them with.
    pub async fn insert(&self, bytes: Bytes) -> Uuid {
        let id = Uuid::new_v4();
        let mut entries = self.entries.lock().await;
        while entries.len() >= self.capacity {
            if let Some((evicted, _)) = entries.pop_front() {
                tracing::debug!(export_id = %evicted, "evicting cached export");
            }
        }
        entries.push_back((id, bytes));
        id
    }

    pub async fn get(&self, id: &Uuid) -> Option<Bytes> {
        self.entries
            .lock()
            .await
            .iter()
            .find(|(entry_id, _)| entry_id == id)
            .map(|(_, bytes)| bytes.clone())
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}
