use crate::bulk::{BulkItem, BulkRequest, BulkResponse};
use crate::error::Result;
use crate::SearchBackend;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;

/// In-memory backend keyed by (destination, id).
///
/// Drives the end-to-end tests and doubles as a store for embedding
/// hosts. Ids listed via [`MemoryBackend::failing`] are rejected
/// per-item, the way a live backend reports mapping conflicts.
#[derive(Default)]
pub struct MemoryBackend {
    documents: Mutex<HashMap<(String, String), String>>,
    fail_ids: HashSet<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that rejects the given ids with a per-item failure.
    pub fn failing<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            documents: Mutex::new(HashMap::new()),
            fail_ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub async fn document(&self, destination: &str, id: &str) -> Option<String> {
        self.documents
            .lock()
            .await
            .get(&(destination.to_string(), id.to_string()))
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.documents.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.lock().await.is_empty()
    }
}

#[async_trait]
impl SearchBackend for MemoryBackend {
    async fn submit(&self, request: &BulkRequest) -> Result<BulkResponse> {
        let mut documents = self.documents.lock().await;
        let mut response = BulkResponse::default();
        for op in request.operations() {
            if self.fail_ids.contains(&op.id) {
                response.errors = true;
                response
                    .items
                    .push(BulkItem::failed(&op.id, "rejected by backend"));
                continue;
            }
            documents.insert(
                (request.destination().to_string(), op.id.clone()),
                op.source.clone(),
            );
            response.items.push(BulkItem::ok(&op.id));
        }
        Ok(response)
    }
}
