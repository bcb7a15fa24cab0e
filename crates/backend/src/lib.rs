//! # Docfeed Backend
//!
//! Search-backend capability for bulk document writes.
//!
//! One pass of the indexer produces a single [`BulkRequest`] and hands
//! it to a [`SearchBackend`]; the backend answers with ordered per-item
//! outcomes in a [`BulkResponse`]. Two implementations ship here:
//!
//! - [`HttpBackend`]: Elasticsearch-compatible `_bulk` endpoint over
//!   HTTP (NDJSON body, standard response envelope).
//! - [`MemoryBackend`]: in-memory store with injectable per-id
//!   failures, for tests and embedding hosts.

mod bulk;
mod error;
mod http;
mod memory;

pub use bulk::{BulkItem, BulkOperation, BulkRequest, BulkResponse};
pub use error::{BackendError, Result};
pub use http::HttpBackend;
pub use memory::MemoryBackend;

use async_trait::async_trait;

/// A configured handle to the search backend.
///
/// Stateless from the caller's perspective: a single handle may be
/// shared read-only (`Arc<dyn SearchBackend>`) across concurrent
/// passes.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Submit one batch of upserts and block until the backend returns
    /// a consolidated result. Transport failures surface as errors;
    /// per-document rejections surface inside the response.
    async fn submit(&self, request: &BulkRequest) -> Result<BulkResponse>;
}
