//! # Docfeed Indexer
//!
//! Incremental bulk indexing of document files into a search backend.
//!
//! ## Pipeline
//!
//! ```text
//! Document list
//!     │
//!     ├──> Change filter (checkpoint vs mtime, then lastUpdateDate)
//!     │      └─> Included documents
//!     │
//!     ├──> Bulk request (built once, submitted once)
//!     │      └─> SearchBackend
//!     │
//!     └──> Result reconciler
//!            └─> FILES[INDEXED] / FILES[FAILED]
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use docfeed_backend::HttpBackend;
//! use docfeed_indexer::{BulkIndexer, CounterRegistry};
//! use docfeed_schema::JsonFormat;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> docfeed_indexer::Result<()> {
//!     let backend = Arc::new(HttpBackend::new("http://localhost:9200")?);
//!     let counters = Arc::new(CounterRegistry::new());
//!
//!     let indexer = BulkIndexer::new(
//!         vec!["data/doc1.json".into(), "data/doc2.json".into()],
//!         "akif",
//!         backend,
//!         Arc::new(JsonFormat),
//!         counters.clone(),
//!     )?;
//!     let stats = indexer.index().await?;
//!
//!     println!("Indexed {} of {} candidates", stats.indexed, stats.candidates);
//!     Ok(())
//! }
//! ```

mod charset;
mod checkpoint;
mod error;
mod filter;
mod metrics;
mod stats;
mod worker;

pub use charset::Charset;
pub use checkpoint::{read_checkpoint, unix_now_ms, write_checkpoint, PersistedCheckpoint};
pub use error::{IndexerError, Result};
pub use metrics::{CounterRegistry, MetricsSink, FILES_FAILED, FILES_INDEXED};
pub use stats::IndexStats;
pub use worker::{BulkIndexer, ParseFailureMode};
