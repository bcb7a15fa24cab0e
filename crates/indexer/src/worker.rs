use crate::charset::Charset;
use crate::checkpoint::unix_now_ms;
use crate::error::{IndexerError, Result};
use crate::filter::{file_mtime_ms, newer_than_checkpoint};
use crate::metrics::{MetricsSink, FILES_FAILED, FILES_INDEXED};
use crate::stats::IndexStats;
use docfeed_backend::{BulkRequest, BulkResponse, SearchBackend};
use docfeed_schema::RecordFormat;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// What to do when a candidate's content cannot be decoded or parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseFailureMode {
    /// Abort the whole pass: nothing is submitted, no counters move.
    /// A malformed document may mask a silent data-loss bug, so this
    /// is the default.
    #[default]
    Abort,
    /// Log the path, count it under `FILES[FAILED]`, continue with the
    /// remaining candidates.
    Skip,
}

/// One incremental indexing pass over a list of candidate documents.
///
/// A pass filters candidates against the checkpoint, accumulates the
/// survivors into a single bulk request, submits it once, and
/// reconciles the per-item outcomes into the metrics sink. Each pass
/// is a self-contained unit of work; concurrent passes over disjoint
/// document sets may share the backend handle and the sink.
pub struct BulkIndexer {
    files: Vec<PathBuf>,
    destination: String,
    charset: Charset,
    checkpoint_ms: i64,
    parse_failure_mode: ParseFailureMode,
    backend: Arc<dyn SearchBackend>,
    format: Arc<dyn RecordFormat>,
    metrics: Arc<dyn MetricsSink>,
    cancel: Option<Arc<AtomicBool>>,
}

impl BulkIndexer {
    /// Create a pass with the default configuration: UTF-8 content,
    /// checkpoint of "now" (nothing will be indexed unless documents
    /// claim a future update time), abort on parse failure.
    pub fn new(
        files: Vec<PathBuf>,
        destination: impl Into<String>,
        backend: Arc<dyn SearchBackend>,
        format: Arc<dyn RecordFormat>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Result<Self> {
        let destination = destination.into();
        if destination.trim().is_empty() {
            return Err(IndexerError::InvalidConfig(
                "destination must not be empty".into(),
            ));
        }
        Ok(Self {
            files,
            destination,
            charset: Charset::default(),
            checkpoint_ms: unix_now_ms(),
            parse_failure_mode: ParseFailureMode::default(),
            backend,
            format,
            metrics,
            cancel: None,
        })
    }

    pub fn with_checkpoint(mut self, checkpoint_ms: i64) -> Self {
        self.checkpoint_ms = checkpoint_ms;
        self
    }

    /// Set the charset by its configured name; unknown names fail fast
    /// before any I/O.
    pub fn with_charset(mut self, name: &str) -> Result<Self> {
        self.charset = Charset::parse(name)?;
        Ok(self)
    }

    pub fn with_parse_failure_mode(mut self, mode: ParseFailureMode) -> Self {
        self.parse_failure_mode = mode;
        self
    }

    /// Cooperative cancellation token, checked between candidates and
    /// never mid-parse. A cancelled pass fails without submitting.
    pub fn with_cancellation(mut self, token: Arc<AtomicBool>) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Run the pass: filter, submit, reconcile.
    ///
    /// Transport errors and (in abort mode) content errors fail the
    /// pass with no counter movement. Per-document rejections by the
    /// backend do not fail the pass; they end up in `stats.failed` and
    /// `FILES[FAILED]`.
    pub async fn index(&self) -> Result<IndexStats> {
        let start = Instant::now();
        let mut stats = IndexStats::new();

        log::debug!(
            "START bulk index pass: {} candidates against {:?} (checkpoint {})",
            self.files.len(),
            self.destination,
            self.checkpoint_ms
        );

        let mut request = BulkRequest::new(&self.destination);
        for path in &self.files {
            if let Some(cancel) = &self.cancel {
                if cancel.load(Ordering::Relaxed) {
                    log::warn!("bulk index pass cancelled after {} candidates", stats.candidates);
                    return Err(IndexerError::Cancelled);
                }
            }

            stats.candidates += 1;
            log::debug!("PROCESS file: {}", path.display());

            // Rule 1: cheap mtime pre-filter, skips the read and parse.
            let mtime_ms = file_mtime_ms(path).await?;
            if !newer_than_checkpoint(self.checkpoint_ms, mtime_ms) {
                stats.skipped_unmodified += 1;
                continue;
            }

            // Rule 2: the document's own lastUpdateDate decides.
            let parsed = self.read_and_parse(path).await;
            let (source, record) = match parsed {
                Ok(ok) => ok,
                Err(err) if err.is_content_error() => match self.parse_failure_mode {
                    ParseFailureMode::Abort => {
                        log::error!("failed to parse {}: {err}", path.display());
                        return Err(err);
                    }
                    ParseFailureMode::Skip => {
                        log::error!("skipping unparseable {}: {err}", path.display());
                        stats.parse_failures += 1;
                        self.metrics.increment(FILES_FAILED, 1);
                        continue;
                    }
                },
                Err(err) => return Err(err),
            };
            if !newer_than_checkpoint(self.checkpoint_ms, Some(record.last_update_ms())) {
                stats.skipped_stale += 1;
                continue;
            }

            request.push(record.identifier, source);
        }

        if request.is_empty() {
            log::debug!("no documents newer than checkpoint; skipping bulk submission");
            finish(&mut stats, start);
            return Ok(stats);
        }

        stats.submitted = request.len() as u64;
        let response = self.backend.submit(&request).await?;
        self.reconcile(&response, &mut stats);

        finish(&mut stats, start);
        log::info!("END bulk index pass: {stats:?}");
        Ok(stats)
    }

    /// Never-raising entry point: run the pass and log any failure.
    pub async fn run(&self) {
        if let Err(err) = self.index().await {
            log::error!("bulk index pass failed: {err}");
            log::debug!("bulk index pass failure detail: {err:?}");
        }
    }

    async fn read_and_parse(
        &self,
        path: &std::path::Path,
    ) -> Result<(String, docfeed_schema::DocumentRecord)> {
        let bytes = tokio::fs::read(path).await?;
        let source = self.charset.decode(bytes)?;
        let record = self.format.parse(&source)?;
        Ok((source, record))
    }

    fn reconcile(&self, response: &BulkResponse, stats: &mut IndexStats) {
        if !response.has_failures() {
            // Fast path: one increment for the whole clean batch.
            let total = response.len() as u64;
            stats.indexed += total;
            self.metrics.increment(FILES_INDEXED, total);
            return;
        }

        for item in &response.items {
            if let Some(reason) = &item.error {
                log::error!("document [{}] failed to get indexed: {reason}", item.id);
                stats.failed += 1;
                self.metrics.increment(FILES_FAILED, 1);
            } else {
                stats.indexed += 1;
                self.metrics.increment(FILES_INDEXED, 1);
            }
        }
    }
}

fn finish(stats: &mut IndexStats, start: Instant) {
    #[allow(clippy::cast_possible_truncation)]
    {
        stats.time_ms = start.elapsed().as_millis() as u64;
        if stats.time_ms == 0 {
            stats.time_ms = 1;
        }
    }
}
