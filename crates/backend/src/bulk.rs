/// One batch of upserts against a single destination.
///
/// Built incrementally during a pass and submitted at most once; the
/// request has no identity beyond that pass.
#[derive(Debug, Clone)]
pub struct BulkRequest {
    destination: String,
    operations: Vec<BulkOperation>,
}

/// A single upsert-by-id: the document's raw source, keyed by its
/// identifier within the request's destination.
#[derive(Debug, Clone)]
pub struct BulkOperation {
    pub id: String,
    pub source: String,
}

impl BulkRequest {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            operations: Vec::new(),
        }
    }

    pub fn push(&mut self, id: impl Into<String>, source: impl Into<String>) {
        self.operations.push(BulkOperation {
            id: id.into(),
            source: source.into(),
        });
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn operations(&self) -> &[BulkOperation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Consolidated outcome of one bulk submission: one [`BulkItem`] per
/// operation, in submission order.
#[derive(Debug, Clone, Default)]
pub struct BulkResponse {
    /// Batch-level signal: true iff at least one item failed. A clean
    /// response lets callers skip the per-item walk.
    pub errors: bool,
    pub items: Vec<BulkItem>,
}

impl BulkResponse {
    pub fn has_failures(&self) -> bool {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Outcome of a single operation: acknowledged, or failed with a
/// reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItem {
    pub id: String,
    pub error: Option<String>,
}

impl BulkItem {
    pub fn ok(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            error: None,
        }
    }

    pub fn failed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            error: Some(reason.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}
