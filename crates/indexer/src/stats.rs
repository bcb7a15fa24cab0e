/// Outcome of one indexing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Candidate documents examined.
    pub candidates: u64,
    /// Excluded by the cheap mtime pre-filter, never read or parsed.
    pub skipped_unmodified: u64,
    /// Parsed, then excluded by the logical lastUpdateDate filter.
    pub skipped_stale: u64,
    /// Unparseable documents skipped (skip mode only).
    pub parse_failures: u64,
    /// Operations submitted in the bulk request.
    pub submitted: u64,
    /// Acknowledged by the backend.
    pub indexed: u64,
    /// Rejected per-item by the backend.
    pub failed: u64,
    /// Wall-clock duration of the pass, floored to 1ms.
    pub time_ms: u64,
}

impl IndexStats {
    pub fn new() -> Self {
        Self::default()
    }
}
