use crate::error::Result;
use std::path::Path;
use std::time::UNIX_EPOCH;

/// Inclusion rule shared by both filter stages: a document stays in
/// when its timestamp is at or past the checkpoint. An absent
/// timestamp counts as "always newer".
pub(crate) fn newer_than_checkpoint(checkpoint_ms: i64, timestamp_ms: Option<i64>) -> bool {
    match timestamp_ms {
        Some(ts) => ts >= checkpoint_ms,
        None => true,
    }
}

/// Filesystem mtime in UTC epoch milliseconds, `None` when the
/// platform does not report one. A missing file is still an I/O error.
pub(crate) async fn file_mtime_ms(path: &Path) -> Result<Option<i64>> {
    let metadata = tokio::fs::metadata(path).await?;
    let Ok(modified) = metadata.modified() else {
        return Ok(None);
    };
    let ms = modified
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);
    Ok(Some(ms))
}
