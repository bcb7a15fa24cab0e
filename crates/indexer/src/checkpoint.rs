use crate::error::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current UTC time in epoch milliseconds, the checkpoint unit.
pub fn unix_now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Checkpoint persisted between runs by the host: the start time of
/// the last successful pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedCheckpoint {
    pub checkpoint_ms: i64,
    pub written_at_ms: i64,
}

pub async fn read_checkpoint(path: &Path) -> Result<Option<PersistedCheckpoint>> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = tokio::fs::read(path).await?;
    Ok(Some(serde_json::from_slice(&bytes)?))
}

/// Write the checkpoint atomically (tmp file + rename) so a crashed
/// run never leaves a truncated checkpoint behind.
pub async fn write_checkpoint(path: &Path, checkpoint_ms: i64) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let persisted = PersistedCheckpoint {
        checkpoint_ms,
        written_at_ms: unix_now_ms(),
    };
    let bytes = serde_json::to_vec_pretty(&persisted)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn missing_checkpoint_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkpoint.json");
        assert_eq!(read_checkpoint(&path).await.unwrap(), None);
    }

    #[tokio::test]
    async fn checkpoint_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkpoint.json");

        write_checkpoint(&path, 1_700_000_000_000).await.unwrap();
        let persisted = read_checkpoint(&path).await.unwrap().unwrap();
        assert_eq!(persisted.checkpoint_ms, 1_700_000_000_000);
        assert!(persisted.written_at_ms >= 1_700_000_000_000);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn rewrite_replaces_previous_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkpoint.json");

        write_checkpoint(&path, 1).await.unwrap();
        write_checkpoint(&path, 2).await.unwrap();
        let persisted = read_checkpoint(&path).await.unwrap().unwrap();
        assert_eq!(persisted.checkpoint_ms, 2);
    }

    #[tokio::test]
    async fn corrupt_checkpoint_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkpoint.json");
        tokio::fs::write(&path, b"{broken").await.unwrap();
        assert!(read_checkpoint(&path).await.is_err());
    }
}
