use crate::error::{Result, SchemaError};
use crate::record::DocumentRecord;

/// Parse seam between raw file content and a [`DocumentRecord`].
///
/// Stands in for the serializer/deserializer the host configures per
/// destination; implementations must enforce the record invariants
/// (non-empty identifier, well-defined update time).
pub trait RecordFormat: Send + Sync {
    /// Short format name, used in logs and configuration.
    fn name(&self) -> &'static str;

    fn parse(&self, raw: &str) -> Result<DocumentRecord>;
}

/// The JSON document format.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl RecordFormat for JsonFormat {
    fn name(&self) -> &'static str {
        "json"
    }

    fn parse(&self, raw: &str) -> Result<DocumentRecord> {
        let record: DocumentRecord = serde_json::from_str(raw)?;
        if record.identifier.trim().is_empty() {
            return Err(SchemaError::EmptyIdentifier);
        }
        Ok(record)
    }
}
