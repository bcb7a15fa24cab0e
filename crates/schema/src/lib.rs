//! # Docfeed Schema
//!
//! Shared document record types for the docfeed pipeline.
//!
//! A document file carries an arbitrary JSON object; the indexing
//! decision logic only cares about two fields of it: a unique
//! `identifier` and a `lastUpdateDate`. [`DocumentRecord`] captures
//! exactly those, and [`RecordFormat`] is the seam through which raw
//! file content becomes a record.

mod error;
mod format;
mod record;

pub use error::{Result, SchemaError};
pub use format::{JsonFormat, RecordFormat};
pub use record::DocumentRecord;
