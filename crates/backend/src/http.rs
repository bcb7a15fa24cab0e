use crate::bulk::{BulkItem, BulkRequest, BulkResponse};
use crate::error::{BackendError, Result};
use crate::SearchBackend;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Elasticsearch-compatible bulk backend.
///
/// Encodes the request as NDJSON (one action line plus one source line
/// per operation) and POSTs it to `<base>/_bulk`. No retry or backoff
/// here: transport errors propagate and external callers own the retry
/// policy.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let trimmed = base_url.trim_end_matches('/').to_string();
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(BackendError::InvalidUrl(base_url));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: trimmed,
        })
    }
}

#[async_trait]
impl SearchBackend for HttpBackend {
    async fn submit(&self, request: &BulkRequest) -> Result<BulkResponse> {
        let body = encode_bulk_body(request)?;
        let url = format!("{}/_bulk", self.base_url);
        log::debug!(
            "POST {url}: {} operations, {} bytes",
            request.len(),
            body.len()
        );

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::StatusError {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_bulk_response(&text)
    }
}

/// NDJSON body for a bulk request: per operation, an `index` action
/// line addressed by `(_index, _id)` followed by the document source
/// compacted onto one line.
pub(crate) fn encode_bulk_body(request: &BulkRequest) -> Result<String> {
    let mut body = String::new();
    for op in request.operations() {
        let action = serde_json::json!({
            "index": { "_index": request.destination(), "_id": op.id }
        });
        body.push_str(&action.to_string());
        body.push('\n');
        // Source lines must not span lines in NDJSON; re-serialize
        // compactly in case the file was pretty-printed.
        let source: Value = serde_json::from_str(&op.source)?;
        body.push_str(&source.to_string());
        body.push('\n');
    }
    Ok(body)
}

#[derive(Deserialize)]
struct RawBulkResponse {
    errors: bool,
    items: Vec<RawBulkItem>,
}

#[derive(Deserialize)]
struct RawBulkItem {
    index: RawItemBody,
}

#[derive(Deserialize)]
struct RawItemBody {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    error: Option<Value>,
}

/// Parse the standard `{took, errors, items: [...]}` bulk envelope.
pub(crate) fn parse_bulk_response(text: &str) -> Result<BulkResponse> {
    let raw: RawBulkResponse = serde_json::from_str(text)?;
    let items = raw
        .items
        .into_iter()
        .map(|item| BulkItem {
            id: item.index.id,
            error: item.index.error.map(error_reason),
        })
        .collect();
    Ok(BulkResponse {
        errors: raw.errors,
        items,
    })
}

fn error_reason(error: Value) -> String {
    match error.get("reason").and_then(Value::as_str) {
        Some(reason) => reason.to_string(),
        None => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn encodes_ndjson_action_and_source_lines() {
        let mut request = BulkRequest::new("akif");
        request.push("doc-1", r#"{"identifier": "doc-1", "lastUpdateDate": 5}"#);
        request.push("doc-2", "{\n  \"identifier\": \"doc-2\",\n  \"lastUpdateDate\": 6\n}");

        let body = encode_bulk_body(&request).unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], r#"{"index":{"_id":"doc-1","_index":"akif"}}"#);
        assert_eq!(lines[1], r#"{"identifier":"doc-1","lastUpdateDate":5}"#);
        assert_eq!(lines[2], r#"{"index":{"_id":"doc-2","_index":"akif"}}"#);
        assert_eq!(lines[3], r#"{"identifier":"doc-2","lastUpdateDate":6}"#);
        assert!(body.ends_with('\n'));
    }

    #[test]
    fn encode_rejects_non_json_source() {
        let mut request = BulkRequest::new("akif");
        request.push("doc-1", "not json");
        assert!(encode_bulk_body(&request).is_err());
    }

    #[test]
    fn parses_clean_response() {
        let response = parse_bulk_response(
            r#"{"took":3,"errors":false,"items":[
                {"index":{"_index":"akif","_id":"a","status":201}},
                {"index":{"_index":"akif","_id":"b","status":200}}
            ]}"#,
        )
        .unwrap();
        assert!(!response.has_failures());
        assert_eq!(response.len(), 2);
        assert_eq!(response.items[0], BulkItem::ok("a"));
    }

    #[test]
    fn parses_failed_items_with_reason() {
        let response = parse_bulk_response(
            r#"{"took":3,"errors":true,"items":[
                {"index":{"_index":"akif","_id":"a","status":201}},
                {"index":{"_index":"akif","_id":"b","status":400,
                          "error":{"type":"mapper_parsing_exception","reason":"bad field"}}}
            ]}"#,
        )
        .unwrap();
        assert!(response.has_failures());
        assert_eq!(response.items[1], BulkItem::failed("b", "bad field"));
    }

    #[test]
    fn parse_rejects_non_bulk_payload() {
        assert!(parse_bulk_response(r#"{"ok":true}"#).is_err());
    }
}
