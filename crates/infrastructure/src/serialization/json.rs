//! Deterministic JSON output for content records.

use folio_domain::{
    ContentFormat, Document, Location, ParseError, ParseResult, SerializationError,
    SerializationResult, SortedKeys,
};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::schema::OutputSchema;

/// JSON format sharing the YAML output schema and key ordering.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
/// - Keys ordered with the caller's `SortedKeys`
#[derive(Debug, Clone, Default)]
pub struct JsonFormat {
    schema: OutputSchema,
}

impl JsonFormat {
    /// Creates a codec with timestamps and asset references registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a codec that encodes with `schema`.
    #[must_use]
    pub const fn with_schema(schema: OutputSchema) -> Self {
        Self { schema }
    }
}

impl ContentFormat for JsonFormat {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn from_file(&self, content: &str) -> ParseResult<Document> {
        from_json(content)
    }

    fn to_file(
        &self,
        document: &Document,
        sorted_keys: &SortedKeys,
    ) -> SerializationResult<String> {
        let plain = self.schema.resolve(document, sorted_keys)?;
        write_stable(&plain)
    }
}

/// Serializes a document to deterministic JSON.
///
/// # Errors
///
/// Returns an error if the document holds an unrepresentable value.
pub fn to_json_stable(
    document: &Document,
    sorted_keys: &SortedKeys,
) -> SerializationResult<String> {
    JsonFormat::new().to_file(document, sorted_keys)
}

/// Deserializes a document from a JSON string.
///
/// Handles both pretty-printed and minified JSON.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or repeats a key.
pub fn from_json(json: &str) -> ParseResult<Document> {
    tracing::debug!(bytes = json.len(), "decoding JSON document");
    serde_json::from_str(json).map_err(parse_error)
}

fn write_stable<T: Serialize>(value: &T) -> SerializationResult<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| SerializationError::Emit(e.to_string()))?;

    let mut json =
        String::from_utf8(buffer).map_err(|e| SerializationError::Emit(e.to_string()))?;
    json.push('\n'); // Trailing newline
    tracing::debug!(bytes = json.len(), "encoded JSON document");
    Ok(json)
}

fn parse_error(err: serde_json::Error) -> ParseError {
    let location = (err.line() > 0).then(|| Location::new(err.line(), err.column()));
    let full = err.to_string();
    let message = location
        .and_then(|l| full.strip_suffix(&format!(" at {l}")).map(str::to_string))
        .unwrap_or(full);
    ParseError::Syntax { message, location }
}
