//! Port for text formats that content records are stored in.

use crate::error::{ParseResult, SerializationResult};
use crate::key_order::SortedKeys;
use crate::value::Document;

/// A markup format that can read and write content records.
///
/// Implementations are stateless: every call is independent and may run
/// concurrently with others.
pub trait ContentFormat: Send + Sync {
    /// Human-readable name of the format.
    fn name(&self) -> &'static str;

    /// File extensions handled by this format, lower-case and without dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Decodes file content into a document.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`](crate::ParseError) if the text is malformed.
    fn from_file(&self, content: &str) -> ParseResult<Document>;

    /// Encodes a document, ordering mapping keys with `sorted_keys`.
    ///
    /// # Errors
    ///
    /// Returns a [`SerializationError`](crate::SerializationError) if the
    /// document holds a value the format cannot represent.
    fn to_file(&self, document: &Document, sorted_keys: &SortedKeys)
    -> SerializationResult<String>;
}
