//! YAML codec for content records.
//!
//! Decoding uses the standard safe schema only: timestamps and asset
//! references come back as plain strings. Encoding runs the document through
//! an [`OutputSchema`] first, so custom kinds reach the emitter as plain
//! scalars and mapping keys are already in their final order.

use folio_domain::{
    ContentFormat, Document, Location, Mapping, Number, ParseError, ParseResult,
    SerializationError, SerializationResult, SortedKeys, Value,
};
use serde::Serialize;

use super::schema::{EncodeOptions, OutputSchema};

/// Why a library value could not become a document value.
#[derive(Debug)]
enum Rejected {
    Tag(String),
    CollectionKey,
    DuplicateKey(String),
}

/// YAML format with the extended output schema.
#[derive(Debug, Clone, Default)]
pub struct YamlFormat {
    schema: OutputSchema,
}

impl YamlFormat {
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

    /// Returns the output schema.
    #[must_use]
    pub const fn schema(&self) -> &OutputSchema {
        &self.schema
    }

    /// Parses YAML text into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not well-formed YAML, holds more than
    /// one document, repeats a key or uses an application tag.
    pub fn decode(&self, text: &str) -> ParseResult<Document> {
        tracing::debug!(bytes = text.len(), "decoding YAML document");

        let raw: serde_yaml::Value = serde_yaml::from_str(text).map_err(parse_error)?;

        plain_value(raw).map_err(|rejected| match rejected {
            Rejected::Tag(tag) => ParseError::UnknownTag(tag),
            Rejected::CollectionKey => ParseError::UnsupportedKey("collection".to_string()),
            Rejected::DuplicateKey(key) => ParseError::DuplicateKey(key),
        })
    }

    /// Renders a document as YAML, ordering keys with `sorted_keys`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document holds a value the schema cannot
    /// represent.
    pub fn encode(
        &self,
        document: &Document,
        sorted_keys: &SortedKeys,
    ) -> SerializationResult<String> {
        let plain = self.schema.resolve(document, sorted_keys)?;
        let text =
            serde_yaml::to_string(&plain).map_err(|e| SerializationError::Emit(e.to_string()))?;
        tracing::debug!(bytes = text.len(), "encoded YAML document");
        Ok(text)
    }
}

impl ContentFormat for YamlFormat {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["yml", "yaml"]
    }

    fn from_file(&self, content: &str) -> ParseResult<Document> {
        self.decode(content)
    }

    fn to_file(
        &self,
        document: &Document,
        sorted_keys: &SortedKeys,
    ) -> SerializationResult<String> {
        self.encode(document, sorted_keys)
    }
}

/// Parses YAML text with the safe schema.
///
/// # Errors
///
/// Returns an error if the text is not well-formed.
pub fn from_yaml(text: &str) -> ParseResult<Document> {
    YamlFormat::new().decode(text)
}

/// Renders a document as YAML with the extended schema.
///
/// # Errors
///
/// Returns an error if the document holds an unrepresentable value.
pub fn to_yaml(document: &Document, sorted_keys: &SortedKeys) -> SerializationResult<String> {
    YamlFormat::new().encode(document, sorted_keys)
}

/// Renders a document as YAML using encoder settings.
///
/// # Errors
///
/// Returns an error if the document holds a value the configured schema
/// cannot represent.
pub fn to_yaml_with(document: &Document, options: &EncodeOptions) -> SerializationResult<String> {
    YamlFormat::with_schema(options.schema.schema()).encode(document, &options.sorted_keys)
}

/// Converts any serializable value into a document.
///
/// Scalar map keys are turned into strings.
///
/// # Errors
///
/// Returns an error for values a document cannot hold: enum variants with
/// data, collection map keys, or keys that collide once stringified.
pub fn to_document<T: Serialize + ?Sized>(value: &T) -> SerializationResult<Document> {
    let raw = serde_yaml::to_value(value).map_err(|e| SerializationError::Emit(e.to_string()))?;
    plain_value(raw).map_err(|rejected| match rejected {
        Rejected::Tag(tag) => SerializationError::unrepresentable(format!("tagged value {tag}")),
        Rejected::CollectionKey => SerializationError::unrepresentable("collection mapping key"),
        Rejected::DuplicateKey(key) => {
            SerializationError::unrepresentable(format!("duplicate mapping key {key}"))
        }
    })
}

fn plain_value(raw: serde_yaml::Value) -> Result<Value, Rejected> {
    Ok(match raw {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => Value::Number(plain_number(&n)),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .map(plain_value)
                .collect::<Result<_, _>>()?,
        ),
        serde_yaml::Value::Mapping(entries) => {
            let mut map = Mapping::with_capacity(entries.len());
            for (key, item) in entries {
                let key = plain_key(key)?;
                if map.contains_key(&key) {
                    return Err(Rejected::DuplicateKey(key));
                }
                map.insert(key, plain_value(item)?);
            }
            Value::Mapping(map)
        }
        serde_yaml::Value::Tagged(tagged) => return Err(Rejected::Tag(tagged.tag.to_string())),
    })
}

fn plain_key(key: serde_yaml::Value) -> Result<String, Rejected> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Number(n) => Ok(plain_number(&n).to_string()),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => {
            Err(Rejected::CollectionKey)
        }
        serde_yaml::Value::Tagged(tagged) => Err(Rejected::Tag(tagged.tag.to_string())),
    }
}

fn plain_number(n: &serde_yaml::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::Integer(i)
    } else if let Some(u) = n.as_u64() {
        Number::Unsigned(u)
    } else {
        Number::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn parse_error(err: serde_yaml::Error) -> ParseError {
    let location = err
        .location()
        .map(|mark| Location::new(mark.line(), mark.column()));
    let full = err.to_string();
    let message = location
        .and_then(|l| full.strip_suffix(&format!(" at {l}")).map(str::to_string))
        .unwrap_or(full);
    ParseError::Syntax { message, location }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::SchemaKind;
    use chrono::NaiveDate;
    use folio_domain::{AssetReference, TimestampValue};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_keeps_document_order() {
        let doc = from_yaml("title: Hello\ndraft: false\ncount: 3\n").unwrap();
        let keys: Vec<&str> = doc
            .as_mapping()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["title", "draft", "count"]);
        assert_eq!(doc.get("draft"), Some(&Value::Bool(false)));
        assert_eq!(doc.get("count"), Some(&Value::from(3_i64)));
    }

    #[test]
    fn test_decode_dates_as_plain_strings() {
        let doc = from_yaml("date: 2020-01-02\nimage: /images/photo.png\n").unwrap();
        assert_eq!(doc.get("date"), Some(&Value::from("2020-01-02")));
        assert_eq!(doc.get("image"), Some(&Value::from("/images/photo.png")));
    }

    #[test]
    fn test_decode_empty_text_is_null() {
        assert_eq!(from_yaml("").unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_stringifies_scalar_keys() {
        let doc = from_yaml("1: one\ntrue: yes\n").unwrap();
        assert_eq!(doc.get("1"), Some(&Value::from("one")));
        assert_eq!(doc.get("true"), Some(&Value::from("yes")));
    }

    #[test]
    fn test_decode_rejects_colliding_keys() {
        let err = from_yaml("1: a\n'1': b\n").unwrap_err();
        assert_eq!(err, ParseError::DuplicateKey("1".to_string()));
    }

    #[test]
    fn test_decode_rejects_collection_keys() {
        let err = from_yaml("? [a, b]\n: c\n").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedKey(_)));
    }

    #[test]
    fn test_decode_rejects_application_tags() {
        let err = from_yaml("value: !custom thing\n").unwrap_err();
        assert!(matches!(err, ParseError::UnknownTag(_)));
    }

    #[test]
    fn test_decode_keeps_double_angle_key() {
        let doc = from_yaml("page:\n  <<:\n    layout: post\n  title: Hi\n").unwrap();
        let page = doc.get("page").unwrap();
        assert_eq!(
            page.get("<<").and_then(|v| v.get("layout")),
            Some(&Value::from("post"))
        );
        assert_eq!(page.get("layout"), None);
        assert_eq!(
            from_yaml("'<<': 1\n").unwrap().get("<<"),
            Some(&Value::from(1_i64))
        );
    }

    #[test]
    fn test_syntax_error_has_location() {
        let err = from_yaml("a: [1, 2\nb: 3\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        assert!(err.location().is_some());
    }

    #[test]
    fn test_encode_custom_scalars_bare() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        let doc: Value = [
            ("date", Value::from(TimestampValue::from_date(date, "YYYY-MM-DD"))),
            ("image", Value::from(AssetReference::new("/images/photo.png"))),
        ]
        .into_iter()
        .collect();

        let text = to_yaml(&doc, &SortedKeys::default()).unwrap();
        assert_eq!(text, "date: 2020-01-02\nimage: /images/photo.png\n");
    }

    #[test]
    fn test_encode_with_safe_schema_rejects_timestamp() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        let doc: Value = [("date", TimestampValue::from_date(date, "YYYY-MM-DD"))]
            .into_iter()
            .collect();
        let options = EncodeOptions {
            schema: SchemaKind::Safe,
            ..EncodeOptions::default()
        };

        let err = to_yaml_with(&doc, &options).unwrap_err();
        assert_eq!(err, SerializationError::unrepresentable("timestamp"));
    }

    #[test]
    fn test_to_document_from_struct() {
        #[derive(Serialize)]
        struct Post {
            title: &'static str,
            tags: Vec<&'static str>,
        }

        let doc = to_document(&Post {
            title: "Hello",
            tags: vec!["a", "b"],
        })
        .unwrap();
        assert_eq!(doc.get("title"), Some(&Value::from("Hello")));
        assert_eq!(
            doc.get("tags"),
            Some(&Value::from(vec![Value::from("a"), Value::from("b")]))
        );
    }

    #[test]
    fn test_to_document_rejects_enum_with_data() {
        #[derive(Serialize)]
        enum Block {
            Quote(String),
        }

        let err = to_document(&Block::Quote("x".to_string())).unwrap_err();
        assert!(matches!(err, SerializationError::Unrepresentable { .. }));
    }
}
