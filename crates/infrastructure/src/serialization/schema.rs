//! Output schema: custom scalar kinds checked ahead of the standard ones.

use std::fmt;
use std::sync::Arc;

use folio_domain::{Mapping, SerializationError, SerializationResult, SortedKeys, Value};
use serde::{Deserialize, Serialize};

/// A custom scalar kind the encoder can emit.
///
/// `recognizes` selects values by their concrete kind; `represent` renders a
/// recognized value to the text of a plain scalar.
pub trait ScalarType: Send + Sync + fmt::Debug {
    /// Name of the kind, used in logs.
    fn tag(&self) -> &'static str;

    /// Returns true if this kind handles `value`.
    fn recognizes(&self, value: &Value) -> bool;

    /// Renders a recognized value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be rendered.
    fn represent(&self, value: &Value) -> SerializationResult<String>;
}

/// Timestamps, rendered with the pattern they carry.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampType;

impl ScalarType for TimestampType {
    fn tag(&self) -> &'static str {
        "date"
    }

    fn recognizes(&self, value: &Value) -> bool {
        matches!(value, Value::Timestamp(_))
    }

    fn represent(&self, value: &Value) -> SerializationResult<String> {
        match value {
            Value::Timestamp(ts) => Ok(ts.render()?),
            other => Err(SerializationError::unrepresentable(other.kind())),
        }
    }
}

/// Asset references, rendered as their path.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetType;

impl ScalarType for AssetType {
    fn tag(&self) -> &'static str {
        "image"
    }

    fn recognizes(&self, value: &Value) -> bool {
        matches!(value, Value::Asset(_))
    }

    fn represent(&self, value: &Value) -> SerializationResult<String> {
        match value {
            Value::Asset(asset) => Ok(asset.path().to_string()),
            other => Err(SerializationError::unrepresentable(other.kind())),
        }
    }
}

/// Ordered list of custom scalar kinds used when encoding.
///
/// The default schema knows timestamps and asset references. The safe
/// schema knows none and rejects both.
#[derive(Debug, Clone)]
pub struct OutputSchema {
    implicit: Vec<Arc<dyn ScalarType>>,
}

impl Default for OutputSchema {
    fn default() -> Self {
        Self::safe().register(TimestampType).register(AssetType)
    }
}

impl OutputSchema {
    /// Creates a schema with only the standard kinds.
    #[must_use]
    pub const fn safe() -> Self {
        Self {
            implicit: Vec::new(),
        }
    }

    /// Appends a custom kind. Kinds are checked in registration order.
    #[must_use]
    pub fn register(mut self, scalar: impl ScalarType + 'static) -> Self {
        self.implicit.push(Arc::new(scalar));
        self
    }

    /// Returns the tags of the registered kinds, in check order.
    #[must_use]
    pub fn tags(&self) -> Vec<&'static str> {
        self.implicit.iter().map(|t| t.tag()).collect()
    }

    /// Resolves a document into plain data ready for a serializer.
    ///
    /// Custom kinds become strings and every mapping is reordered with
    /// `sorted_keys`, level by level.
    ///
    /// # Errors
    ///
    /// Returns an error if a value matches neither a custom kind nor a
    /// standard one, or if a custom kind fails to render it.
    pub fn resolve(&self, value: &Value, sorted_keys: &SortedKeys) -> SerializationResult<Value> {
        if let Some(scalar) = self.implicit.iter().find(|t| t.recognizes(value)) {
            tracing::trace!(tag = scalar.tag(), "representing custom scalar");
            return scalar.represent(value).map(Value::String);
        }

        match value {
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(value.clone()),
            Value::Sequence(items) => items
                .iter()
                .map(|item| self.resolve(item, sorted_keys))
                .collect::<SerializationResult<Vec<_>>>()
                .map(Value::Sequence),
            Value::Mapping(map) => {
                let mut entries: Vec<(&String, &Value)> = map.iter().collect();
                sorted_keys.sort_by_name(&mut entries, |entry| entry.0.as_str());
                entries
                    .into_iter()
                    .map(|(key, item)| Ok((key.clone(), self.resolve(item, sorted_keys)?)))
                    .collect::<SerializationResult<Mapping>>()
                    .map(Value::Mapping)
            }
            Value::Timestamp(_) | Value::Asset(_) => {
                Err(SerializationError::unrepresentable(value.kind()))
            }
        }
    }
}

/// Which output schema an encoder uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// Standard kinds plus timestamps and asset references (default).
    #[default]
    Extended,
    /// Standard kinds only.
    Safe,
}

impl SchemaKind {
    /// Builds the schema.
    #[must_use]
    pub fn schema(self) -> OutputSchema {
        match self {
            Self::Extended => OutputSchema::default(),
            Self::Safe => OutputSchema::safe(),
        }
    }
}

/// Encoder settings, loadable from a settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Preferred key order for every mapping.
    pub sorted_keys: SortedKeys,
    /// Output schema.
    pub schema: SchemaKind,
}
