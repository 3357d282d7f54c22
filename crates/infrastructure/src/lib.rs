//! Folio Infrastructure - Format adapters
//!
//! This crate provides concrete implementations of the `ContentFormat`
//! port defined in the domain layer, on top of `serde_yaml` and
//! `serde_json`.

pub mod serialization;

pub use serialization::{
    AssetType, EncodeOptions, JsonFormat, OutputSchema, ScalarType, SchemaKind, TimestampType,
    YamlFormat, format_for_extension, format_for_path, from_json, from_yaml, to_document,
    to_json_stable, to_yaml, to_yaml_with,
};
