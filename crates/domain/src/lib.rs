//! Folio Domain - Content record types
//!
//! This crate defines the value model for Folio content records: the value
//! tree, timestamps that remember their format pattern, asset references and
//! the key ordering used when records are written back out.
//! All types here are pure Rust with no I/O dependencies.

pub mod asset;
pub mod error;
pub mod format;
pub mod key_order;
pub mod timestamp;
pub mod value;

pub use asset::AssetReference;
pub use error::{
    FormatError, Location, ParseError, ParseResult, SerializationError, SerializationResult,
    TimestampError,
};
pub use format::ContentFormat;
pub use key_order::SortedKeys;
pub use timestamp::{FormatPattern, TimestampValue};
pub use value::{Document, Mapping, Number, Value};
