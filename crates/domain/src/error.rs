//! Domain error types

use std::fmt;

use thiserror::Error;

/// Position of a problem inside markup text (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl Location {
    /// Creates a location from 1-based line and column numbers.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

/// Errors raised while decoding markup text into a document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The text is not well-formed.
    #[error("syntax error: {message}{}", at(.location))]
    Syntax {
        /// Parser message.
        message: String,
        /// Where the parser stopped, when it reports it.
        location: Option<Location>,
    },

    /// A mapping contains the same key twice.
    #[error("duplicate mapping key: {0}")]
    DuplicateKey(String),

    /// A mapping key is a collection rather than a scalar.
    #[error("unsupported mapping key: {0}")]
    UnsupportedKey(String),

    /// The text uses an application tag outside the safe schema.
    #[error("unknown tag: {0}")]
    UnknownTag(String),
}

impl ParseError {
    /// Creates a syntax error without location information.
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
            location: None,
        }
    }

    /// Returns the location of the error, if known.
    #[must_use]
    pub const fn location(&self) -> Option<Location> {
        match self {
            Self::Syntax { location, .. } => *location,
            _ => None,
        }
    }
}

fn at(location: &Option<Location>) -> String {
    location.map_or_else(String::new, |l| format!(" at {l}"))
}

/// Errors raised while encoding a document into markup text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// No scalar or collection rule of the output schema accepts the value.
    #[error("unacceptable kind of value to dump: {kind}")]
    Unrepresentable {
        /// Kind of the rejected value.
        kind: String,
    },

    /// A timestamp could not be rendered with its format pattern.
    #[error("timestamp error: {0}")]
    Timestamp(#[from] TimestampError),

    /// The underlying emitter failed.
    #[error("emitter error: {0}")]
    Emit(String),
}

impl SerializationError {
    /// Creates an error for a value kind the schema cannot represent.
    pub fn unrepresentable(kind: impl Into<String>) -> Self {
        Self::Unrepresentable { kind: kind.into() }
    }
}

/// Errors raised by timestamp patterns.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// The pattern is empty.
    #[error("empty format pattern")]
    EmptyPattern,

    /// The pattern uses a token that cannot be rendered.
    #[error("unsupported token {token:?} in pattern {pattern:?}")]
    UnsupportedToken {
        /// The offending token.
        token: String,
        /// The full pattern.
        pattern: String,
    },

    /// Rendering the value with its pattern failed.
    #[error("cannot format value with pattern {0:?}")]
    Format(String),

    /// The text does not match the pattern.
    #[error("{input:?} does not match pattern {pattern:?}: {reason}")]
    Mismatch {
        /// The text being parsed.
        input: String,
        /// The pattern it was parsed with.
        pattern: String,
        /// Parser explanation.
        reason: String,
    },
}

/// Either direction of a format conversion failing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Decoding failed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Encoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),
}

/// Result type alias for decode operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type alias for encode operations.
pub type SerializationResult<T> = Result<T, SerializationError>;
