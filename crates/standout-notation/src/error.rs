//! Error types for the notation crate.

use thiserror::Error;

use crate::value::FieldType;

/// Errors raised while turning a raw token into a typed [`Value`](crate::Value).
///
/// Cast errors are produced by [`Caster`](crate::Caster) implementations,
/// including caller-supplied override functions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CastError {
    #[error("'{raw}' is not a valid integer: {source}")]
    InvalidInt {
        raw: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("'{raw}' is not a valid float: {source}")]
    InvalidFloat {
        raw: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Boolean text other than `true`/`false`.
    #[error("'{raw}' is not a valid boolean (expected 'true' or 'false')")]
    InvalidBool { raw: String },

    #[error("'{raw}' is not a valid date: {source}")]
    InvalidDate {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Date-time text that none of the accepted layouts could parse.
    #[error("'{raw}' is not a valid date-time")]
    InvalidDateTime { raw: String },

    #[error("'{raw}' is not a valid uuid: {source}")]
    InvalidUuid {
        raw: String,
        #[source]
        source: uuid::Error,
    },

    /// The type has no default constructor and no override was registered.
    #[error("no cast function registered for type '{field_type}'")]
    NoCaster { field_type: FieldType },

    /// Failure reported by a caller-supplied override.
    #[error("cannot cast '{raw}': {message}")]
    Custom { raw: String, message: String },
}

impl CastError {
    /// Create an error from a caller-supplied cast function.
    pub fn custom(raw: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Custom {
            raw: raw.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while parsing a query into clause values.
///
/// Every variant that concerns a filter field names it, so callers can report
/// a precise diagnostic upstream.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NotationError {
    /// The query text or mapping does not have the expected shape.
    #[error("malformed query: {0}")]
    MalformedInput(String),

    /// A filter field was used that the types map does not declare.
    #[error("type of parameter '{field}' must be defined in the types map")]
    UndeclaredField { field: String },

    /// Interval syntax was used on a field whose type cannot form a range.
    #[error("interval cannot be built for type '{field_type}' of field '{field}'")]
    TypeMismatch {
        field: String,
        field_type: FieldType,
    },

    /// Interval syntax whose interior does not split into exactly two bounds.
    #[error("range for field '{field}' must contain exactly two members, got {count}")]
    MalformedRange { field: String, count: usize },

    /// A raw token could not be cast to the field's declared type.
    #[error("invalid value for field '{field}' of type '{field_type}': {source}")]
    Cast {
        field: String,
        field_type: FieldType,
        #[source]
        source: CastError,
    },
}

impl NotationError {
    /// Create a malformed-input error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Returns the field this error concerns, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MalformedInput(_) => None,
            Self::UndeclaredField { field }
            | Self::TypeMismatch { field, .. }
            | Self::MalformedRange { field, .. }
            | Self::Cast { field, .. } => Some(field),
        }
    }
}

/// Result type for notation operations.
pub type Result<T> = std::result::Result<T, NotationError>;
