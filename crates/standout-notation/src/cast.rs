//! Type-directed casting of raw tokens.
//!
//! The [`Caster`] trait turns a raw string into a [`Value`] for a declared
//! [`FieldType`]. [`CastingOverrides`] implements it with a table of per-type
//! override functions and falls back to each type's default constructor.
//!
//! Out of the box, overrides are registered for booleans (case-insensitive
//! `true`/`false`), dates and date-times (tolerant ISO-8601).

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use crate::error::CastError;
use crate::value::{FieldType, Value};

/// Cast function signature for overrides.
pub type CastFn = Arc<dyn Fn(&str) -> Result<Value, CastError> + Send + Sync>;

/// Converts raw tokens into typed values.
///
/// Implementations must be pure: the same input always yields the same
/// output and no state changes between calls.
pub trait Caster {
    /// Casts `raw` to a value of type `ty`.
    fn cast(&self, raw: &str, ty: &FieldType) -> Result<Value, CastError>;
}

/// Per-type override table with fallback to default construction.
///
/// # Example
///
/// ```
/// use standout_notation::{CastError, Caster, CastingOverrides, FieldType, Value};
///
/// let overrides = CastingOverrides::default().with(
///     FieldType::Custom("cents".into()),
///     |raw: &str| {
///         raw.trim()
///             .parse::<i64>()
///             .map(|n| Value::Int(n * 100))
///             .map_err(|e| CastError::custom(raw, e.to_string()))
///     },
/// );
///
/// let value = overrides.cast("12", &FieldType::Custom("cents".into())).unwrap();
/// assert_eq!(value, Value::Int(1200));
/// ```
#[derive(Clone)]
pub struct CastingOverrides {
    casts: HashMap<FieldType, CastFn>,
}

impl CastingOverrides {
    /// Creates a table with no overrides; every type uses its default
    /// constructor.
    pub fn empty() -> Self {
        CastingOverrides {
            casts: HashMap::new(),
        }
    }

    /// Registers (or replaces) the override for a type.
    pub fn with<F>(mut self, ty: FieldType, cast: F) -> Self
    where
        F: Fn(&str) -> Result<Value, CastError> + Send + Sync + 'static,
    {
        self.casts.insert(ty, Arc::new(cast));
        self
    }

    /// Removes the override for a type, restoring its default constructor.
    pub fn without(mut self, ty: &FieldType) -> Self {
        self.casts.remove(ty);
        self
    }

    /// Returns `true` if an override is registered for the type.
    pub fn has_override(&self, ty: &FieldType) -> bool {
        self.casts.contains_key(ty)
    }
}

impl Default for CastingOverrides {
    fn default() -> Self {
        CastingOverrides::empty()
            .with(FieldType::Bool, cast_bool)
            .with(FieldType::Date, cast_date)
            .with(FieldType::DateTime, cast_datetime)
    }
}

impl fmt::Debug for CastingOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&str> = self.casts.keys().map(FieldType::as_str).collect();
        types.sort_unstable();
        f.debug_struct("CastingOverrides")
            .field("types", &types)
            .finish()
    }
}

impl Caster for CastingOverrides {
    fn cast(&self, raw: &str, ty: &FieldType) -> Result<Value, CastError> {
        match self.casts.get(ty) {
            Some(cast) => cast(raw),
            None => default_cast(raw, ty),
        }
    }
}

/// Casts with the type's own default constructor, ignoring any overrides.
///
/// Text is taken verbatim; other types are parsed from the trimmed token.
pub fn default_cast(raw: &str, ty: &FieldType) -> Result<Value, CastError> {
    let token = raw.trim();
    match ty {
        FieldType::Int => token.parse().map(Value::Int).map_err(|source| {
            CastError::InvalidInt {
                raw: raw.to_string(),
                source,
            }
        }),
        FieldType::Float => token.parse().map(Value::Float).map_err(|source| {
            CastError::InvalidFloat {
                raw: raw.to_string(),
                source,
            }
        }),
        FieldType::Str => Ok(Value::Str(raw.to_string())),
        FieldType::Bool => bool::from_str(token)
            .map(Value::Bool)
            .map_err(|_| CastError::InvalidBool {
                raw: raw.to_string(),
            }),
        FieldType::Date => NaiveDate::from_str(token).map(Value::Date).map_err(|source| {
            CastError::InvalidDate {
                raw: raw.to_string(),
                source,
            }
        }),
        FieldType::DateTime => NaiveDateTime::from_str(token)
            .map(Value::DateTime)
            .map_err(|_| CastError::InvalidDateTime {
                raw: raw.to_string(),
            }),
        FieldType::Uuid => Uuid::parse_str(token).map(Value::Uuid).map_err(|source| {
            CastError::InvalidUuid {
                raw: raw.to_string(),
                source,
            }
        }),
        FieldType::Custom(_) => Err(CastError::NoCaster {
            field_type: ty.clone(),
        }),
    }
}

/// Boolean override: `true`/`false`, case-insensitive, surrounding whitespace
/// ignored.
pub fn cast_bool(raw: &str) -> Result<Value, CastError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => Err(CastError::InvalidBool {
            raw: raw.to_string(),
        }),
    }
}

/// Date override: ISO calendar date (`2024-04-04`).
pub fn cast_date(raw: &str) -> Result<Value, CastError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(Value::Date)
        .map_err(|source| CastError::InvalidDate {
            raw: raw.to_string(),
            source,
        })
}

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
];

/// Date-time override: tolerant ISO-8601.
///
/// Offset-aware text (`Z`, `+03:00`, `+0300`) yields [`Value::DateTimeTz`];
/// naive text yields [`Value::DateTime`]. Seconds may be omitted, a space may
/// replace the `T`, and a bare date means midnight.
pub fn cast_datetime(raw: &str) -> Result<Value, CastError> {
    let token = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(token) {
        return Ok(Value::DateTimeTz(dt));
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(token, format) {
            return Ok(Value::DateTimeTz(dt));
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(token, format) {
            return Ok(Value::DateTime(dt));
        }
    }
    if let Ok(Value::Date(date)) = cast_date(token) {
        return Ok(Value::DateTime(date.and_time(NaiveTime::MIN)));
    }

    Err(CastError::InvalidDateTime {
        raw: raw.to_string(),
    })
}
