//! Semantic field types and the typed values they cast to.
//!
//! A [`FieldType`] is the tag a caller declares for each filter field in a
//! [`TypesMap`]. Casting a raw token against that tag produces a [`Value`].

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Semantic type tag for a filter field.
///
/// Tags parse from text so they can be loaded from configuration. Unknown
/// names become [`FieldType::Custom`], which requires a registered cast
/// override.
///
/// ```
/// use standout_notation::FieldType;
///
/// assert_eq!(FieldType::from("integer"), FieldType::Int);
/// assert_eq!(FieldType::from("money"), FieldType::Custom("money".into()));
/// assert!(FieldType::Date.is_interval_eligible());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// Signed integer.
    Int,
    /// Floating point number.
    Float,
    /// Free text.
    Str,
    /// Boolean.
    Bool,
    /// Calendar date.
    Date,
    /// Date with time of day, optionally with a UTC offset.
    DateTime,
    /// UUID.
    Uuid,
    /// Caller-defined type, cast only through an override.
    Custom(String),
}

impl FieldType {
    /// Returns `true` if bracketed interval syntax is accepted for this type.
    pub fn is_interval_eligible(&self) -> bool {
        matches!(
            self,
            FieldType::Int | FieldType::Float | FieldType::Date | FieldType::DateTime
        )
    }

    /// Returns the canonical tag name.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Str => "str",
            FieldType::Bool => "bool",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
            FieldType::Uuid => "uuid",
            FieldType::Custom(name) => name,
        }
    }
}

impl From<&str> for FieldType {
    fn from(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" => FieldType::Int,
            "float" | "double" => FieldType::Float,
            "str" | "string" => FieldType::Str,
            "bool" | "boolean" => FieldType::Bool,
            "date" => FieldType::Date,
            "datetime" | "date-time" | "timestamp" => FieldType::DateTime,
            "uuid" => FieldType::Uuid,
            _ => FieldType::Custom(tag.trim().to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        FieldType::from(tag.as_str())
    }
}

impl From<FieldType> for String {
    fn from(ty: FieldType) -> Self {
        ty.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed value produced by casting a raw token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicit null (only produced by the `null` keyword).
    Null,
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Text.
    Str(String),
    /// Boolean.
    Bool(bool),
    /// Calendar date.
    Date(NaiveDate),
    /// Date-time without offset.
    DateTime(NaiveDateTime),
    /// Date-time with an explicit UTC offset.
    DateTimeTz(DateTime<FixedOffset>),
    /// UUID.
    Uuid(Uuid),
}

impl Value {
    /// Returns `true` if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Extracts the integer value, if present.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the float value, if present.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the text value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the date value, if present.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Extracts the date-time value, if present.
    ///
    /// Offset-aware values are returned in their local wall-clock time.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            Value::DateTimeTz(dt) => Some(dt.naive_local()),
            _ => None,
        }
    }

    /// Extracts the uuid value, if present.
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Value::Uuid(u) => Some(*u),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Date(d) => write!(f, "{}", d),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Value::DateTimeTz(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::Uuid(u) => write!(f, "{}", u),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Value::DateTimeTz(dt)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Value::Uuid(u)
    }
}

/// Mapping from filter field name to its declared [`FieldType`].
///
/// Supplied with every parse call. Every filter field in a query must be a
/// key of this map.
///
/// ```
/// use standout_notation::{FieldType, TypesMap};
///
/// let types = TypesMap::new()
///     .field("amount", FieldType::Int)
///     .field("created_at", FieldType::DateTime);
///
/// assert_eq!(types.get("amount"), Some(&FieldType::Int));
/// assert!(types.get("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypesMap(HashMap<String, FieldType>);

impl TypesMap {
    /// Creates an empty types map.
    pub fn new() -> Self {
        TypesMap::default()
    }

    /// Declares a field, replacing any earlier declaration.
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.0.insert(name.into(), ty);
        self
    }

    /// Returns the declared type of a field.
    pub fn get(&self, name: &str) -> Option<&FieldType> {
        self.0.get(name)
    }

    /// Returns `true` if the field is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over declared fields in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldType)> {
        self.0.iter().map(|(name, ty)| (name.as_str(), ty))
    }
}

impl<K: Into<String>> FromIterator<(K, FieldType)> for TypesMap {
    fn from_iter<I: IntoIterator<Item = (K, FieldType)>>(iter: I) -> Self {
        TypesMap(
            iter.into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect(),
        )
    }
}

impl From<HashMap<String, FieldType>> for TypesMap {
    fn from(map: HashMap<String, FieldType>) -> Self {
        TypesMap(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_aliases() {
        assert_eq!(FieldType::from("int"), FieldType::Int);
        assert_eq!(FieldType::from("Integer"), FieldType::Int);
        assert_eq!(FieldType::from("double"), FieldType::Float);
        assert_eq!(FieldType::from("string"), FieldType::Str);
        assert_eq!(FieldType::from("boolean"), FieldType::Bool);
        assert_eq!(FieldType::from("date-time"), FieldType::DateTime);
        assert_eq!(FieldType::from("timestamp"), FieldType::DateTime);
        assert_eq!(FieldType::from("UUID"), FieldType::Uuid);
        assert_eq!(
            FieldType::from("decimal"),
            FieldType::Custom("decimal".into())
        );
    }

    #[test]
    fn interval_eligibility() {
        assert!(FieldType::Int.is_interval_eligible());
        assert!(FieldType::Float.is_interval_eligible());
        assert!(FieldType::Date.is_interval_eligible());
        assert!(FieldType::DateTime.is_interval_eligible());
        assert!(!FieldType::Str.is_interval_eligible());
        assert!(!FieldType::Bool.is_interval_eligible());
        assert!(!FieldType::Uuid.is_interval_eligible());
        assert!(!FieldType::Custom("money".into()).is_interval_eligible());
    }

    #[test]
    fn field_type_display() {
        assert_eq!(FieldType::DateTime.to_string(), "datetime");
        assert_eq!(FieldType::Custom("money".into()).to_string(), "money");
    }

    #[test]
    fn value_extractors() {
        assert_eq!(Value::Int(3).as_int(), Some(3));
        assert_eq!(Value::Float(1.5).as_float(), Some(1.5));
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert!(Value::Null.is_null());

        // Wrong type returns None
        assert_eq!(Value::Int(3).as_str(), None);
        assert_eq!(Value::Null.as_bool(), None);
    }

    #[test]
    fn value_display() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 4).unwrap();
        assert_eq!(Value::Date(date).to_string(), "2024-04-04");
        assert_eq!(
            Value::DateTime(date.and_hms_opt(11, 4, 2).unwrap()).to_string(),
            "2024-04-04T11:04:02"
        );
        assert_eq!(Value::from("a b").to_string(), "\"a b\"");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn types_map_from_iter() {
        let types: TypesMap = [("a", FieldType::Int), ("b", FieldType::Str)]
            .into_iter()
            .collect();
        assert_eq!(types.len(), 2);
        assert!(types.contains("a"));
        assert!(!types.contains("c"));
    }
}
