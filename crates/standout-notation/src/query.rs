//! Query input and normalization.
//!
//! A [`Query`] is either `&`-separated `name=value` text or an ordered list of
//! name/value pairs. [`Query::into_pairs`] normalizes both into a lazy
//! sequence of raw `(name, value)` pairs, dropping pairs whose value is absent.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::error::{NotationError, Result};

/// A raw, not yet interpreted `(name, value)` pair.
pub type RawPair<'q> = (Cow<'q, str>, Cow<'q, str>);

/// Raw query input.
///
/// # Example
///
/// ```
/// use standout_notation::Query;
///
/// let text = Query::from("amount=[1,3]&order_by=-amount");
/// let pairs: Vec<_> = text.into_pairs().collect::<Result<_, _>>().unwrap();
/// assert_eq!(pairs.len(), 2);
///
/// // Absent values are dropped
/// let mapping = Query::from(vec![("amount", Some("12")), ("name", None)]);
/// assert_eq!(mapping.into_pairs().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Query<'q> {
    /// `name1=value1&name2=value2` text.
    Text(&'q str),
    /// Ordered name/value pairs; `None` marks an absent value.
    Pairs(Vec<(Cow<'q, str>, Option<Cow<'q, str>>)>),
}

impl<'q> Query<'q> {
    /// Builds a query from a JSON string or object.
    ///
    /// Object members keep their order. `null` members are absent, numbers and
    /// booleans are taken as their text. Arrays and nested objects are
    /// rejected, as is any JSON value that is neither a string nor an object.
    pub fn from_json(value: &'q serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::String(text) => Ok(Query::Text(text)),
            serde_json::Value::Object(members) => members
                .iter()
                .map(|(name, value)| {
                    let raw = match value {
                        serde_json::Value::Null => None,
                        serde_json::Value::String(s) => Some(Cow::Borrowed(s.as_str())),
                        serde_json::Value::Number(n) => Some(Cow::Owned(n.to_string())),
                        serde_json::Value::Bool(b) => Some(Cow::Owned(b.to_string())),
                        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                            return Err(NotationError::malformed(format!(
                                "value of parameter '{}' must be a scalar",
                                name
                            )))
                        }
                    };
                    Ok((Cow::Borrowed(name.as_str()), raw))
                })
                .collect::<Result<Vec<_>>>()
                .map(Query::Pairs),
            _ => Err(NotationError::malformed(
                "query must be a string or a mapping",
            )),
        }
    }

    /// Normalizes the query into a lazy sequence of raw pairs.
    ///
    /// The sequence is single-pass. Text segments are validated as they are
    /// reached, so pairs before a malformed segment are yielded first.
    pub fn into_pairs(self) -> RawPairs<'q> {
        let source = match self {
            Query::Text(text) => Source::Text(text.split('&')),
            Query::Pairs(pairs) => Source::Pairs(pairs.into_iter()),
        };
        RawPairs { source }
    }
}

impl<'q> From<&'q str> for Query<'q> {
    fn from(text: &'q str) -> Self {
        Query::Text(text)
    }
}

impl<'q> From<&'q String> for Query<'q> {
    fn from(text: &'q String) -> Self {
        Query::Text(text)
    }
}

impl<'q, K, V> From<Vec<(K, Option<V>)>> for Query<'q>
where
    K: Into<Cow<'q, str>>,
    V: Into<Cow<'q, str>>,
{
    fn from(pairs: Vec<(K, Option<V>)>) -> Self {
        Query::Pairs(
            pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.map(Into::into)))
                .collect(),
        )
    }
}

impl<'q> From<&'q BTreeMap<String, String>> for Query<'q> {
    fn from(map: &'q BTreeMap<String, String>) -> Self {
        Query::Pairs(
            map.iter()
                .map(|(name, value)| (Cow::Borrowed(name.as_str()), Some(Cow::Borrowed(value.as_str()))))
                .collect(),
        )
    }
}

/// Optional values map to absent pairs. Keys are visited in sorted order.
impl<'q> From<&'q BTreeMap<String, Option<String>>> for Query<'q> {
    fn from(map: &'q BTreeMap<String, Option<String>>) -> Self {
        Query::Pairs(
            map.iter()
                .map(|(name, value)| (Cow::Borrowed(name.as_str()), value.as_deref().map(Cow::Borrowed)))
                .collect(),
        )
    }
}

#[derive(Debug)]
enum Source<'q> {
    Text(std::str::Split<'q, char>),
    Pairs(std::vec::IntoIter<(Cow<'q, str>, Option<Cow<'q, str>>)>),
}

/// Lazy sequence of raw pairs produced by [`Query::into_pairs`].
#[derive(Debug)]
pub struct RawPairs<'q> {
    source: Source<'q>,
}

impl<'q> Iterator for RawPairs<'q> {
    type Item = Result<RawPair<'q>>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.source {
            Source::Text(segments) => segments.next().map(split_segment),
            Source::Pairs(pairs) => pairs
                .by_ref()
                .find_map(|(name, value)| value.map(|value| Ok((name, value)))),
        }
    }
}

/// Splits `name=value` on the first `=`.
fn split_segment(segment: &str) -> Result<RawPair<'_>> {
    match segment.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((Cow::Borrowed(name), Cow::Borrowed(value))),
        _ => Err(NotationError::malformed(format!(
            "parameter must have an explicit name: '{}'",
            segment
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collect(query: Query<'_>) -> Result<Vec<(String, String)>> {
        query
            .into_pairs()
            .map(|pair| pair.map(|(name, value)| (name.into_owned(), value.into_owned())))
            .collect()
    }

    fn pair(name: &str, value: &str) -> (String, String) {
        (name.to_string(), value.to_string())
    }

    #[test]
    fn text_keeps_segment_order() {
        assert_eq!(
            collect(Query::from("b=2&a=1&b=3")).unwrap(),
            vec![pair("b", "2"), pair("a", "1"), pair("b", "3")]
        );
    }

    #[test]
    fn text_splits_on_first_separator() {
        assert_eq!(
            collect(Query::from("name=a=b")).unwrap(),
            vec![pair("name", "a=b")]
        );
        assert_eq!(collect(Query::from("name=")).unwrap(), vec![pair("name", "")]);
    }

    #[test]
    fn text_segment_without_name_is_malformed() {
        assert!(matches!(
            collect(Query::from("amount")),
            Err(NotationError::MalformedInput(_))
        ));
        assert!(matches!(
            collect(Query::from("=12")),
            Err(NotationError::MalformedInput(_))
        ));
        assert!(matches!(
            collect(Query::from("")),
            Err(NotationError::MalformedInput(_))
        ));
    }

    #[test]
    fn text_errors_are_lazy() {
        let mut pairs = Query::from("a=1&broken&b=2").into_pairs();
        assert!(matches!(pairs.next(), Some(Ok(_))));
        assert!(matches!(pairs.next(), Some(Err(NotationError::MalformedInput(_)))));
    }

    #[test]
    fn pairs_skip_absent_values() {
        let query = Query::from(vec![("a", Some("1")), ("b", None), ("c", Some("null"))]);
        assert_eq!(
            collect(query).unwrap(),
            vec![pair("a", "1"), pair("c", "null")]
        );
    }

    #[test]
    fn btree_map_input() {
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), "2".to_string());
        map.insert("a".to_string(), "1".to_string());
        assert_eq!(
            collect(Query::from(&map)).unwrap(),
            vec![pair("a", "1"), pair("b", "2")]
        );
    }

    #[test]
    fn optional_btree_map_input() {
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), Some("2".to_string()));
        map.insert("c".to_string(), None);
        map.insert("a".to_string(), Some("1".to_string()));
        assert_eq!(
            collect(Query::from(&map)).unwrap(),
            vec![pair("a", "1"), pair("b", "2")]
        );
    }

    #[test]
    fn json_object_input() {
        let value = json!({ "amount": 12, "name": "bob", "deleted_at": null, "is_active": true });
        assert_eq!(
            collect(Query::from_json(&value).unwrap()).unwrap(),
            vec![pair("amount", "12"), pair("name", "bob"), pair("is_active", "true")]
        );
    }

    #[test]
    fn json_string_input() {
        let value = json!("amount=12");
        assert_eq!(Query::from_json(&value).unwrap(), Query::Text("amount=12"));
    }

    #[test]
    fn json_rejects_other_shapes() {
        assert!(matches!(
            Query::from_json(&json!([1, 2])),
            Err(NotationError::MalformedInput(_))
        ));
        assert!(matches!(
            Query::from_json(&json!(12)),
            Err(NotationError::MalformedInput(_))
        ));
        assert!(matches!(
            Query::from_json(&json!({ "amount": [1, 2] })),
            Err(NotationError::MalformedInput(_))
        ));
    }
}
