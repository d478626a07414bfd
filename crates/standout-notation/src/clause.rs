//! Clause values produced by the parser.
//!
//! A [`Param`] pairs a field name with a [`ClauseValue`], the typed unit of
//! filter, ordering or pagination semantics handed to a query builder.

use std::fmt;

use serde::Serialize;

use crate::op::Op;
use crate::ordering::Dir;
use crate::value::Value;

/// A single bound: an operator applied to a typed value.
///
/// Used standalone as an open-ended bound and as either side of a [`Range`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub op: Op,
    pub value: Value,
}

impl Comparison {
    /// Creates a new comparison.
    pub fn new(op: Op, value: impl Into<Value>) -> Self {
        Comparison {
            op,
            value: value.into(),
        }
    }

    pub fn gt(value: impl Into<Value>) -> Self {
        Comparison::new(Op::Gt, value)
    }

    pub fn gte(value: impl Into<Value>) -> Self {
        Comparison::new(Op::Gte, value)
    }

    pub fn lt(value: impl Into<Value>) -> Self {
        Comparison::new(Op::Lt, value)
    }

    pub fn lte(value: impl Into<Value>) -> Self {
        Comparison::new(Op::Lte, value)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.op, self.value)
    }
}

/// An interval with an optional bound on each side.
///
/// A missing side means the range is open-ended in that direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Range {
    pub left: Option<Comparison>,
    pub right: Option<Comparison>,
}

impl Range {
    pub fn new(left: Option<Comparison>, right: Option<Comparison>) -> Self {
        Range { left, right }
    }

    /// Returns `true` if both sides are bounded.
    pub fn is_bounded(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }
}

/// Typed clause value.
///
/// # Example
///
/// ```
/// use standout_notation::{ClauseValue, Comparison};
///
/// let range = ClauseValue::range(Some(Comparison::gte(1)), Some(Comparison::lte(3)));
/// assert_eq!(range.to_string(), "range(gte(1), lte(3))");
///
/// let not_null = ClauseValue::negate(ClauseValue::is_null());
/// assert_eq!(not_null.to_string(), "not(is(null))");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ClauseValue {
    /// Equality with a literal value. The operator is always [`Op::Eq`].
    Literal { op: Op, value: Value },
    /// A single open-ended bound.
    Comparison(Comparison),
    /// Interval built from bracket syntax.
    Range(Range),
    /// Identity check; only `Is(Null)` is produced by the grammar.
    Is(Value),
    /// Negation of the inner clause.
    Not(Box<ClauseValue>),
    /// Pattern match.
    Like { value: Value, case_sensitive: bool },
    /// Set membership. Order is preserved; uniqueness is not enforced.
    Set(Vec<Value>),
    /// Ordering directive with its positional priority.
    Order { dir: Dir, priority: usize },
    /// Maximum number of results. Negative counts are rejected at parse
    /// time as an integer cast error.
    Limit(usize),
    /// Number of results to skip. Negative counts are rejected like
    /// [`ClauseValue::Limit`].
    Offset(usize),
}

impl ClauseValue {
    /// Equality with a literal value.
    pub fn equals(value: impl Into<Value>) -> Self {
        ClauseValue::Literal {
            op: Op::Eq,
            value: value.into(),
        }
    }

    /// `Is(null)`.
    pub fn is_null() -> Self {
        ClauseValue::Is(Value::Null)
    }

    /// Wraps a clause in a negation.
    pub fn negate(inner: ClauseValue) -> Self {
        ClauseValue::Not(Box::new(inner))
    }

    pub fn like(value: impl Into<Value>, case_sensitive: bool) -> Self {
        ClauseValue::Like {
            value: value.into(),
            case_sensitive,
        }
    }

    pub fn set<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        ClauseValue::Set(values.into_iter().map(Into::into).collect())
    }

    pub fn range(left: Option<Comparison>, right: Option<Comparison>) -> Self {
        ClauseValue::Range(Range::new(left, right))
    }

    pub fn order(dir: Dir, priority: usize) -> Self {
        ClauseValue::Order { dir, priority }
    }

    /// Returns `true` if this is a `Not` wrapper.
    pub fn is_negated(&self) -> bool {
        matches!(self, ClauseValue::Not(_))
    }

    /// Returns the negated clause, if this is a `Not` wrapper.
    pub fn negated(&self) -> Option<&ClauseValue> {
        match self {
            ClauseValue::Not(inner) => Some(inner),
            _ => None,
        }
    }

    /// Returns the range, if this is a `Range`.
    pub fn as_range(&self) -> Option<&Range> {
        match self {
            ClauseValue::Range(range) => Some(range),
            _ => None,
        }
    }

    /// Returns `true` for ordering and pagination clauses.
    pub fn is_directive(&self) -> bool {
        matches!(
            self,
            ClauseValue::Order { .. } | ClauseValue::Limit(_) | ClauseValue::Offset(_)
        )
    }
}

impl fmt::Display for ClauseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClauseValue::Literal { op, value } => write!(f, "{}({})", op, value),
            ClauseValue::Comparison(cmp) => write!(f, "{}", cmp),
            ClauseValue::Range(range) => {
                write!(f, "range(")?;
                match &range.left {
                    Some(left) => write!(f, "{}", left)?,
                    None => write!(f, "-")?,
                }
                write!(f, ", ")?;
                match &range.right {
                    Some(right) => write!(f, "{}", right)?,
                    None => write!(f, "-")?,
                }
                write!(f, ")")
            }
            ClauseValue::Is(value) => write!(f, "is({})", value),
            ClauseValue::Not(inner) => write!(f, "not({})", inner),
            ClauseValue::Like {
                value,
                case_sensitive,
            } => {
                if *case_sensitive {
                    write!(f, "like({})", value)
                } else {
                    write!(f, "ilike({})", value)
                }
            }
            ClauseValue::Set(values) => {
                write!(f, "set(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, ")")
            }
            ClauseValue::Order { dir, priority } => write!(f, "{}({})", dir, priority),
            ClauseValue::Limit(n) => write!(f, "limit({})", n),
            ClauseValue::Offset(n) => write!(f, "offset({})", n),
        }
    }
}

/// A named clause value, the atomic unit of parser output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub value: ClauseValue,
}

impl Param {
    /// Creates a new param.
    pub fn new(name: impl Into<String>, value: ClauseValue) -> Self {
        Param {
            name: name.into(),
            value,
        }
    }

    /// Splits the param into its name and value.
    pub fn into_parts(self) -> (String, ClauseValue) {
        (self.name, self.value)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_is_equality() {
        match ClauseValue::equals(12i64) {
            ClauseValue::Literal { op, value } => {
                assert_eq!(op, Op::Eq);
                assert_eq!(value, Value::Int(12));
            }
            other => panic!("unexpected clause {:?}", other),
        }
    }

    #[test]
    fn negation_composes() {
        let clause = ClauseValue::negate(ClauseValue::like("x", false));
        assert!(clause.is_negated());
        assert_eq!(clause.negated(), Some(&ClauseValue::like("x", false)));
        assert!(!ClauseValue::is_null().is_negated());
    }

    #[test]
    fn range_sides() {
        let closed = Range::new(Some(Comparison::gte(1)), Some(Comparison::lte(3)));
        assert!(closed.is_bounded());

        let open = Range::new(Some(Comparison::gt(1)), None);
        assert!(!open.is_bounded());
    }

    #[test]
    fn display_forms() {
        assert_eq!(ClauseValue::equals(12i64).to_string(), "eq(12)");
        assert_eq!(
            ClauseValue::range(None, Some(Comparison::lt(3))).to_string(),
            "range(-, lt(3))"
        );
        assert_eq!(ClauseValue::like("ab", true).to_string(), "like(\"ab\")");
        assert_eq!(ClauseValue::like("ab", false).to_string(), "ilike(\"ab\")");
        assert_eq!(
            ClauseValue::negate(ClauseValue::set([1i64, 2])).to_string(),
            "not(set(1, 2))"
        );
        assert_eq!(ClauseValue::order(Dir::Desc, 1).to_string(), "desc(1)");
        assert_eq!(ClauseValue::Limit(10).to_string(), "limit(10)");
        assert_eq!(
            Param::new("amount", ClauseValue::Offset(5)).to_string(),
            "amount = offset(5)"
        );
    }

    #[test]
    fn directives() {
        assert!(ClauseValue::Limit(1).is_directive());
        assert!(ClauseValue::order(Dir::Asc, 0).is_directive());
        assert!(!ClauseValue::equals(1i64).is_directive());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(ClauseValue::range(Some(Comparison::gt(1)), None)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "range",
                "value": { "left": { "op": "gt", "value": 1 }, "right": null }
            })
        );

        let json = serde_json::to_value(ClauseValue::negate(ClauseValue::is_null())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "not",
                "value": { "kind": "is", "value": null }
            })
        );
    }
}
