//! The value grammar.
//!
//! A filter value is matched against [`GRAMMAR`], an ordered list of
//! [`Pattern`]s. The first pattern that matches wins and builds the clause;
//! later patterns are never tried. [`Pattern::Literal`] matches anything and
//! is always last.
//!
//! | Syntax          | Clause                              |
//! |-----------------|-------------------------------------|
//! | `null`          | `is(null)`                          |
//! | `!null`         | `not(is(null))`                     |
//! | `(a,b)`         | `range(gt(a), lt(b))`               |
//! | `[a,b)`         | `range(gte(a), lt(b))`              |
//! | `(a,b]`         | `range(gt(a), lte(b))`              |
//! | `[a,b]`         | `range(gte(a), lte(b))`             |
//! | `!{v1,v2}`      | `not(set(v1, v2))`                  |
//! | `{v1,v2}`       | `set(v1, v2)`                       |
//! | `~~x`           | `like(x)`, case-insensitive         |
//! | `!~~x`          | `not(like(x))`, case-insensitive    |
//! | `~x`            | `like(x)`, case-sensitive           |
//! | `!~x`           | `not(like(x))`, case-sensitive      |
//! | `!x`            | `not(eq(x))`                        |
//! | `x`             | `eq(x)`                             |
//!
//! Either side of an interval may be empty, leaving that side unbounded.

use crate::cast::Caster;
use crate::clause::{ClauseValue, Comparison};
use crate::error::{NotationError, Result};
use crate::op::Op;
use crate::value::{FieldType, Value};

/// One entry of the value grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// `null`
    Null,
    /// `!null`
    NotNull,
    /// `(a,b)`
    OpenInterval,
    /// `[a,b)`
    ClosedOpenInterval,
    /// `(a,b]`
    OpenClosedInterval,
    /// `[a,b]`
    ClosedInterval,
    /// `!{v1,v2,...}`
    NotSet,
    /// `{v1,v2,...}`
    Set,
    /// `~~x`
    ILike,
    /// `!~~x`
    NotILike,
    /// `~x`
    Like,
    /// `!~x`
    NotLike,
    /// `!x`
    NotLiteral,
    /// `x`
    Literal,
}

/// The grammar in priority order.
pub const GRAMMAR: [Pattern; 14] = [
    Pattern::Null,
    Pattern::NotNull,
    Pattern::OpenInterval,
    Pattern::ClosedOpenInterval,
    Pattern::OpenClosedInterval,
    Pattern::ClosedInterval,
    Pattern::NotSet,
    Pattern::Set,
    Pattern::ILike,
    Pattern::NotILike,
    Pattern::Like,
    Pattern::NotLike,
    Pattern::NotLiteral,
    Pattern::Literal,
];

impl Pattern {
    /// Matches `value` against this pattern alone, returning the captured
    /// operand.
    ///
    /// ```
    /// use standout_notation::Pattern;
    ///
    /// assert_eq!(Pattern::ClosedInterval.capture("[1,3]"), Some("1,3"));
    /// assert_eq!(Pattern::NotLike.capture("!~abc"), Some("abc"));
    /// assert_eq!(Pattern::Set.capture("!{a}"), None);
    /// ```
    pub fn capture(self, value: &str) -> Option<&str> {
        match self {
            Pattern::Null => (value == "null").then_some(value),
            Pattern::NotNull => (value == "!null").then_some(value),
            Pattern::OpenInterval => interval(value, '(', ')'),
            Pattern::ClosedOpenInterval => interval(value, '[', ')'),
            Pattern::OpenClosedInterval => interval(value, '(', ']'),
            Pattern::ClosedInterval => interval(value, '[', ']'),
            Pattern::NotSet => value.strip_prefix("!{")?.strip_suffix('}'),
            Pattern::Set => value.strip_prefix('{')?.strip_suffix('}'),
            Pattern::ILike => value.strip_prefix("~~"),
            Pattern::NotILike => value.strip_prefix("!~~"),
            Pattern::Like => value.strip_prefix('~'),
            Pattern::NotLike => value.strip_prefix("!~"),
            Pattern::NotLiteral => value.strip_prefix('!'),
            Pattern::Literal => Some(value),
        }
    }

    /// Returns the bound operators of an interval pattern.
    pub fn bounds(self) -> Option<(Op, Op)> {
        match self {
            Pattern::OpenInterval => Some((Op::Gt, Op::Lt)),
            Pattern::ClosedOpenInterval => Some((Op::Gte, Op::Lt)),
            Pattern::OpenClosedInterval => Some((Op::Gt, Op::Lte)),
            Pattern::ClosedInterval => Some((Op::Gte, Op::Lte)),
            _ => None,
        }
    }

    /// Returns `true` if this pattern wraps its clause in a negation.
    pub fn is_negated(self) -> bool {
        matches!(
            self,
            Pattern::NotNull
                | Pattern::NotSet
                | Pattern::NotILike
                | Pattern::NotLike
                | Pattern::NotLiteral
        )
    }

    /// Builds the clause for a captured operand.
    pub(crate) fn build<C: Caster + ?Sized>(
        self,
        field: &str,
        operand: &str,
        ty: &FieldType,
        caster: &C,
    ) -> Result<ClauseValue> {
        if let Some((lower, upper)) = self.bounds() {
            return build_range(field, operand, lower, upper, ty, caster);
        }

        let clause = match self {
            Pattern::Null | Pattern::NotNull => ClauseValue::is_null(),
            Pattern::NotSet | Pattern::Set => {
                let values = operand
                    .split(',')
                    .filter(|member| !member.is_empty())
                    .map(|member| cast_operand(field, member, ty, caster))
                    .collect::<Result<Vec<_>>>()?;
                ClauseValue::Set(values)
            }
            Pattern::ILike | Pattern::NotILike => {
                ClauseValue::like(cast_operand(field, operand, ty, caster)?, false)
            }
            Pattern::Like | Pattern::NotLike => {
                ClauseValue::like(cast_operand(field, operand, ty, caster)?, true)
            }
            // Literal and NotLiteral; intervals returned above
            _ => ClauseValue::equals(cast_operand(field, operand, ty, caster)?),
        };

        if self.is_negated() {
            Ok(ClauseValue::negate(clause))
        } else {
            Ok(clause)
        }
    }
}

/// Finds the first grammar pattern matching `value`.
///
/// Always succeeds, since [`Pattern::Literal`] matches anything.
///
/// ```
/// use standout_notation::{resolve, Pattern};
///
/// assert_eq!(resolve("!~~abc"), (Pattern::NotILike, "abc"));
/// assert_eq!(resolve("!abc"), (Pattern::NotLiteral, "abc"));
/// assert_eq!(resolve("(1,2)"), (Pattern::OpenInterval, "1,2"));
/// assert_eq!(resolve("(a,b)"), (Pattern::Literal, "(a,b)"));
/// ```
pub fn resolve(value: &str) -> (Pattern, &str) {
    GRAMMAR
        .iter()
        .find_map(|pattern| pattern.capture(value).map(|operand| (*pattern, operand)))
        .unwrap_or((Pattern::Literal, value))
}

/// Interval operands may only contain digits and ISO date/time punctuation;
/// anything else falls through to later patterns.
fn interval(value: &str, open: char, close: char) -> Option<&str> {
    let inner = value.strip_prefix(open)?.strip_suffix(close)?;
    let is_interval_char =
        |c: char| c.is_ascii_digit() || matches!(c, 'T' | 'Z' | ':' | '-' | ',' | '.');
    (!inner.is_empty() && inner.chars().all(is_interval_char)).then_some(inner)
}

fn build_range<C: Caster + ?Sized>(
    field: &str,
    operand: &str,
    lower: Op,
    upper: Op,
    ty: &FieldType,
    caster: &C,
) -> Result<ClauseValue> {
    if !ty.is_interval_eligible() {
        return Err(NotationError::TypeMismatch {
            field: field.to_string(),
            field_type: ty.clone(),
        });
    }

    let members: Vec<&str> = operand.split(',').collect();
    let &[left, right] = members.as_slice() else {
        return Err(NotationError::MalformedRange {
            field: field.to_string(),
            count: members.len(),
        });
    };

    let left = match left {
        "" => None,
        raw => Some(Comparison::new(lower, cast_operand(field, raw, ty, caster)?)),
    };
    let right = match right {
        "" => None,
        raw => Some(Comparison::new(upper, cast_operand(field, raw, ty, caster)?)),
    };

    Ok(ClauseValue::range(left, right))
}

fn cast_operand<C: Caster + ?Sized>(
    field: &str,
    raw: &str,
    ty: &FieldType,
    caster: &C,
) -> Result<Value> {
    caster.cast(raw, ty).map_err(|source| NotationError::Cast {
        field: field.to_string(),
        field_type: ty.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cast::CastingOverrides;
    use crate::error::CastError;

    fn build(field: &str, value: &str, ty: FieldType) -> Result<ClauseValue> {
        let (pattern, operand) = resolve(value);
        pattern.build(field, operand, &ty, &CastingOverrides::default())
    }

    #[test]
    fn priority_order_is_fixed() {
        assert_eq!(GRAMMAR.first(), Some(&Pattern::Null));
        assert_eq!(GRAMMAR.last(), Some(&Pattern::Literal));

        let position = |p: Pattern| GRAMMAR.iter().position(|g| *g == p).unwrap();
        assert!(position(Pattern::ILike) < position(Pattern::Like));
        assert!(position(Pattern::NotILike) < position(Pattern::NotLike));
        assert!(position(Pattern::NotLike) < position(Pattern::NotLiteral));
        assert!(position(Pattern::NotSet) < position(Pattern::Set));
        assert!(position(Pattern::NotNull) < position(Pattern::NotLiteral));
    }

    #[test]
    fn resolve_picks_first_match() {
        assert_eq!(resolve("null"), (Pattern::Null, "null"));
        assert_eq!(resolve("!null"), (Pattern::NotNull, "!null"));
        assert_eq!(resolve("[1,)"), (Pattern::ClosedOpenInterval, "1,"));
        assert_eq!(resolve("(,3]"), (Pattern::OpenClosedInterval, ",3"));
        assert_eq!(resolve("!{a,b}"), (Pattern::NotSet, "a,b"));
        assert_eq!(resolve("{a,b}"), (Pattern::Set, "a,b"));
        assert_eq!(resolve("~~x"), (Pattern::ILike, "x"));
        assert_eq!(resolve("~x"), (Pattern::Like, "x"));
        assert_eq!(resolve("!~x"), (Pattern::NotLike, "x"));
        assert_eq!(resolve("nullable"), (Pattern::Literal, "nullable"));
        assert_eq!(resolve(""), (Pattern::Literal, ""));
    }

    #[test]
    fn interval_needs_interval_characters() {
        assert_eq!(Pattern::OpenInterval.capture("()"), None);
        assert_eq!(Pattern::OpenInterval.capture("(a,b)"), None);
        assert_eq!(
            Pattern::ClosedInterval.capture("[2024-04-04T11:04:02,]"),
            Some("2024-04-04T11:04:02,")
        );
        assert_eq!(Pattern::ClosedInterval.capture("[1,2"), None);
    }

    #[test]
    fn bounds_map_brackets_to_operators() {
        assert_eq!(Pattern::OpenInterval.bounds(), Some((Op::Gt, Op::Lt)));
        assert_eq!(Pattern::ClosedOpenInterval.bounds(), Some((Op::Gte, Op::Lt)));
        assert_eq!(Pattern::OpenClosedInterval.bounds(), Some((Op::Gt, Op::Lte)));
        assert_eq!(Pattern::ClosedInterval.bounds(), Some((Op::Gte, Op::Lte)));
        assert_eq!(Pattern::Set.bounds(), None);
    }

    #[test]
    fn interval_patterns_build_with_their_bounds() {
        let caster = CastingOverrides::default();
        for pattern in GRAMMAR {
            let Some((lower, upper)) = pattern.bounds() else {
                continue;
            };
            assert_eq!(
                pattern.build("amount", "1,3", &FieldType::Int, &caster),
                Ok(ClauseValue::range(
                    Some(Comparison::new(lower, 1)),
                    Some(Comparison::new(upper, 3))
                )),
                "{:?}",
                pattern
            );
        }
    }

    #[test]
    fn builds_half_open_range() {
        assert_eq!(
            build("amount", "(1,)", FieldType::Int),
            Ok(ClauseValue::range(Some(Comparison::gt(1)), None))
        );
        assert_eq!(
            build("amount", "(,3]", FieldType::Int),
            Ok(ClauseValue::range(None, Some(Comparison::lte(3))))
        );
        assert_eq!(
            build("amount", "(,)", FieldType::Int),
            Ok(ClauseValue::range(None, None))
        );
    }

    #[test]
    fn range_rejects_wrong_member_count() {
        assert_eq!(
            build("amount", "(1,2,3)", FieldType::Int),
            Err(NotationError::MalformedRange {
                field: "amount".into(),
                count: 3
            })
        );
        assert_eq!(
            build("amount", "[1]", FieldType::Int),
            Err(NotationError::MalformedRange {
                field: "amount".into(),
                count: 1
            })
        );
    }

    #[test]
    fn range_rejects_ineligible_type() {
        assert_eq!(
            build("annotation", "(1,2)", FieldType::Str),
            Err(NotationError::TypeMismatch {
                field: "annotation".into(),
                field_type: FieldType::Str
            })
        );
    }

    #[test]
    fn set_discards_empty_members() {
        assert_eq!(
            build("amount", "{1,,2,}", FieldType::Int),
            Ok(ClauseValue::set([1i64, 2]))
        );
        assert_eq!(
            build("amount", "!{}", FieldType::Int),
            Ok(ClauseValue::negate(ClauseValue::Set(vec![])))
        );
    }

    #[test]
    fn set_member_cast_failure_names_field() {
        assert!(matches!(
            build("amount", "{1,x}", FieldType::Int),
            Err(NotationError::Cast {
                ref field,
                source: CastError::InvalidInt { .. },
                ..
            }) if field == "amount"
        ));
    }

    #[test]
    fn negated_literal() {
        assert_eq!(
            build("name", "!bob", FieldType::Str),
            Ok(ClauseValue::negate(ClauseValue::equals("bob")))
        );
    }

    #[test]
    fn null_ignores_declared_type() {
        assert_eq!(
            build("amount", "null", FieldType::Int),
            Ok(ClauseValue::is_null())
        );
    }
}
