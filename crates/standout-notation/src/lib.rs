//! Notation - Typed clause parser for URL-query-style filter notation.
//!
//! Notation turns flat `name=value` input into typed clause values that a
//! query builder can consume. Callers declare the semantic type of every
//! filter field, so the same textual syntax casts correctly whether a field
//! holds a number, a timestamp, a UUID, text or a boolean.
//!
//! # Quick Start
//!
//! ```rust
//! use standout_notation::{ClauseValue, Comparison, FieldType, Parser, TypesMap};
//!
//! let parser = Parser::new();
//! let types = TypesMap::new()
//!     .field("amount", FieldType::Int)
//!     .field("created_at", FieldType::DateTime)
//!     .field("is_active", FieldType::Bool);
//!
//! let params = parser
//!     .parse_all("amount=(1,)&is_active=true&created_at=!null", &types)
//!     .unwrap();
//!
//! assert_eq!(
//!     params[0].value,
//!     ClauseValue::range(Some(Comparison::gt(1)), None)
//! );
//! assert_eq!(params[1].value, ClauseValue::equals(true));
//! assert_eq!(
//!     params[2].value,
//!     ClauseValue::negate(ClauseValue::is_null())
//! );
//! ```
//!
//! # Value Syntax
//!
//! Filter values are matched against an ordered grammar; the first match wins:
//!
//! | Syntax | Clause |
//! |--------|--------|
//! | `null`, `!null` | `is(null)`, `not(is(null))` |
//! | `(a,b)`, `[a,b)`, `(a,b]`, `[a,b]` | range with `gt`/`gte` and `lt`/`lte` bounds |
//! | `{a,b}`, `!{a,b}` | set membership, negated set |
//! | `~~x`, `!~~x` | case-insensitive like, negated |
//! | `~x`, `!~x` | case-sensitive like, negated |
//! | `!x`, `x` | negated equality, equality |
//!
//! Intervals accept only `int`, `float`, `date` and `datetime` fields. Either
//! bound may be left empty for an open-ended range.
//!
//! # Reserved Parameters
//!
//! `order_by` (comma-separated names, `-` prefix for descending), `limit` and
//! `offset` are intercepted before the grammar. Their names are configurable
//! through [`ParsingSchema`].
//!
//! # Casting
//!
//! Values are cast through a [`Caster`]. The default [`CastingOverrides`]
//! table parses booleans case-insensitively and dates/date-times as ISO-8601,
//! and falls back to each type's own constructor for everything else. Add
//! entries to support caller-defined [`FieldType::Custom`] types.

mod cast;
mod clause;
mod config;
mod error;
mod grammar;
mod op;
mod ordering;
mod parser;
mod query;
mod schema;
mod value;

// Re-export public API
pub use cast::{cast_bool, cast_date, cast_datetime, default_cast, CastFn, Caster, CastingOverrides};
pub use clause::{ClauseValue, Comparison, Param, Range};
pub use config::{ConfigError, NotationConfig};
pub use error::{CastError, NotationError, Result};
pub use grammar::{resolve, Pattern, GRAMMAR};
pub use op::Op;
pub use ordering::{parse_order, Dir};
pub use parser::{Params, Parser};
pub use query::{Query, RawPair, RawPairs};
pub use schema::ParsingSchema;
pub use value::{FieldType, TypesMap, Value};
