//! Comparison operators carried by clause values.
//!
//! The [`Op`] enum covers equality and the four range bounds. Equality is
//! used by literal clauses; the bound operators appear standalone or as the
//! two sides of a [`Range`](crate::Range).

use serde::Serialize;

/// Comparison operator for a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    /// Equal.
    Eq,
    /// Greater than (exclusive lower bound).
    Gt,
    /// Greater than or equal (inclusive lower bound).
    Gte,
    /// Less than (exclusive upper bound).
    Lt,
    /// Less than or equal (inclusive upper bound).
    Lte,
}

impl Op {
    /// Returns `true` if this operator can be the left side of a range.
    pub fn is_lower_bound(self) -> bool {
        matches!(self, Op::Gt | Op::Gte)
    }

    /// Returns `true` if this operator can be the right side of a range.
    pub fn is_upper_bound(self) -> bool {
        matches!(self, Op::Lt | Op::Lte)
    }

    /// Returns `true` for the inclusive bounds (`Gte`, `Lte`).
    pub fn is_inclusive(self) -> bool {
        matches!(self, Op::Gte | Op::Lte)
    }

    /// Returns the display name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
