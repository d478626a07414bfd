//! Ordering directives.
//!
//! Provides [`Dir`] for sort direction and [`parse_order`], which turns the
//! value of the order field (`name,-amount`) into prioritized order params.

use serde::Serialize;

use crate::clause::{ClauseValue, Param};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parses a comma-separated list of field names into order params.
///
/// A leading `-` marks a field as descending. Names are trimmed, and segments
/// with no name left (`,,` or a bare `-`) are skipped. Priority is the
/// position of the name among the non-empty names, starting at 0. Repeated names are kept as
/// independent entries.
///
/// ```
/// use standout_notation::{parse_order, ClauseValue, Dir};
///
/// let params = parse_order("name,-amount");
/// assert_eq!(params[0].name, "name");
/// assert_eq!(params[0].value, ClauseValue::order(Dir::Asc, 0));
/// assert_eq!(params[1].name, "amount");
/// assert_eq!(params[1].value, ClauseValue::order(Dir::Desc, 1));
/// ```
pub fn parse_order(names: &str) -> Vec<Param> {
    names
        .split(',')
        .filter_map(|segment| {
            let segment = segment.trim();
            let (dir, name) = match segment.strip_prefix('-') {
                Some(field) => (Dir::Desc, field.trim()),
                None => (Dir::Asc, segment),
            };
            (!name.is_empty()).then_some((dir, name))
        })
        .enumerate()
        .map(|(priority, (dir, name))| Param::new(name, ClauseValue::order(dir, priority)))
        .collect()
}
