//! Reserved parameter names.

use serde::{Deserialize, Serialize};

/// Names of the parameters intercepted before the value grammar.
///
/// ```
/// use standout_notation::ParsingSchema;
///
/// let schema = ParsingSchema::default().with_order_by("sort");
/// assert_eq!(schema.order_by, "sort");
/// assert_eq!(schema.limit, "limit");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingSchema {
    /// Parameter holding the comma-separated ordering list.
    pub order_by: String,
    /// Parameter holding the page size.
    pub limit: String,
    /// Parameter holding the number of results to skip.
    pub offset: String,
    /// Reserved for field selection. Not intercepted by the parser.
    pub fieldset: String,
}

impl Default for ParsingSchema {
    fn default() -> Self {
        ParsingSchema {
            order_by: "order_by".to_string(),
            limit: "limit".to_string(),
            offset: "offset".to_string(),
            fieldset: "fieldset".to_string(),
        }
    }
}

impl ParsingSchema {
    pub fn with_order_by(mut self, name: impl Into<String>) -> Self {
        self.order_by = name.into();
        self
    }

    pub fn with_limit(mut self, name: impl Into<String>) -> Self {
        self.limit = name.into();
        self
    }

    pub fn with_offset(mut self, name: impl Into<String>) -> Self {
        self.offset = name.into();
        self
    }

    /// Returns `true` if `name` is one of the intercepted parameters.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.classify(name).is_some()
    }

    /// Returns which intercepted parameter `name` is, if any.
    pub(crate) fn classify(&self, name: &str) -> Option<Reserved> {
        if name == self.order_by {
            Some(Reserved::OrderBy)
        } else if name == self.limit {
            Some(Reserved::Limit)
        } else if name == self.offset {
            Some(Reserved::Offset)
        } else {
            None
        }
    }
}

/// Parameters handled before the value grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reserved {
    OrderBy,
    Limit,
    Offset,
}
