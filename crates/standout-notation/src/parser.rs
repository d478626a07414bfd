//! The parser façade.
//!
//! [`Parser`] holds the casting table and the reserved parameter names, both
//! fixed at construction. Each call to [`Parser::parse`] receives its own
//! [`TypesMap`] and returns a lazy [`Params`] iterator.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::cast::{Caster, CastingOverrides};
use crate::clause::{ClauseValue, Param};
use crate::error::{CastError, NotationError, Result};
use crate::grammar::resolve;
use crate::ordering::parse_order;
use crate::query::{Query, RawPairs};
use crate::schema::{ParsingSchema, Reserved};
use crate::value::{FieldType, TypesMap};

/// Translates query input into named clause values.
///
/// The parser holds no per-call state, so one instance can serve any number
/// of parse calls, including from several threads.
///
/// # Example
///
/// ```
/// use standout_notation::{ClauseValue, Comparison, Dir, FieldType, Parser, TypesMap};
///
/// let parser = Parser::new();
/// let types = TypesMap::new()
///     .field("amount", FieldType::Int)
///     .field("name", FieldType::Str);
///
/// let params = parser
///     .parse_all("amount=[1,3]&name=~~bob&order_by=name,-amount&limit=20", &types)
///     .unwrap();
///
/// assert_eq!(params[0].name, "amount");
/// assert_eq!(
///     params[0].value,
///     ClauseValue::range(Some(Comparison::gte(1)), Some(Comparison::lte(3)))
/// );
/// assert_eq!(params[1].value, ClauseValue::like("bob", false));
/// assert_eq!(params[2].value, ClauseValue::order(Dir::Asc, 0));
/// assert_eq!(params[3].value, ClauseValue::order(Dir::Desc, 1));
/// assert_eq!(params[4].value, ClauseValue::Limit(20));
/// ```
#[derive(Debug, Clone)]
pub struct Parser<C = CastingOverrides> {
    caster: C,
    schema: ParsingSchema,
}

impl Parser {
    /// Creates a parser with the default casting overrides and schema.
    pub fn new() -> Self {
        Parser::with_caster(CastingOverrides::default())
    }
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new()
    }
}

impl<C: Caster> Parser<C> {
    /// Creates a parser with a custom caster and the default schema.
    pub fn with_caster(caster: C) -> Self {
        Parser {
            caster,
            schema: ParsingSchema::default(),
        }
    }

    /// Replaces the reserved parameter names.
    pub fn with_schema(mut self, schema: ParsingSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn schema(&self) -> &ParsingSchema {
        &self.schema
    }

    pub fn caster(&self) -> &C {
        &self.caster
    }

    /// Parses a query lazily.
    ///
    /// The returned iterator is single-pass: it drains the query once and
    /// stops for good after yielding the first error.
    pub fn parse<'a, 'q>(
        &'a self,
        query: impl Into<Query<'q>>,
        types: &'a TypesMap,
    ) -> Params<'a, 'q, C> {
        Params {
            parser: self,
            types,
            pairs: query.into().into_pairs(),
            pending: VecDeque::new(),
            done: false,
        }
    }

    /// Parses a query and collects every param, failing on the first error.
    pub fn parse_all<'q>(
        &self,
        query: impl Into<Query<'q>>,
        types: &TypesMap,
    ) -> Result<Vec<Param>> {
        self.parse(query, types).collect()
    }

    /// Parses the value of a single filter field through the value grammar.
    ///
    /// The raw value is trimmed first. The field must be declared in `types`.
    pub fn parse_filter(&self, name: &str, raw: &str, types: &TypesMap) -> Result<Param> {
        let ty = types
            .get(name)
            .ok_or_else(|| NotationError::UndeclaredField {
                field: name.to_string(),
            })?;

        let (pattern, operand) = resolve(raw.trim());
        trace!(field = name, ?pattern, "matched value pattern");

        let value = pattern.build(name, operand, ty, &self.caster)?;
        Ok(Param::new(name, value))
    }

    /// Routes one raw pair to the order, pagination or filter handler.
    fn dispatch(
        &self,
        name: &str,
        raw: &str,
        types: &TypesMap,
        out: &mut VecDeque<Param>,
    ) -> Result<()> {
        trace!(field = name, value = raw, "dispatching parameter");

        match self.schema.classify(name) {
            Some(Reserved::OrderBy) => out.extend(parse_order(raw)),
            Some(Reserved::Limit) => {
                let n = parse_count(name, raw)?;
                out.push_back(Param::new(name, ClauseValue::Limit(n)));
            }
            Some(Reserved::Offset) => {
                let n = parse_count(name, raw)?;
                out.push_back(Param::new(name, ClauseValue::Offset(n)));
            }
            None => out.push_back(self.parse_filter(name, raw, types)?),
        }
        Ok(())
    }
}

/// Parses a limit or offset. Only non-negative integers are accepted; anything
/// else (including `-1`) is an `int` cast error naming the parameter.
fn parse_count(name: &str, raw: &str) -> Result<usize> {
    raw.trim().parse().map_err(|source| NotationError::Cast {
        field: name.to_string(),
        field_type: FieldType::Int,
        source: CastError::InvalidInt {
            raw: raw.to_string(),
            source,
        },
    })
}

/// Lazy sequence of params produced by [`Parser::parse`].
///
/// Each raw pair is dispatched only when the iterator reaches it. Not
/// restartable: parse the query again to get a fresh sequence.
#[derive(Debug)]
pub struct Params<'a, 'q, C = CastingOverrides> {
    parser: &'a Parser<C>,
    types: &'a TypesMap,
    pairs: RawPairs<'q>,
    pending: VecDeque<Param>,
    done: bool,
}

impl<C> Params<'_, '_, C> {
    fn fail(&mut self, err: NotationError) -> Option<Result<Param>> {
        debug!(error = %err, "query parsing failed");
        self.done = true;
        Some(Err(err))
    }
}

impl<C: Caster> Iterator for Params<'_, '_, C> {
    type Item = Result<Param>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(param) = self.pending.pop_front() {
                return Some(Ok(param));
            }
            if self.done {
                return None;
            }

            let (name, raw) = match self.pairs.next() {
                Some(Ok(pair)) => pair,
                Some(Err(err)) => return self.fail(err),
                None => {
                    self.done = true;
                    return None;
                }
            };

            if let Err(err) = self
                .parser
                .dispatch(&name, &raw, self.types, &mut self.pending)
            {
                return self.fail(err);
            }
        }
    }
}

impl<C: Caster> FusedIterator for Params<'_, '_, C> {}
