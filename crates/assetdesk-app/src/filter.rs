// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use std::fmt;

use crate::metrics::AsOf;
use crate::record::Record;

/// Selector value meaning "no constraint".
pub const ALL_SENTINEL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorValue {
    All,
    Is(String),
}

impl SelectorValue {
    pub fn parse(value: &str) -> Self {
        if value == ALL_SENTINEL {
            Self::All
        } else {
            Self::Is(value.to_owned())
        }
    }
}

/// A categorical filter on one field of a record kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector<F> {
    pub field: F,
    pub value: SelectorValue,
}

impl<F> Selector<F> {
    pub fn all(field: F) -> Self {
        Self {
            field,
            value: SelectorValue::All,
        }
    }

    pub fn is(field: F, value: impl Into<String>) -> Self {
        Self {
            field,
            value: SelectorValue::Is(value.into()),
        }
    }

    pub fn is_all(&self) -> bool {
        self.value == SelectorValue::All
    }
}

impl<F: fmt::Display> fmt::Display for Selector<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            SelectorValue::All => write!(f, "{}={ALL_SENTINEL}", self.field),
            SelectorValue::Is(value) => write!(f, "{}={value}", self.field),
        }
    }
}

/// Parses `field=value` for record kind `R`. The value is kept verbatim.
pub fn parse_selector<R: Record>(raw: &str) -> Result<Selector<R::Field>> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("filter {raw:?} must look like field=value"))?;
    let field = R::parse_field(name.trim()).ok_or_else(|| {
        anyhow!(
            "unknown {} filter field {:?} -- check the field name and retry",
            R::KIND,
            name.trim()
        )
    })?;
    Ok(Selector {
        field,
        value: SelectorValue::parse(value.trim()),
    })
}

/// True when the lowercased query is contained in any searchable field.
pub fn matches_query<R: Record>(record: &R, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    record
        .search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

pub fn matches_selector<R: Record>(
    record: &R,
    selector: &Selector<R::Field>,
    as_of: AsOf,
) -> bool {
    match &selector.value {
        SelectorValue::All => true,
        SelectorValue::Is(value) => record.field_value(selector.field, as_of) == value.as_str(),
    }
}

pub fn matches<R: Record>(
    record: &R,
    query: &str,
    selectors: &[Selector<R::Field>],
    as_of: AsOf,
) -> bool {
    matches_query(record, query)
        && selectors
            .iter()
            .all(|selector| matches_selector(record, selector, as_of))
}

/// Order-preserving subsequence of `records` passing the query and every
/// selector, with derived fields evaluated at `as_of`.
pub fn filter<R: Record>(
    records: &[R],
    query: &str,
    selectors: &[Selector<R::Field>],
    as_of: AsOf,
) -> Vec<R> {
    records
        .iter()
        .filter(|record| matches(*record, query, selectors, as_of))
        .cloned()
        .collect()
}
