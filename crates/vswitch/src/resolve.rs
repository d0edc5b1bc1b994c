// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! Prefix-based resolution of env names.

use crate::{Error, Result};

#[cfg(test)]
#[path = "./resolve_test.rs"]
mod resolve_test;

/// Outcome of resolving a (possibly partial) env name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one name matched, or the query equals a name.
    Unique(String),
    /// Several names share the prefix; listed in registry order.
    Ambiguous(Vec<String>),
    NotFound,
}

impl Resolution {
    /// Turn the resolution into the matched name or a user-facing error.
    pub fn into_name(self, query: &str) -> Result<String> {
        match self {
            Resolution::Unique(name) => Ok(name),
            Resolution::Ambiguous(candidates) => Err(Error::AmbiguousEnv {
                query: query.to_string(),
                candidates,
            }),
            Resolution::NotFound => Err(Error::UnknownEnv(query.to_string())),
        }
    }
}

/// Resolve `query` against `known` names.
///
/// A name matches when `query` is a prefix of it. A name equal to `query`
/// wins even when other names share the prefix.
pub fn resolve<I, S>(query: &str, known: I) -> Resolution
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut matches = complete(query, known);
    if matches.iter().any(|name| name == query) {
        return Resolution::Unique(query.to_string());
    }
    match matches.len() {
        0 => Resolution::NotFound,
        1 => Resolution::Unique(matches.remove(0)),
        _ => Resolution::Ambiguous(matches),
    }
}

/// Every name starting with `partial`, in the order given.
pub fn complete<I, S>(partial: &str, known: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    known
        .into_iter()
        .filter(|name| name.as_ref().starts_with(partial))
        .map(|name| name.as_ref().to_string())
        .collect()
}
