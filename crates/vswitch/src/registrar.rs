// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! Adding, removing and listing registered environments.
//!
//! These functions only mutate the in-memory [`Registry`]; callers save it
//! through a [`crate::RegistryStore`] once an operation succeeds.

use std::path::{Path, PathBuf};

use crate::registry::split_exposed_key;
use crate::resolve::resolve;
use crate::virtualenv::{absolute, default_name, is_valid_name, is_virtualenv};
use crate::{Error, Registry, Result};

#[cfg(test)]
#[path = "./registrar_test.rs"]
mod registrar_test;

/// Width of the name column in formatted listings.
pub const NAME_COLUMN_WIDTH: usize = 20;

/// Result of a successful [`add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Added {
    /// Name the env was registered under.
    pub name: String,
    /// Name that was asked for, or derived from the path.
    pub wanted: String,
    pub path: PathBuf,
}

impl Added {
    /// True when the wanted name was taken and a suffixed one was used.
    pub fn renamed(&self) -> bool {
        self.name != self.wanted
    }
}

/// Register the virtualenv at `path`, optionally under `name`.
pub fn add(registry: &mut Registry, path: &Path, name: Option<&str>) -> Result<Added> {
    let path = absolute(path)?;
    if !is_virtualenv(&path) {
        return Err(Error::NoVirtualenv(Some(path)));
    }

    let owners = registry.names_for_path(&path);
    if owners.len() > 1 {
        tracing::warn!(path = %path.display(), names = ?owners, "path registered more than once");
    }
    if let Some(existing) = owners.first() {
        return Err(Error::AlreadyRegistered {
            name: existing.to_string(),
            path,
        });
    }

    let wanted = match name {
        Some(name) if is_valid_name(name) => name.to_string(),
        Some(name) => return Err(Error::InvalidName(name.to_string())),
        None => default_name(&path)
            .filter(|n| is_valid_name(n))
            .ok_or_else(|| Error::InvalidName(path.display().to_string()))?,
    };

    let name = unused_name(registry, &wanted);
    tracing::info!(%name, path = %path.display(), "registering env");
    registry.envs.insert(name.clone(), path.clone());
    Ok(Added { name, wanted, path })
}

/// `wanted`, or the first of `wanted-1`, `wanted-2`, ... not yet registered.
fn unused_name(registry: &Registry, wanted: &str) -> String {
    if !registry.envs.contains_key(wanted) {
        return wanted.to_string();
    }
    (1..)
        .map(|n| format!("{wanted}-{n}"))
        .find(|candidate| !registry.envs.contains_key(candidate))
        .unwrap_or_else(|| wanted.to_string())
}

/// Remove the env `query` resolves to, returning its name and root.
///
/// Unknown and ambiguous queries fail without touching the registry.
pub fn remove(registry: &mut Registry, query: &str) -> Result<(String, PathBuf)> {
    let name = resolve(query, registry.envs.keys()).into_name(query)?;
    let path = registry
        .envs
        .shift_remove(&name)
        .ok_or_else(|| Error::UnknownEnv(query.to_string()))?;

    let dangling: Vec<&str> = registry
        .exposed
        .keys()
        .filter(|key| split_exposed_key(key).is_some_and(|(env, _)| env == name))
        .map(String::as_str)
        .collect();
    if !dangling.is_empty() {
        tracing::info!(%name, exposed = ?dangling, "removed env still has exposed commands");
    }

    tracing::info!(%name, path = %path.display(), "removed env");
    Ok((name, path))
}

/// Registered envs as `(name, root)` pairs in registration order.
pub fn list(registry: &Registry) -> impl Iterator<Item = (&str, &Path)> {
    registry
        .envs
        .iter()
        .map(|(name, path)| (name.as_str(), path.as_path()))
}

/// Render `name path` lines with names padded to [`NAME_COLUMN_WIDTH`].
///
/// Longer names overflow the column and keep a single separating space.
pub fn format_listing<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a Path)>,
{
    entries
        .into_iter()
        .map(|(name, path)| {
            format!(
                "{name:<width$} {}\n",
                path.display(),
                width = NAME_COLUMN_WIDTH
            )
        })
        .collect()
}
