// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! Publishing single commands from the active env as symlinks.

use std::path::{Path, PathBuf};

use crate::registry::{exposed_key, split_exposed_key};
use crate::virtualenv::{absolute, is_executable};
use crate::{Error, Registry, Result};

#[cfg(test)]
#[path = "./expose_test.rs"]
mod expose_test;

/// A command linked into the publish directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exposed {
    /// Registry key, `<env>.<command>`.
    pub key: String,
    /// The command inside the env.
    pub source: PathBuf,
    /// The symlink that was created.
    pub target: PathBuf,
}

/// Link `command` from the active env into the publish directory.
///
/// `active_env` is the root of the currently active env, if any. The checks
/// run in a fixed order and the first failing one is reported.
pub fn expose(registry: &mut Registry, active_env: Option<&Path>, command: &str) -> Result<Exposed> {
    let Some(active_env) = active_env.filter(|p| !p.as_os_str().is_empty()) else {
        return Err(Error::NoVirtualenv(None));
    };
    let active_env = absolute(active_env)?;

    let bin_dir = active_env.join("bin");
    let source = bin_dir.join(command);
    if !source.is_file() {
        return Err(Error::NoCommand {
            command: command.to_string(),
            bin_dir,
        });
    }

    if !is_executable(&source)? {
        return Err(Error::NotExecutable(source));
    }

    let owners = registry.names_for_path(&active_env);
    if owners.len() > 1 {
        tracing::warn!(env = %active_env.display(), names = ?owners, "env registered more than once, using the first");
    }
    let Some(env_name) = owners.first().map(|n| n.to_string()) else {
        return Err(Error::NotRegistered(active_env));
    };

    let publish_dir = registry.publish_dir().ok_or(Error::PathNotConfigured)?;

    let target = publish_dir.join(command);
    if target.symlink_metadata().is_ok() {
        return Err(Error::AlreadyExists(target));
    }

    // The publish dir may have moved since the first expose, the entry still
    // owns its old link.
    let key = exposed_key(&env_name, command);
    if let Some(recorded) = registry.exposed.get(&key) {
        return Err(Error::AlreadyExposed {
            key,
            target: recorded.clone(),
        });
    }

    std::os::unix::fs::symlink(&source, &target)?;
    tracing::info!(%key, source = %source.display(), target = %target.display(), "exposed command");
    registry.exposed.insert(key.clone(), target.clone());

    Ok(Exposed {
        key,
        source,
        target,
    })
}

/// Remove every recorded exposure of `command`, returning the removed entries.
///
/// Links are deleted only while they are still symlinks, so a file that
/// replaced one is left alone.
pub fn unexpose(registry: &mut Registry, command: &str) -> Result<Vec<(String, PathBuf)>> {
    let keys: Vec<String> = registry
        .exposed
        .keys()
        .filter(|key| split_exposed_key(key).is_some_and(|(_, cmd)| cmd == command))
        .cloned()
        .collect();
    if keys.is_empty() {
        return Err(Error::NotExposed(command.to_string()));
    }

    let mut removed = Vec::with_capacity(keys.len());
    for key in keys {
        let Some(target) = registry.exposed.shift_remove(&key) else {
            continue;
        };
        match target.symlink_metadata() {
            Ok(meta) if meta.file_type().is_symlink() => std::fs::remove_file(&target)?,
            Ok(_) => {
                tracing::warn!(target = %target.display(), "not a symlink anymore, leaving it");
            }
            Err(_) => {
                tracing::debug!(target = %target.display(), "link already gone");
            }
        }
        tracing::info!(%key, "unexposed command");
        removed.push((key, target));
    }
    Ok(removed)
}

/// Recorded exposures as `(env, command, target)` in registry order.
pub fn exposures(registry: &Registry) -> Vec<(&str, &str, &Path)> {
    registry
        .exposed
        .iter()
        .filter_map(|(key, target)| {
            let (env, command) = split_exposed_key(key)?;
            Some((env, command, target.as_path()))
        })
        .collect()
}
