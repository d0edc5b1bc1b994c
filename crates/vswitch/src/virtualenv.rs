// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! Filesystem checks on virtualenv directories.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::ACTIVATE_MARKER;

#[cfg(test)]
#[path = "./virtualenv_test.rs"]
mod virtualenv_test;

/// Directory names that say nothing about what the environment is for.
const GENERIC_DIR_NAMES: &[&str] = &["venv", ".venv", "env", ".env", "virtualenv"];

/// Path of the activation script for the env rooted at `root`.
pub fn activate_script(root: &Path) -> PathBuf {
    root.join(ACTIVATE_MARKER)
}

/// Whether `root` looks like a virtualenv, i.e. has `bin/activate`.
pub fn is_virtualenv(root: &Path) -> bool {
    activate_script(root).is_file()
}

/// Whether any of the owner, group or other execute bits is set on `path`.
pub fn is_executable(path: &Path) -> std::io::Result<bool> {
    let meta = std::fs::metadata(path)?;
    Ok(meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

/// Make `path` absolute against the current directory.
///
/// Symlinks are preserved so the registry holds what the user typed.
pub fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    std::path::absolute(path)
}

/// Name suggested for the env rooted at `root`.
///
/// Uses the last path segment, or its parent when the segment is a generic
/// name like `venv`. Characters not allowed in env names become `-`.
pub fn default_name(root: &Path) -> Option<String> {
    let mut segments = root
        .components()
        .rev()
        .filter_map(|c| match c {
            std::path::Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        });
    let last = segments.next()?;
    let chosen = if GENERIC_DIR_NAMES.iter().any(|generic| *generic == last) {
        segments.next().unwrap_or(last)
    } else {
        last
    };
    let name: String = chosen
        .chars()
        .map(|c| if is_name_char(c) { c } else { '-' })
        .collect();
    Some(name)
}

pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// Whether `name` can be stored as an env name.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_name_char)
}
