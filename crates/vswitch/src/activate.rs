// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! One-shot activation scripts for the shell hook.
//!
//! The shell integration sources the generated script, which activates the
//! env and then deletes itself. Nothing here assumes the script is run.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::resolve::resolve;
use crate::virtualenv::activate_script;
use crate::{Registry, Result};

#[cfg(test)]
#[path = "./activate_test.rs"]
mod activate_test;

const SCRIPT_PREFIX: &str = "vs-activate-";

/// Resolve `query` and write an activation script into `script_dir`.
///
/// Returns the path of the script.
pub fn activate(registry: &Registry, query: &str, script_dir: &Path) -> Result<PathBuf> {
    let name = resolve(query, registry.envs.keys()).into_name(query)?;
    let Some(root) = registry.envs.get(&name) else {
        return Err(crate::Error::UnknownEnv(query.to_string()));
    };

    let mut file = tempfile::Builder::new()
        .prefix(SCRIPT_PREFIX)
        .suffix(".sh")
        .tempfile_in(script_dir)?;
    let script = generate_activation_script(&activate_script(root), file.path());
    file.write_all(script.as_bytes())?;

    let (_, path) = file.keep().map_err(|err| err.error)?;
    tracing::debug!(%name, script = %path.display(), "wrote activation script");
    Ok(path)
}

/// Script sourcing `activate` and then removing itself from `script`.
pub fn generate_activation_script(activate: &Path, script: &Path) -> String {
    format!(
        "source {}\nrm {}\n",
        shell_quote(&activate.to_string_lossy()),
        shell_quote(&script.to_string_lossy()),
    )
}

/// Quote `value` for a POSIX shell, leaving plain paths untouched.
pub fn shell_quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+,:@%=".contains(c));
    if plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}
