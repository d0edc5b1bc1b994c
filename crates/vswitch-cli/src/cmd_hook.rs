// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `vs bash-hook` command.

use clap::Args;
use miette::Result;
use vswitch::RegistryStore;
use vswitch::activate::shell_quote;

/// Print the command activating an env, for the shell hook
///
/// The printed line sources a one-shot script that removes itself.
#[derive(Debug, Args)]
pub struct CmdHook {
    /// Name, or unique name prefix, of the env
    query: String,
}

impl CmdHook {
    pub fn run(&mut self, store: &RegistryStore) -> Result<i32> {
        let registry = store.load()?;
        let script = vswitch::activate(&registry, &self.query, &std::env::temp_dir())?;
        println!("source {}", shell_quote(&script.to_string_lossy()));
        Ok(0)
    }
}
