// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `vs bash-complete` command.
//!
//! Meant for `complete -C 'vs bash-complete' vs`: bash passes the program
//! name, the word being completed and the word before it.

use clap::Args;
use miette::Result;
use vswitch::RegistryStore;

/// Complete env names for bash
#[derive(Debug, Args)]
pub struct CmdComplete {
    /// Name of the program being completed
    program: String,

    /// Word being completed
    #[clap(default_value = "", allow_hyphen_values = true)]
    partial: String,

    /// Word preceding the one being completed
    #[clap(allow_hyphen_values = true)]
    previous: Option<String>,
}

impl CmdComplete {
    pub fn run(&mut self, store: &RegistryStore) -> Result<i32> {
        let registry = store.load()?;
        tracing::trace!(program = %self.program, previous = ?self.previous, "completing");

        for name in vswitch::complete(&self.partial, registry.envs.keys()) {
            println!("{name}");
        }

        Ok(0)
    }
}
