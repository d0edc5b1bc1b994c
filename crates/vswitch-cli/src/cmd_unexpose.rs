// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `vs unexpose` command.

use clap::Args;
use miette::Result;
use vswitch::RegistryStore;

/// Remove a previously exposed command
#[derive(Debug, Args)]
pub struct CmdUnexpose {
    /// Command name the link was published under
    command: String,
}

impl CmdUnexpose {
    pub fn run(&mut self, store: &RegistryStore) -> Result<i32> {
        let mut registry = store.load()?;
        vswitch::unexpose(&mut registry, &self.command)?;
        store.save(&registry)?;
        Ok(0)
    }
}
