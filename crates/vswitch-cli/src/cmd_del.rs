// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `vs del` command.

use clap::Args;
use miette::Result;
use vswitch::RegistryStore;

/// Forget a registered virtualenv
#[derive(Debug, Args)]
pub struct CmdDel {
    /// Name, or unique name prefix, of the env
    query: String,
}

impl CmdDel {
    pub fn run(&mut self, store: &RegistryStore) -> Result<i32> {
        let mut registry = store.load()?;
        vswitch::remove(&mut registry, &self.query)?;
        store.save(&registry)?;
        Ok(0)
    }
}
