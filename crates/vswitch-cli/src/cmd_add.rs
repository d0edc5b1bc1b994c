// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `vs add` command.

use std::path::PathBuf;

use clap::Args;
use miette::Result;
use vswitch::RegistryStore;

/// Register a virtualenv
#[derive(Debug, Args)]
pub struct CmdAdd {
    /// Root directory of the virtualenv
    path: PathBuf,

    /// Name to register it under (default: derived from the path)
    name: Option<String>,
}

impl CmdAdd {
    pub fn run(&mut self, store: &RegistryStore) -> Result<i32> {
        let mut registry = store.load()?;
        let added = vswitch::add(&mut registry, &self.path, self.name.as_deref())?;
        store.save(&registry)?;

        if added.renamed() {
            println!(
                "Name {} is taken, registered as {}",
                added.wanted, added.name
            );
        }

        Ok(0)
    }
}
