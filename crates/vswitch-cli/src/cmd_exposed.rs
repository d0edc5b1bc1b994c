// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `vs exposed` command.

use clap::Args;
use miette::Result;
use vswitch::RegistryStore;

/// List exposed commands
#[derive(Debug, Args)]
pub struct CmdExposed {}

impl CmdExposed {
    pub fn run(&mut self, store: &RegistryStore) -> Result<i32> {
        let registry = store.load()?;
        for (env, command, target) in vswitch::exposures(&registry) {
            println!(
                "{:<width$} {}",
                format!("{env}.{command}"),
                target.display(),
                width = vswitch::NAME_COLUMN_WIDTH
            );
        }
        Ok(0)
    }
}
