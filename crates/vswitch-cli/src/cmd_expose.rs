// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `vs expose` command.

use std::path::PathBuf;

use clap::Args;
use miette::Result;
use vswitch::RegistryStore;

/// Link a command of the active virtualenv into the path directory
#[derive(Debug, Args)]
pub struct CmdExpose {
    /// Command in the env's bin directory
    command: String,

    /// Root of the active virtualenv
    #[clap(long, env = "VIRTUAL_ENV", hide_env_values = true)]
    virtualenv: Option<PathBuf>,
}

impl CmdExpose {
    pub fn run(&mut self, store: &RegistryStore) -> Result<i32> {
        let mut registry = store.load()?;
        vswitch::expose(&mut registry, self.virtualenv.as_deref(), &self.command)?;
        store.save(&registry)?;
        Ok(0)
    }
}
