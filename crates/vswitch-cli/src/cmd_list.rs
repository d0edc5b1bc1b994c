// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `vs list` command.

use clap::Args;
use miette::Result;
use vswitch::RegistryStore;

/// List registered virtualenvs
#[derive(Debug, Args)]
pub struct CmdList {
    /// Show the path of each env next to its name
    #[clap(short = 'f', long)]
    full: bool,
}

impl CmdList {
    pub fn run(&mut self, store: &RegistryStore) -> Result<i32> {
        let registry = store.load()?;

        if self.full {
            print!("{}", vswitch::format_listing(vswitch::list(&registry)));
        } else {
            for (name, _) in vswitch::list(&registry) {
                println!("{name}");
            }
        }

        Ok(0)
    }
}
