// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `vs path` command.

use std::path::PathBuf;

use clap::Args;
use miette::{IntoDiagnostic, Result};
use vswitch::RegistryStore;

/// Show or set the directory exposed commands are linked into
#[derive(Debug, Args)]
pub struct CmdPath {
    /// New directory; prints the current one when omitted
    path: Option<PathBuf>,
}

impl CmdPath {
    pub fn run(&mut self, store: &RegistryStore) -> Result<i32> {
        let mut registry = store.load()?;

        let Some(path) = &self.path else {
            let current = registry.publish_dir().ok_or(vswitch::Error::PathNotSet)?;
            println!("{}", current.display());
            return Ok(0);
        };

        let path = std::path::absolute(path).into_diagnostic()?;
        if !path.is_dir() {
            tracing::warn!(path = %path.display(), "path directory does not exist yet");
        }
        registry.set_publish_dir(&path);
        store.save(&registry)?;
        tracing::info!(path = %path.display(), "path set");
        Ok(0)
    }
}
