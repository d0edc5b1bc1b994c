// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! Loading and saving the registry file.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::{Error, REGISTRY_FILENAME, Registry, Result};

#[cfg(test)]
#[path = "./store_test.rs"]
mod store_test;

/// Same limit the kernel applies when resolving a path.
const MAX_SYMLINK_HOPS: usize = 40;

/// Handle on the registry file at a fixed location.
///
/// There is no locking: two processes saving at the same time race and the
/// last one to rename its file wins.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.vs.conf`.
    pub fn default_location() -> Result<Self> {
        let home = dirs::home_dir().ok_or(Error::NoHomeDirectory)?;
        Ok(Self::new(home.join(REGISTRY_FILENAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the registry.
    ///
    /// A missing file yields an empty registry, which is written out at once
    /// so the file always carries all three sections after first use.
    pub fn load(&self) -> Result<Registry> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "registry missing, initializing");
                let registry = Registry::new();
                self.save(&registry)?;
                return Ok(registry);
            }
            Err(error) => {
                return Err(Error::ReadFailed {
                    path: self.path.clone(),
                    error,
                });
            }
        };

        let doc = Document::parse(&text).map_err(|err| Error::InvalidRegistry {
            path: self.path.clone(),
            line: err.line,
            message: err.message,
        })?;
        let registry = Registry::from_document(doc);
        tracing::debug!(
            path = %self.path.display(),
            envs = registry.envs.len(),
            exposed = registry.exposed.len(),
            "loaded registry"
        );
        Ok(registry)
    }

    /// Overwrite the registry file with `registry`.
    ///
    /// The document is written next to the target and renamed over it, so
    /// readers see either the old or the new content. A symlinked registry is
    /// written through to the file it points at, and an existing file keeps
    /// its permission bits.
    pub fn save(&self, registry: &Registry) -> Result<()> {
        let write_failed = |error: std::io::Error| Error::WriteFailed {
            path: self.path.clone(),
            error,
        };

        let target = self.write_target().map_err(write_failed)?;
        let dir = match target.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(write_failed)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(write_failed)?;
        match std::fs::metadata(&target) {
            Ok(meta) => tmp
                .as_file()
                .set_permissions(meta.permissions())
                .map_err(write_failed)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(write_failed(err)),
        }
        tmp.write_all(registry.to_document().render().as_bytes())
            .map_err(write_failed)?;
        tmp.persist(&target)
            .map_err(|err| write_failed(err.error))?;

        tracing::debug!(path = %self.path.display(), target = %target.display(), "saved registry");
        Ok(())
    }

    /// The file the registry content actually lives in.
    ///
    /// Follows symlinks from the registry path, including dangling ones, so
    /// the rename replaces the pointed-to file rather than the link.
    fn write_target(&self) -> std::io::Result<PathBuf> {
        let mut target = self.path.clone();
        for _ in 0..MAX_SYMLINK_HOPS {
            match std::fs::symlink_metadata(&target) {
                Ok(meta) if meta.file_type().is_symlink() => {
                    let link = std::fs::read_link(&target)?;
                    target = match target.parent() {
                        Some(parent) if link.is_relative() => parent.join(link),
                        _ => link,
                    };
                }
                Ok(_) => return Ok(target),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(target),
                Err(err) => return Err(err),
            }
        }
        Err(std::io::Error::other(format!(
            "too many levels of symbolic links: {}",
            self.path.display()
        )))
    }
}
