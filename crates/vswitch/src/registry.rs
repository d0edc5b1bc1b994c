// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! In-memory form of the registry document.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::document::{Document, Section};

#[cfg(test)]
#[path = "./registry_test.rs"]
mod registry_test;

/// Section holding general settings.
pub const GENERAL_SECTION: &str = "general";

/// Section mapping env names to their root directories.
pub const ENVS_SECTION: &str = "envs";

/// Section mapping `<env>.<command>` to published symlinks.
pub const EXPOSED_SECTION: &str = "exposed";

/// Key under `general` naming the directory exposed commands are linked into.
pub const PATH_KEY: &str = "path";

/// The three namespaces of the registry file.
///
/// Every map keeps insertion order, which is also the listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    /// General settings. Only `path` is interpreted, other keys are preserved.
    pub general: IndexMap<String, String>,
    /// Registered environments by name.
    pub envs: IndexMap<String, PathBuf>,
    /// Exposed commands by `<env>.<command>` key.
    pub exposed: IndexMap<String, PathBuf>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The configured directory exposed commands are published into.
    pub fn publish_dir(&self) -> Option<PathBuf> {
        self.general
            .get(PATH_KEY)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }

    pub fn set_publish_dir<P: AsRef<Path>>(&mut self, path: P) {
        self.general.insert(
            PATH_KEY.to_string(),
            path.as_ref().to_string_lossy().into_owned(),
        );
    }

    /// Names of registered environments, in registration order.
    pub fn env_names(&self) -> Vec<String> {
        self.envs.keys().cloned().collect()
    }

    /// All env names registered for exactly this root directory.
    pub fn names_for_path(&self, path: &Path) -> Vec<&str> {
        self.envs
            .iter()
            .filter(|(_, p)| p.as_path() == path)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Build the registry view of a parsed document.
    ///
    /// Sections other than the three known ones are ignored.
    pub fn from_document(mut doc: Document) -> Self {
        let to_paths = |section: Section| {
            section
                .into_iter()
                .map(|(k, v)| (k, PathBuf::from(v)))
                .collect::<IndexMap<_, _>>()
        };
        Self {
            general: doc.take_section(GENERAL_SECTION),
            envs: to_paths(doc.take_section(ENVS_SECTION)),
            exposed: to_paths(doc.take_section(EXPOSED_SECTION)),
        }
    }

    /// Convert into a document that always has all three sections.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.section_mut(GENERAL_SECTION)
            .extend(self.general.iter().map(|(k, v)| (k.clone(), v.clone())));
        let from_paths = |map: &IndexMap<String, PathBuf>| {
            map.iter()
                .map(|(k, v)| (k.clone(), v.to_string_lossy().into_owned()))
                .collect::<Vec<_>>()
        };
        doc.section_mut(ENVS_SECTION).extend(from_paths(&self.envs));
        doc.section_mut(EXPOSED_SECTION)
            .extend(from_paths(&self.exposed));
        doc
    }
}

/// Registry key recording that `command` from `env` was exposed.
pub fn exposed_key(env: &str, command: &str) -> String {
    format!("{env}.{command}")
}

/// Split an exposed key back into env name and command.
///
/// Env names may themselves contain dots, so the split is on the last one.
pub fn split_exposed_key(key: &str) -> Option<(&str, &str)> {
    key.rsplit_once('.')
}
