// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! vswitch - Virtualenv Switcher
//!
//! This crate provides the core library for keeping a registry of named
//! virtualenv directories, activating them in the current shell and exposing
//! single commands from them on a shared `bin` directory.
//!
//! # Overview
//!
//! The registry lives in `~/.vs.conf` and has three sections:
//!
//! ```ini
//! [general]
//! path = /home/me/.local/bin
//!
//! [envs]
//! tools = /home/me/src/tools/venv
//! docs = /home/me/src/docs/.venv
//!
//! [exposed]
//! tools.black = /home/me/.local/bin/black
//! ```
//!
//! Every command loads the registry with [`RegistryStore::load`], applies one
//! operation from [`registrar`], [`activate`] or [`expose`], and saves it back
//! with [`RegistryStore::save`] when something changed.

pub mod activate;
pub mod document;
pub mod error;
pub mod expose;
pub mod registrar;
pub mod registry;
pub mod resolve;
pub mod store;
pub mod virtualenv;

pub use activate::{activate, generate_activation_script};
pub use document::Document;
pub use error::{Error, Result};
pub use expose::{Exposed, expose, exposures, unexpose};
pub use registrar::{Added, NAME_COLUMN_WIDTH, add, format_listing, list, remove};
pub use registry::Registry;
pub use resolve::{Resolution, complete, resolve};
pub use store::RegistryStore;

/// Well-known filename of the registry, relative to the home directory.
pub const REGISTRY_FILENAME: &str = ".vs.conf";

/// Activation marker every virtualenv root is expected to contain.
pub const ACTIVATE_MARKER: &str = "bin/activate";
