// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for vswitch operations.
//!
//! The `Display` text of every user-facing variant is a single line and is
//! relied upon by shell scripts, so wording changes are breaking changes.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Convenience Result type with vswitch Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during vswitch operations.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Directory has no activation marker, or nothing is active
    #[error("No virtualenv {}", describe_location(.0))]
    #[diagnostic(
        code(vswitch::no_virtualenv),
        help("A virtualenv is a directory containing bin/activate")
    )]
    NoVirtualenv(Option<PathBuf>),

    /// Path is already present in the registry
    #[error("Virtualenv at {} is already registered", .path.display())]
    #[diagnostic(code(vswitch::already_registered))]
    AlreadyRegistered { path: PathBuf, name: String },

    /// Query matched no registered name
    #[error("Unknown env: {0}")]
    #[diagnostic(code(vswitch::unknown_env), help("Run 'vs list' to see registered envs"))]
    UnknownEnv(String),

    /// Query matched several registered names
    #[error("Ambiguous env name, possible matches: {}", .candidates.join(", "))]
    #[diagnostic(code(vswitch::ambiguous_env), help("Type more of the name"))]
    AmbiguousEnv {
        query: String,
        candidates: Vec<String>,
    },

    /// `general.path` was requested but never set
    #[error("Path is not set")]
    #[diagnostic(code(vswitch::path_not_set), help("Set it with 'vs path <dir>'"))]
    PathNotSet,

    /// `general.path` is required to expose commands
    #[error("Path not configured, set it with 'vs path <dir>'")]
    #[diagnostic(code(vswitch::path_not_configured))]
    PathNotConfigured,

    /// Command is not present in the active environment
    #[error("No {command} command in {}", .bin_dir.display())]
    #[diagnostic(code(vswitch::no_command))]
    NoCommand { command: String, bin_dir: PathBuf },

    #[error("{} is not executable", .0.display())]
    #[diagnostic(code(vswitch::not_executable))]
    NotExecutable(PathBuf),

    /// Active environment is not present in the registry
    #[error("Current virtualenv is not registered: {}", .0.display())]
    #[diagnostic(
        code(vswitch::not_registered),
        help("Register it first with 'vs add <path>'")
    )]
    NotRegistered(PathBuf),

    /// Publication target is already taken
    #[error("{} already exists", .0.display())]
    #[diagnostic(code(vswitch::already_exists))]
    AlreadyExists(PathBuf),

    #[error("{key} is already exposed at {}", .target.display())]
    #[diagnostic(
        code(vswitch::already_exposed),
        help("Remove it first with 'vs unexpose <command>'")
    )]
    AlreadyExposed { key: String, target: PathBuf },

    #[error("Invalid env name: {0:?}")]
    #[diagnostic(
        code(vswitch::invalid_name),
        help("Names may only contain letters, digits, '.', '_' and '-'")
    )]
    InvalidName(String),

    #[error("Command {0} is not exposed")]
    #[diagnostic(code(vswitch::not_exposed), help("Run 'vs exposed' to see exposed commands"))]
    NotExposed(String),

    /// Registry file could not be parsed
    #[error("Invalid registry file {}:{line}: {message}", .path.display())]
    #[diagnostic(
        code(vswitch::invalid_registry),
        help("Fix or remove the file; it is recreated empty when missing")
    )]
    InvalidRegistry {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Cannot locate the home directory")]
    #[diagnostic(code(vswitch::no_home), help("Set HOME or pass --config"))]
    NoHomeDirectory,

    /// Failed to read file
    #[error("Failed to read file: {path:?}")]
    #[diagnostic(code(vswitch::read_failed))]
    ReadFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Failed to write file
    #[error("Failed to write file: {path:?}")]
    #[diagnostic(code(vswitch::write_failed))]
    WriteFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// IO error passthrough
    #[error(transparent)]
    #[diagnostic(code(vswitch::io_error))]
    Io(#[from] std::io::Error),
}

fn describe_location(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!("found at {}", path.display()),
        None => "is active".to_string(),
    }
}
