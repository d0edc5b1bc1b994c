// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! vs - Virtualenv Switcher CLI

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::Result;
use vswitch::RegistryStore;

mod cmd_add;
mod cmd_complete;
mod cmd_del;
mod cmd_expose;
mod cmd_exposed;
mod cmd_hook;
mod cmd_list;
mod cmd_path;
mod cmd_unexpose;

use cmd_add::CmdAdd;
use cmd_complete::CmdComplete;
use cmd_del::CmdDel;
use cmd_expose::CmdExpose;
use cmd_exposed::CmdExposed;
use cmd_hook::CmdHook;
use cmd_list::CmdList;
use cmd_path::CmdPath;
use cmd_unexpose::CmdUnexpose;


/// Prefix of multicall names, e.g. a `vs-list` link runs `vs list`.
const MULTICALL_PREFIX: &str = "vs-";

#[derive(Parser)]
#[clap(
    name = "vs",
    about = "Virtualenv Switcher",
    version,
    long_about = "Register virtualenvs under short names, activate them and expose their commands"
)]
struct Opt {
    #[clap(flatten)]
    logging: Logging,

    /// Registry file to use instead of ~/.vs.conf
    #[clap(long, global = true, env = "VS_CONFIG")]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
struct Logging {
    /// Increase verbosity (-v, -vv, -vvv)
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[clap(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List registered virtualenvs
    List(CmdList),

    /// Register a virtualenv
    Add(CmdAdd),

    /// Forget a registered virtualenv
    Del(CmdDel),

    /// Complete env names for bash
    BashComplete(CmdComplete),

    /// Print the command activating an env, for the shell hook
    BashHook(CmdHook),

    /// Show or set the directory exposed commands are linked into
    Path(CmdPath),

    /// Link a command of the active virtualenv into the path directory
    Expose(CmdExpose),

    /// Remove a previously exposed command
    Unexpose(CmdUnexpose),

    /// List exposed commands
    Exposed(CmdExposed),
}

impl Opt {
    fn run(self) -> Result<i32> {
        // Setup logging
        let log_level = match (self.logging.quiet, self.logging.verbose) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::INFO,
            (false, 2) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        };

        // stdout is read by the shell hook, keep logs off it
        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .init();

        let store = match self.config {
            Some(path) => RegistryStore::new(path),
            None => RegistryStore::default_location()?,
        };
        tracing::debug!(registry = %store.path().display(), "using registry");

        // Dispatch to command
        match self.cmd {
            Command::List(mut cmd) => cmd.run(&store),
            Command::Add(mut cmd) => cmd.run(&store),
            Command::Del(mut cmd) => cmd.run(&store),
            Command::BashComplete(mut cmd) => cmd.run(&store),
            Command::BashHook(mut cmd) => cmd.run(&store),
            Command::Path(mut cmd) => cmd.run(&store),
            Command::Expose(mut cmd) => cmd.run(&store),
            Command::Unexpose(mut cmd) => cmd.run(&store),
            Command::Exposed(mut cmd) => cmd.run(&store),
        }
    }
}

/// Rewrite `vs-<cmd> args...` into `vs <cmd> args...`.
fn multicall_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();
    let subcommand = args
        .first()
        .map(PathBuf::from)
        .and_then(|argv0| {
            argv0
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_prefix(MULTICALL_PREFIX))
                .filter(|cmd| !cmd.is_empty())
                .map(OsString::from)
        });
    if let Some(subcommand) = subcommand {
        args[0] = OsString::from("vs");
        args.insert(1, subcommand);
    }
    args
}

fn main() {
    let opt = Opt::parse_from(multicall_args(std::env::args_os()));
    let verbose = opt.logging.verbose > 0;
    match opt.run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            // Scripts match on the one-line message, the full report is opt-in.
            if verbose {
                eprintln!("{err:?}");
            } else {
                eprintln!("{err}");
            }
            std::process::exit(1);
        }
    }
}
