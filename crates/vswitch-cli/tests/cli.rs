// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests running the `vs` binary against a throwaway home.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Home {
    tmp: TempDir,
}

struct Output {
    code: i32,
    stdout: String,
    stderr: String,
}

impl Home {
    fn path(&self) -> PathBuf {
        self.tmp.path().join("home")
    }

    fn bindir(&self) -> PathBuf {
        self.path().join("bin")
    }

    fn config(&self) -> PathBuf {
        self.path().join(".vs.conf")
    }

    fn read_config(&self) -> String {
        std::fs::read_to_string(self.config()).expect("registry file should exist")
    }

    /// A virtualenv at `<home>/mock/venv`.
    fn mock_venv(&self) -> PathBuf {
        let venv = self.path().join("mock").join("venv");
        std::fs::create_dir_all(venv.join("bin")).unwrap();
        std::fs::write(venv.join("bin").join("activate"), "foo").unwrap();
        venv
    }

    fn write_full_config(&self) {
        std::fs::write(
            self.config(),
            format!(
                "[envs]\n\
                 foo = /opt/foo\n\
                 bar = /usr/bar\n\
                 baz = /usr/baz\n\
                 very-long-virtualenv-name = /usr/qux\n\
                 \n\
                 [general]\n\
                 path = {}\n\n",
                self.bindir().display()
            ),
        )
        .unwrap();
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_vs"));
        cmd.args(args)
            .env("HOME", self.path())
            .env("TMPDIR", self.tmp.path())
            .env_remove("VIRTUAL_ENV")
            .env_remove("VS_CONFIG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.run_with(self.command(args))
    }

    fn run_in_env(&self, venv: Option<&Path>, args: &[&str]) -> Output {
        let mut cmd = self.command(args);
        if let Some(venv) = venv {
            cmd.env("VIRTUAL_ENV", venv);
        }
        self.run_with(cmd)
    }

    fn run_with(&self, mut cmd: Command) -> Output {
        let out = cmd.output().expect("Failed to run vs");
        let output = Output {
            code: out.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        };
        println!("RETCODE: {}", output.code);
        println!("STDOUT: {}", output.stdout);
        println!("STDERR: {}", output.stderr);
        output
    }
}

#[fixture]
fn home() -> Home {
    let home = Home {
        tmp: TempDir::new().unwrap(),
    };
    std::fs::create_dir_all(home.bindir()).unwrap();
    home
}

#[rstest]
fn test_create_config(home: Home) {
    let ret = home.run(&["list"]);
    assert_eq!(ret.code, 0);
    assert_eq!(ret.stdout, "");
    assert_eq!(home.read_config(), "[general]\n\n[envs]\n\n[exposed]\n\n");
}

#[rstest]
fn test_add_bogus(home: Home) {
    let nonenv = home.path().join("nonenv");
    std::fs::create_dir_all(&nonenv).unwrap();

    let ret = home.run(&["add", nonenv.to_str().unwrap()]);
    assert_eq!(ret.code, 1);
    assert!(ret.stderr.starts_with("No virtualenv"));
}

#[rstest]
fn test_add_good(home: Home) {
    let venv = home.mock_venv();
    let ret = home.run(&["add", venv.to_str().unwrap()]);
    assert_eq!(ret.code, 0);
    assert_eq!(ret.stdout, "");
    assert!(
        home.read_config()
            .contains(&format!("mock = {}\n", venv.display()))
    );
}

#[rstest]
fn test_add_name(home: Home) {
    let venv = home.mock_venv();
    let ret = home.run(&["add", venv.to_str().unwrap(), "foo"]);
    assert_eq!(ret.code, 0);
    assert!(
        home.read_config()
            .contains(&format!("foo = {}\n", venv.display()))
    );
}

#[rstest]
fn test_add_duplicate(home: Home) {
    let venv = home.mock_venv();
    home.run(&["add", venv.to_str().unwrap()]);

    let ret = home.run(&["add", venv.to_str().unwrap(), "other"]);
    assert_eq!(ret.code, 1);
    assert!(ret.stderr.ends_with("is already registered\n"));
}

#[rstest]
fn test_add_duplicate_name(home: Home) {
    home.write_full_config();
    let venv = home.mock_venv();

    let ret = home.run(&["add", venv.to_str().unwrap(), "foo"]);
    assert_eq!(ret.code, 0);
    assert!(ret.stdout.ends_with("as foo-1\n"));

    let other = home.path().join("other");
    std::fs::create_dir_all(other.join("bin")).unwrap();
    std::fs::write(other.join("bin").join("activate"), "").unwrap();
    let ret = home.run(&["add", other.to_str().unwrap(), "foo"]);
    assert_eq!(ret.code, 0);
    assert!(ret.stdout.ends_with("as foo-2\n"));
}

#[rstest]
fn test_list(home: Home) {
    home.write_full_config();

    let ret = home.run(&["list"]);
    assert_eq!(ret.stdout, "foo\nbar\nbaz\nvery-long-virtualenv-name\n");

    let ret = home.run(&["list", "-f"]);
    assert_eq!(
        ret.stdout,
        "foo                  /opt/foo\n\
         bar                  /usr/bar\n\
         baz                  /usr/baz\n\
         very-long-virtualenv-name /usr/qux\n"
    );
}

#[rstest]
fn test_del(home: Home) {
    home.write_full_config();

    let ret = home.run(&["del", "fo"]);
    assert_eq!(ret.code, 0);
    assert_eq!(ret.stdout, "");
    assert!(!home.read_config().contains("foo ="));
    assert!(home.read_config().contains("bar = /usr/bar"));
}

#[rstest]
fn test_del_ambiguous_keeps_registry(home: Home) {
    home.write_full_config();
    let before = home.read_config();

    let ret = home.run(&["del", "ba"]);
    assert_eq!(ret.code, 1);
    assert_eq!(
        ret.stderr,
        "Ambiguous env name, possible matches: bar, baz\n"
    );
    assert_eq!(home.read_config(), before);
}

#[rstest]
#[case("", "foo\nbar\nbaz\nvery-long-virtualenv-name\n")]
#[case("b", "bar\nbaz\n")]
#[case("f", "foo\n")]
#[case("q", "")]
fn test_complete(home: Home, #[case] partial: &str, #[case] expected: &str) {
    home.write_full_config();
    let ret = home.run(&["bash-complete", "vs", partial, "vs"]);
    assert_eq!(ret.code, 0);
    assert_eq!(ret.stdout, expected);
}

#[rstest]
fn test_activate(home: Home) {
    home.write_full_config();

    let ret = home.run(&["bash-hook", "foo"]);
    assert_eq!(ret.code, 0);
    let words: Vec<&str> = ret.stdout.split_whitespace().collect();
    assert_eq!(words.len(), 2);
    assert_eq!(words[0], "source");

    let path = words[1];
    assert!(Path::new(path).starts_with(home.tmp.path()));
    let script = std::fs::read_to_string(path).unwrap();
    assert!(script.contains("source /opt/foo/bin/activate"));
    assert!(script.ends_with(&format!("\nrm {path}\n")));
}

#[rstest]
fn test_activate_exact_match_beats_prefix(home: Home) {
    home.write_full_config();
    let ret = home.run(&["bash-hook", "bar"]);
    assert_eq!(ret.code, 0);
    assert!(ret.stdout.starts_with("source "));
}

#[rstest]
fn test_activate_wrong(home: Home) {
    home.write_full_config();
    let ret = home.run(&["bash-hook", "qux"]);
    assert_eq!(ret.code, 1);
    assert_eq!(ret.stdout, "");
    assert_eq!(ret.stderr, "Unknown env: qux\n");
}

#[rstest]
fn test_activate_ambiguous(home: Home) {
    home.write_full_config();
    let ret = home.run(&["bash-hook", "ba"]);
    assert_eq!(ret.code, 1);
    assert_eq!(ret.stdout, "");
    assert_eq!(
        ret.stderr,
        "Ambiguous env name, possible matches: bar, baz\n"
    );
}

#[rstest]
fn test_path_not_set(home: Home) {
    let ret = home.run(&["path"]);
    assert_eq!(ret.code, 1);
    assert_eq!(ret.stderr, "Path is not set\n");
}

#[rstest]
fn test_path(home: Home) {
    home.write_full_config();
    let ret = home.run(&["path"]);
    assert_eq!(ret.code, 0);
    assert_eq!(ret.stdout, format!("{}\n", home.bindir().display()));
}

#[rstest]
fn test_set_path(home: Home) {
    let bindir = home.bindir();
    let ret = home.run(&["path", bindir.to_str().unwrap()]);
    assert_eq!(ret.code, 0);
    assert!(
        home.read_config()
            .contains(&format!("path = {}\n", bindir.display()))
    );
}

#[rstest]
fn test_expose(home: Home) {
    home.write_full_config();
    let venv = home.mock_venv();
    let script = venv.join("bin").join("foo");
    std::fs::write(&script, "#!/bin/sh").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o777)).unwrap();
    home.run(&["add", venv.to_str().unwrap()]);

    let ret = home.run_in_env(Some(&venv), &["expose", "foo"]);
    assert_eq!(ret.code, 0);
    assert_eq!(ret.stdout, "");

    let exposed = home.bindir().join("foo");
    assert!(
        home.read_config()
            .contains(&format!("mock.foo = {}\n", exposed.display()))
    );
    assert!(exposed.symlink_metadata().unwrap().file_type().is_symlink());

    let ret = home.run(&["exposed"]);
    assert!(ret.stdout.starts_with("mock.foo "));

    let ret = home.run(&["unexpose", "foo"]);
    assert_eq!(ret.code, 0);
    assert!(exposed.symlink_metadata().is_err());
    assert!(!home.read_config().contains("mock.foo"));
}

#[rstest]
fn test_expose_noenv(home: Home) {
    let ret = home.run_in_env(None, &["expose", "foo"]);
    assert_eq!(ret.code, 1);
    assert!(ret.stderr.starts_with("No virtualenv"));
}

#[rstest]
fn test_expose_nocmd(home: Home) {
    let venv = home.mock_venv();
    let ret = home.run_in_env(Some(&venv), &["expose", "foo"]);
    assert_eq!(ret.code, 1);
    assert!(ret.stderr.starts_with("No foo command"));
}

#[rstest]
fn test_expose_other_errors(home: Home) {
    let venv = home.mock_venv();
    let script = venv.join("bin").join("foo");
    std::fs::write(&script, "#!/bin/sh").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o644)).unwrap();

    let ret = home.run_in_env(Some(&venv), &["expose", "foo"]);
    assert_eq!(ret.code, 1);
    assert!(ret.stderr.ends_with("is not executable\n"));

    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o777)).unwrap();
    let ret = home.run_in_env(Some(&venv), &["expose", "foo"]);
    assert_eq!(ret.code, 1);
    assert!(ret.stderr.starts_with("Current virtualenv is not registered"));

    home.run(&["add", venv.to_str().unwrap()]);
    let ret = home.run_in_env(Some(&venv), &["expose", "foo"]);
    assert_eq!(ret.code, 1);
    assert!(ret.stderr.starts_with("Path not configured"));

    home.run(&["path", home.bindir().to_str().unwrap()]);
    std::fs::write(home.bindir().join("foo"), "").unwrap();
    let ret = home.run_in_env(Some(&venv), &["expose", "foo"]);
    assert_eq!(ret.code, 1);
    assert!(ret.stderr.ends_with("/foo already exists\n"));
}

#[rstest]
fn test_config_override(home: Home) {
    let other = home.tmp.path().join("elsewhere.conf");
    let mut cmd = home.command(&["list"]);
    cmd.env("VS_CONFIG", &other);
    let ret = home.run_with(cmd);
    assert_eq!(ret.code, 0);
    assert!(other.is_file());
    assert!(!home.config().exists());
}

#[rstest]
fn test_multicall_name(home: Home) {
    home.write_full_config();
    let link = home.tmp.path().join("vs-list");
    std::os::unix::fs::symlink(env!("CARGO_BIN_EXE_vs"), &link).unwrap();

    let mut cmd = Command::new(&link);
    cmd.env("HOME", home.path())
        .env("TMPDIR", home.tmp.path())
        .env_remove("VS_CONFIG");
    let ret = home.run_with(cmd);
    assert_eq!(ret.code, 0);
    assert_eq!(ret.stdout, "foo\nbar\nbaz\nvery-long-virtualenv-name\n");
}
