//! Shared test utilities for integration tests
//!
//! Copies the sample sources under `tests/fixtures` into a fresh temp
//! directory so every test runs hermetically, without picking up a
//! developer's `scopegrep.toml`.

#![allow(dead_code)]

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use std::process::Command;

/// Temp directory holding `app.rs`, `server.go`, `shapes.py` and `notes.txt`.
pub fn make_fixture() -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    let fixtures = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");
    tmp.copy_from(fixtures, &["*"])
        .expect("copy fixtures");

    tmp
}

/// `sgr` running inside `dir`, with config env overrides cleared.
pub fn sgr(dir: &assert_fs::TempDir) -> Command
{
    let mut cmd = Command::cargo_bin("sgr").expect("bin");
    cmd.current_dir(dir.path());

    for (key, _) in std::env::vars()
    {
        if key.starts_with("SCOPEGREP_")
        {
            cmd.env_remove(key);
        }
    }
    cmd.env_remove("RUST_LOG");
    cmd
}
