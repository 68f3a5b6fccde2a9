//! Test helper functions for E2E tests

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Write `content` to `root/rel`, creating parent directories
pub fn write_header(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("header path has a parent"))
        .expect("Failed to create header directory");
    fs::write(&path, content).expect("Failed to write header");
}

/// Create a temp dir with an `include/` tree built from (path, content) pairs
pub fn header_tree(headers: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    fs::create_dir_all(temp.path().join("include")).expect("Failed to create include dir");
    for (rel, content) in headers {
        write_header(&temp.path().join("include"), rel, content);
    }
    temp
}

/// Run the amalgamate binary with the given arguments
pub fn amalgamate(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_amalgamate"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run amalgamate")
}

/// Run against `temp/include`, writing `temp/all.h`
pub fn amalgamate_tree(temp: &TempDir, extra: &[&str]) -> Output {
    let input = temp.path().join("include");
    let output = temp.path().join("all.h");
    let mut args = vec![
        input.to_str().expect("utf-8 temp path"),
        output.to_str().expect("utf-8 temp path"),
    ];
    args.extend_from_slice(extra);
    amalgamate(&args)
}

/// Read the merged header produced by [`amalgamate_tree`]
pub fn merged(temp: &TempDir) -> String {
    fs::read_to_string(temp.path().join("all.h")).expect("Failed to read merged header")
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
