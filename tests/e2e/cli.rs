//! E2E tests for argument handling and configuration

use std::fs;

use super::helpers::*;

#[test]
fn test_missing_arguments_exit_one() {
    let output = amalgamate(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage"));
}

#[test]
fn test_missing_output_argument_exit_one() {
    let temp = header_tree(&[("a.h", "int a;\n")]);
    let input = temp.path().join("include");

    let output = amalgamate(&[input.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_exits_zero() {
    let output = amalgamate(&["--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("--include"));
}

#[test]
fn test_missing_input_directory() {
    let temp = tempfile::TempDir::new().unwrap();
    let input = temp.path().join("absent");
    let out = temp.path().join("all.h");

    let output = amalgamate(&[input.to_str().unwrap(), out.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Input directory not found"));
    assert!(!out.exists());
}

#[test]
fn test_config_file_with_cli_override() {
    let temp = header_tree(&[
        ("src/a.hpp", "int a;\n"),
        ("src/b.h", "int b;\n"),
        ("other/c.h", "int c;\n"),
    ]);
    let config = temp.path().join("amalgamate.toml");
    fs::write(
        &config,
        "[collect]\npattern = \"*.hpp\"\ncore_dirs = [\"src\"]\n",
    )
    .unwrap();

    let output = amalgamate_tree(
        &temp,
        &["--config", config.to_str().unwrap(), "--quiet"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(merged(&temp), "int a;\n");

    let output = amalgamate_tree(
        &temp,
        &[
            "--config",
            config.to_str().unwrap(),
            "--pattern",
            "*.h",
            "--core-dir",
            "other",
            "--quiet",
        ],
    );
    assert!(output.status.success());
    assert_eq!(merged(&temp), "int c;\n");
}

#[test]
fn test_backslash_include_resolves() {
    let temp = header_tree(&[
        ("crow/common.h", "int common;\n"),
        ("crow/app.h", "#include \"crow\\common.h\"\nint app;\n"),
    ]);

    let output = amalgamate_tree(&temp, &["--strict", "--quiet"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(merged(&temp), "int common;\n\nint app;\n");
}
