//! E2E tests for merge order and directive stripping

use super::helpers::*;

#[test]
fn test_linear_chain_merged_in_order() {
    let temp = header_tree(&[
        ("a.h", "int a;\n"),
        ("b.h", "#include \"a.h\"\nint b;\n"),
        ("c.h", "#include \"b.h\"\nint c;\n"),
    ]);

    let output = amalgamate_tree(&temp, &["--quiet"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(merged(&temp), "int a;\n\nint b;\n\nint c;\n");
}

#[test]
fn test_no_local_directives_remain() {
    let temp = header_tree(&[
        ("common.h", "#pragma once\n#include <string>\nstruct Common {};\n"),
        ("crow/app.h", "#include \"common.h\"\n#include \"crow/routing.h\"\nstruct App {};\n"),
        ("crow/routing.h", "#include \"common.h\"\nstruct Routing {};\n"),
        ("crow.h", "#include \"crow/app.h\"\n"),
    ]);

    let output = amalgamate_tree(&temp, &["--quiet"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let content = merged(&temp);
    assert!(!content.lines().any(|l| l.starts_with("#include \"")));
    assert!(content.contains("#include <string>"));

    let common = content.find("struct Common").unwrap();
    let routing = content.find("struct Routing").unwrap();
    let app = content.find("struct App").unwrap();
    assert!(common < routing);
    assert!(routing < app);
}

#[test]
fn test_every_line_preserved_once() {
    let headers = [
        ("a.h", "// a line 1\nint a;\n"),
        ("b.h", "#include \"a.h\"\n// b line 1\nint b;\n"),
        ("z.h", "// z only\n"),
    ];
    let temp = header_tree(&headers);

    let output = amalgamate_tree(&temp, &["--quiet"]);
    assert!(output.status.success());

    let content = merged(&temp);
    for (_, text) in headers {
        for line in text.lines().filter(|l| !l.starts_with("#include \"")) {
            assert_eq!(
                content.lines().filter(|l| *l == line).count(),
                1,
                "line {line:?} should appear exactly once"
            );
        }
    }
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let temp = header_tree(&[
        ("x.h", "int x;\n"),
        ("y.h", "int y;\n"),
        ("crow/z.h", "#include \"x.h\"\nint z;\n"),
        ("crow/middlewares/m.h", "#include \"crow/z.h\"\nint m;\n"),
    ]);

    assert!(amalgamate_tree(&temp, &["--quiet"]).status.success());
    let first = merged(&temp);
    assert!(amalgamate_tree(&temp, &["--quiet"]).status.success());
    let second = merged(&temp);

    assert_eq!(first, second);
}

#[test]
fn test_missing_include_dropped_by_default() {
    let temp = header_tree(&[("a.h", "#include \"nowhere.h\"\nint a;\n")]);

    let output = amalgamate_tree(&temp, &[]);
    assert!(output.status.success());
    assert_eq!(merged(&temp), "int a;\n");
    assert!(stdout(&output).contains("nowhere.h (from a.h)"));
}

#[test]
fn test_missing_include_fails_when_strict() {
    let temp = header_tree(&[("a.h", "#include \"nowhere.h\"\nint a;\n")]);

    let output = amalgamate_tree(&temp, &["--strict"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("nowhere.h"));
    assert!(!temp.path().join("all.h").exists());
}

#[test]
fn test_json_summary() {
    let temp = header_tree(&[("a.h", "int a;\n"), ("b.h", "#include \"a.h\"\n")]);

    let output = amalgamate_tree(&temp, &["--format", "json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["order"], serde_json::json!(["a.h", "b.h"]));
    assert_eq!(report["sha256"].as_str().unwrap().len(), 64);
}

#[test]
fn test_output_inside_input_dir_is_not_merged_back() {
    let temp = header_tree(&[("a.h", "int a;\n"), ("b.h", "#include \"a.h\"\nint b;\n")]);
    let input = temp.path().join("include");
    let out = input.join("all.h");
    let args = [input.to_str().unwrap(), out.to_str().unwrap(), "--quiet"];

    assert!(amalgamate(&args).status.success());
    let first = std::fs::read_to_string(&out).unwrap();
    assert!(amalgamate(&args).status.success());
    let second = std::fs::read_to_string(&out).unwrap();

    assert_eq!(first, "int a;\n\nint b;\n");
    assert_eq!(first, second);
}

#[test]
fn test_directive_only_header_leaves_single_blank_line() {
    let temp = header_tree(&[
        ("a.h", "int a;\n"),
        ("b.h", "#include \"a.h\"\n"),
        ("c.h", "#include \"b.h\"\nint c;\n"),
    ]);

    assert!(amalgamate_tree(&temp, &["--quiet"]).status.success());
    assert_eq!(merged(&temp), "int a;\n\nint c;\n");
}
