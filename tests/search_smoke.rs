// End-to-end runs of `sgr search` against the fixture sources.
use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;

mod util;
use util::{make_fixture, sgr};

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).expect("utf8")
}

#[test]
fn test_match_is_shown_inside_its_function() {
    let tmp = make_fixture();

    let assert = sgr(&tmp)
        .args(["--no-color", "search", "println", "app.rs"])
        .assert()
        .success();
    let out = stdout_of(&assert);

    assert_eq!(out.matches('█').count(), 1, "one highlighted line:\n{out}");
    assert!(out.contains("█         println!(\"big\");\n"));
    assert!(out.contains("│ fn main() {\n"));
    assert!(out.contains("│     if x > 10 {\n"));
    // no header for a single file
    assert!(!out.contains("==>"));
}

#[test]
fn test_deep_match_keeps_every_enclosing_opener() {
    let tmp = make_fixture();

    let assert = sgr(&tmp)
        .args(["--no-color", "search", "-s", "0", "--gap", "0", "\"two\"", "server.go"])
        .assert()
        .success();
    let out = stdout_of(&assert);

    assert!(out.contains("█ \t\t\tfmt.Println(\"two\")\n"), "{out}");
    assert!(out.contains("│ \t\tif i == 2 {\n"));
    assert!(out.contains("│ \tfor i := 0; i < 3; i++ {\n"));
    assert!(out.contains("│ func main() {\n"));
    assert!(out.contains("│ package main\n"));
    // the unrelated function stays hidden
    assert!(!out.contains("first"));
}

#[test]
fn test_line_numbers_and_symbols() {
    let tmp = make_fixture();

    sgr(&tmp)
        .args([
            "--no-color",
            "search",
            "-n",
            "--highlight-symbol",
            ">>",
            "--context-symbol",
            "|",
            "println",
            "app.rs",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("10 >>         println!(\"big\");\n"))
        .stdout(predicate::str::contains("07 | fn main() {\n"))
        .stdout(predicate::str::contains("█").not());
}

#[test]
fn test_highlight_is_colored_unless_disabled() {
    let tmp = make_fixture();

    sgr(&tmp)
        .args(["search", "println", "app.rs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[31m"));

    sgr(&tmp)
        .args(["--no-color", "search", "println", "app.rs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn test_multiple_files_get_headers_in_argument_order() {
    let tmp = make_fixture();

    let assert = sgr(&tmp)
        .args(["--no-color", "search", "fn main|def describe", "shapes.py", "app.rs"])
        .assert()
        .success();
    let out = stdout_of(&assert);

    let py = out.find("==> shapes.py <==").expect("python header");
    let rs = out.find("==> app.rs <==").expect("rust header");
    assert!(py < rs, "headers out of order:\n{out}");
    assert_eq!(out.matches('█').count(), 2);
}

#[test]
fn test_files_without_matches_are_skipped() {
    let tmp = make_fixture();

    sgr(&tmp)
        .args(["--no-color", "search", "radius", "app.rs", "shapes.py"])
        .assert()
        .success()
        .stdout(predicate::str::contains("==> shapes.py <=="))
        .stdout(predicate::str::contains("==> app.rs <==").not());
}

#[test]
fn test_no_matches_fails() {
    let tmp = make_fixture();

    sgr(&tmp)
        .args(["search", "no_such_identifier", "app.rs", "server.go"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No matches found"));
}

#[test]
fn test_invalid_pattern_fails() {
    let tmp = make_fixture();

    sgr(&tmp)
        .args(["search", "[", "app.rs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid pattern"));
}

#[test]
fn test_unsupported_and_missing_files_fail() {
    let tmp = make_fixture();

    sgr(&tmp)
        .args(["search", "notes", "notes.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file type not recognized"));

    sgr(&tmp)
        .args(["search", "x", "missing.rs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_summary_goes_to_stderr_unless_quiet() {
    let tmp = make_fixture();

    sgr(&tmp)
        .args(["--no-color", "search", "println", "app.rs"])
        .assert()
        .success()
        .stderr(predicate::str::contains("✓ 1 highlighted line(s) in 1 of 1 file(s)"));

    sgr(&tmp)
        .args(["--quiet", "search", "println", "app.rs"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_config_file_and_env_layers() {
    let tmp = make_fixture();
    tmp.child("scopegrep.toml")
        .write_str("[render]\nhighlight_symbol = \"*\"\ngap_symbol = \"~~\"\n")
        .expect("write config");

    // file value, with a flag overriding another file value
    sgr(&tmp)
        .args(["--no-color", "search", "--gap-symbol", "::", "println", "app.rs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("*         println!"))
        .stdout(predicate::str::contains("::\n"))
        .stdout(predicate::str::contains("~~").not());

    // environment beats the file
    sgr(&tmp)
        .env("SCOPEGREP_RENDER__HIGHLIGHT_SYMBOL", "@")
        .args(["--no-color", "search", "println", "app.rs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@         println!"));
}
