use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_argdoc")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

// -- doc --

#[test]
fn doc_google_sections() {
    let expected = std::fs::read_to_string(fixture_path("google.expected.txt")).unwrap();

    let assert = cmd()
        .args(["doc", &fixture_path("google.txt")])
        .assert()
        .success();
    assert_eq!(stdout_of(&assert), expected);
}

#[test]
fn doc_lists_keep_their_layout() {
    let expected = std::fs::read_to_string(fixture_path("lists.expected.txt")).unwrap();

    let assert = cmd()
        .args(["doc", "--plain", &fixture_path("lists.txt")])
        .assert()
        .success();
    assert_eq!(stdout_of(&assert), expected);
}

#[test]
fn doc_numpy_sections_as_json() {
    let assert = cmd()
        .args(["doc", "-f", "json", &fixture_path("numpy.txt")])
        .assert()
        .success();
    let value: serde_json::Value = serde_json::from_str(&stdout_of(&assert)).unwrap();
    assert_eq!(value["summary"], "Scale values.");
    assert_eq!(value["description"], "Scale values.");
    assert_eq!(value["params"]["values"]["type_token"], "list[float]");
    assert_eq!(value["params"]["values"]["text"], "Numbers to scale.");
    assert_eq!(value["params"]["factor"]["type_token"], "float");
    assert_eq!(value["raises"], serde_json::json!([]));
}

#[test]
fn doc_reads_stdin() {
    let assert = cmd()
        .args(["doc", "-f", "json"])
        .write_stdin(":param int foo: bar\n:raises ValueError:\n")
        .assert()
        .success();
    let value: serde_json::Value = serde_json::from_str(&stdout_of(&assert)).unwrap();
    assert_eq!(value["source"], "-");
    assert_eq!(value["params"]["foo"]["text"], "bar");
    assert_eq!(value["params"]["foo"]["type_token"], "int");
    assert_eq!(value["raises"], serde_json::json!(["ValueError"]));
}

#[test]
fn doc_leading_google_section() {
    let assert = cmd()
        .args(["doc", "-f", "json"])
        .write_stdin("Args:\n  foo (int): bar\n")
        .assert()
        .success();
    let value: serde_json::Value = serde_json::from_str(&stdout_of(&assert)).unwrap();
    assert_eq!(value["params"]["foo"]["text"], "bar");
    assert_eq!(value["params"]["foo"]["type_token"], "int");
}

#[test]
fn doc_raw_mode_keeps_sections_as_prose() {
    cmd()
        .args(["doc", "--raw", "-f", "json"])
        .write_stdin("Args:\n  foo (int): bar\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""params":{}"#));
}

#[test]
fn doc_directory_scans_docstring_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.txt"), "First.").unwrap();
    std::fs::write(dir.path().join("b.rst"), "Second.").unwrap();
    std::fs::write(dir.path().join("c.py"), "def f(): pass").unwrap();

    let assert = cmd()
        .args(["doc", dir.path().to_str().unwrap()])
        .assert()
        .success();
    let output = stdout_of(&assert);
    assert!(output.contains("a.txt <==\nFirst.\n"));
    assert!(output.contains("b.rst <==\nSecond.\n"));
    assert!(!output.contains("c.py"));
}

#[test]
fn doc_glob_patterns() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("x.txt"), "Ex.").unwrap();
    std::fs::write(dir.path().join("y.txt"), "Why.").unwrap();
    std::fs::write(dir.path().join("z.md"), "Zed.").unwrap();

    let pattern = format!("{}/*.txt", dir.path().display());
    let assert = cmd()
        .args(["doc", "-f", "json", &pattern])
        .assert()
        .success();
    let output = stdout_of(&assert);
    // One JSON object per input file.
    let summaries: Vec<String> = output
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["summary"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(summaries, vec!["Ex.", "Why."]);
}

#[test]
fn doc_duplicate_field_fails() {
    cmd()
        .arg("doc")
        .write_stdin(":param foo: a\n:param foo: b\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("param defined twice for foo"));
}

#[test]
fn doc_unknown_format() {
    cmd()
        .args(["doc", "-f", "xml", &fixture_path("google.txt")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: xml"));
}

// -- normalize --

#[test]
fn normalize_google_to_field_list() {
    cmd()
        .arg("normalize")
        .write_stdin("Args:\n  foo (int): bar\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(":param foo: bar\n:type foo: int\n"));
}

#[test]
fn normalize_numpy_returns() {
    cmd()
        .args(["normalize", &fixture_path("numpy.txt")])
        .assert()
        .success()
        .stdout(predicate::str::contains(":returns: The scaled values.\n:rtype: list[float]"));
}

// -- convert --

#[test]
fn convert_fixed_tuple() {
    cmd()
        .args(["convert", "-t", "Tuple[int,str]", "1", "x"])
        .assert()
        .success()
        .stdout("[1,\"x\"]\n");
}

#[test]
fn convert_tuple_arity_mismatch() {
    cmd()
        .args(["convert", "-t", "Tuple[int,str]", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "error: argument VALUE: tuple[int, str] expects 2 argument(s), got 1",
        ));
}

#[test]
fn convert_union_falls_back() {
    cmd()
        .args(["convert", "-t", "int or float", "2.5"])
        .assert()
        .success()
        .stdout("2.5\n");
    cmd()
        .args(["convert", "-t", "int or float", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "error: argument VALUE: invalid Union[int, float] value: 'x'",
        ));
}

#[test]
fn convert_literal_choice() {
    cmd()
        .args(["convert", "-t", "Literal['a', 'b']", "c"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "invalid choice: 'c' (choose from 'a', 'b')",
        ));
}

#[test]
fn convert_registered_enum() {
    cmd()
        .args(["convert", "-t", "Color", "--enum", "Color=RED,GREEN", "RED"])
        .assert()
        .success()
        .stdout("{\"type\":\"Color\",\"member\":\"RED\"}\n");
}

#[test]
fn convert_negative_number_and_list() {
    cmd()
        .args(["convert", "-t", "int", "-3"])
        .assert()
        .success()
        .stdout("-3\n");
    cmd()
        .args(["convert", "-t", "list[int]", "1", "2", "3"])
        .assert()
        .success()
        .stdout("[1,2,3]\n");
}

#[test]
fn convert_bare_list_is_rejected() {
    cmd()
        .args(["convert", "-t", "list", "1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unable to parse list (try list[type])"));
}
