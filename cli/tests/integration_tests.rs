use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const TABLE_YAML: &str = r#"
- doc: "OPTIONS:"
- { short: v, long: verbose, doc: talk more }
- { short: f, long: file, arg_name: <file>, doc: file to open }
- { long: ffff, flags: [alias] }
- { short: F, flags: [alias] }
- { short: k, long: kind, arg_name: <kind>, flags: [arg-optional], doc: specify kind }
- { long: secret, flags: [hidden], doc: never shown }
"#;

fn write_table(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write table");
    path
}

fn argp(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_argp"))
        .args(args)
        .output()
        .expect("failed to run argp")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// top level
// ---------------------------------------------------------------------------

#[test]
fn version_flag_prints_package_version() {
    let output = argp(&["--version"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), format!("argp {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn help_subcommand_is_the_table_renderer() {
    let output = argp(&["help", "--help"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("--table"), "{}", stdout(&output));
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_outcome_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let table = write_table(dir.path(), "table.yaml", TABLE_YAML);

    let output = argp(&[
        "parse",
        "--table",
        table.to_str().unwrap(),
        "--",
        "-v",
        "--ffff",
        "a.txt",
        "input",
        "-Fb.txt",
        "--",
        "-v",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let options = json["options"].as_array().unwrap();
    assert_eq!(options.len(), 3);
    assert_eq!(options[0]["option"]["long"], "verbose");
    assert_eq!(options[1]["option"]["long"], "file");
    assert_eq!(options[1]["input"], "ffff");
    assert_eq!(options[1]["arg"], "a.txt");
    assert_eq!(options[2]["input"], "F");
    assert_eq!(options[2]["arg"], "b.txt");
    assert_eq!(json["args"], serde_json::json!(["input", "-v"]));
}

#[test]
fn parse_reads_json_tables() {
    let dir = tempfile::tempdir().unwrap();
    let table = write_table(
        dir.path(),
        "table.json",
        r#"[{"short": "x", "long": "xxxx", "arg_name": "<arg>"}]"#,
    );

    let output = argp(&["parse", "--table", table.to_str().unwrap(), "--", "--xxxx=1"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["options"][0]["arg"], "1");
}

#[test]
fn parse_failure_exits_with_status_two() {
    let dir = tempfile::tempdir().unwrap();
    let table = write_table(dir.path(), "table.yaml", TABLE_YAML);

    let output = argp(&[
        "parse",
        "--table",
        table.to_str().unwrap(),
        "--",
        "first",
        "--verbose=yes",
    ]);

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("error: option takes no arguments: --verbose (-v)"), "{err}");
    assert!(err.contains("arguments before the error: first"), "{err}");
}

#[test]
fn parse_missing_argument_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let table = write_table(dir.path(), "table.yaml", TABLE_YAML);

    let output = argp(&["parse", "--table", table.to_str().unwrap(), "--", "-f"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("option requires an argument: --file (-f)"));
}

// ---------------------------------------------------------------------------
// help / check
// ---------------------------------------------------------------------------

#[test]
fn help_renders_usage_and_aliases() {
    let dir = tempfile::tempdir().unwrap();
    let table = write_table(dir.path(), "table.yaml", TABLE_YAML);

    let output = argp(&[
        "help",
        "--table",
        table.to_str().unwrap(),
        "--program",
        "tool",
        "--usage",
        "FILE...",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Usage: tool [options...] FILE...");
    assert_eq!(lines[1], "OPTIONS:");
    assert_eq!(lines[2], " -v, --verbose             talk more");
    assert_eq!(lines[3], " -f, -F, --file <file>, --ffff <file>  file to open");
    assert_eq!(lines[4], " -k, --kind[=<kind>]       specify kind");
    assert_eq!(lines.len(), 5);
}

#[test]
fn help_without_program_prints_only_the_list() {
    let dir = tempfile::tempdir().unwrap();
    let table = write_table(dir.path(), "table.yaml", TABLE_YAML);

    let output = argp(&["help", "--table", table.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("OPTIONS:\n"));
}

#[test]
fn check_summarizes_valid_table() {
    let dir = tempfile::tempdir().unwrap();
    let table = write_table(dir.path(), "table.yaml", TABLE_YAML);

    let output = argp(&["check", "--table", table.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("4 option(s), 2 alias(es), 1 doc line(s)"));
}

#[test]
fn check_rejects_orphan_alias() {
    let dir = tempfile::tempdir().unwrap();
    let table = write_table(
        dir.path(),
        "bad.yaml",
        "- doc: \"OPTIONS:\"\n- { short: q, flags: [alias] }\n",
    );

    let output = argp(&["check", "--table", table.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("has no preceding option"));
}

#[test]
fn check_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.yaml");

    let output = argp(&["check", "--table", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to read option table"));
}

// ---------------------------------------------------------------------------
// demo
// ---------------------------------------------------------------------------

#[test]
fn demo_prints_inputs_and_args() {
    let output = argp(&["demo", "--", "-q", "-kfast", "--output", "out.txt", "rest"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["q: ", "k: fast", "output: out.txt", "args: [\"rest\"]"]);
}

#[test]
fn demo_help_prints_usage() {
    let output = argp(&["demo", "--", "--help"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.starts_with("Usage: argp demo [options...] ARG1 ARG2...\nOPTIONS:\n"));
    assert!(text.contains(" -s, -q, --silent          run in silent mode\n"));
    assert!(text.contains("(attached only: -kKIND or --kind=KIND)\n"));
}

#[test]
fn demo_version_and_unknown_option() {
    let output = argp(&["demo", "--", "-V"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), env!("CARGO_PKG_VERSION"));

    let output = argp(&["demo", "--", "-z"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalid option: -z"));
}
