use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::PathBuf;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join("material_2.0.fx")
}

#[test]
fn render_file_via_cli() {
    let mut cmd = cargo_bin_cmd!("fxmat");
    cmd.arg(sample_path());

    let output_pred = predicate::str::contains("#define ALBEDO_MAP_FILE \"albedo.png\"")
        .and(predicate::str::contains("const float smoothness = 0.5;"))
        .and(predicate::str::contains("#define NORMAL_MAP_TYPE 0\n"))
        .and(predicate::str::contains("    // unknown syntax is passed through"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn render_stdin_via_cli() {
    let mut cmd = cargo_bin_cmd!("fxmat");
    cmd.arg("--trailing-newline")
        .write_stdin("#define HEX 0xff\r\n// keep  \r\n");

    cmd.assert()
        .success()
        .stdout(predicate::eq("#define HEX 255\n// keep  \n"));
}

#[test]
fn crlf_output_via_cli() {
    let mut cmd = cargo_bin_cmd!("fxmat");
    cmd.arg("--crlf").write_stdin("a\nb\n");

    cmd.assert().success().stdout(predicate::eq("a\r\nb"));
}

#[test]
fn json_output_via_cli() {
    let mut cmd = cargo_bin_cmd!("fxmat");
    cmd.arg("--format").arg("json").write_stdin("const float2 c = 0.5;");

    cmd.assert().success().stdout(predicate::eq(
        "[{\"line\":0,\"kind\":\"float\",\"name\":\"c\",\"type\":\"float2\",\"values\":[0.5,0.5]}]\n",
    ));
}

#[test]
fn explain_via_cli() {
    let mut cmd = cargo_bin_cmd!("fxmat");
    cmd.arg("--explain")
        .write_stdin("// ok\n#define X 1 2\nconst float y = 1e;");

    let notes = predicate::str::contains("NOTE AT LINE 2:")
        .and(predicate::str::contains("            ^"))
        .and(predicate::str::contains("kept verbatim: unexpected text after statement"))
        .and(predicate::str::contains("NOTE AT LINE 3:"))
        .and(predicate::str::contains("expected a float literal"))
        .and(predicate::str::contains("LINE 1").not());

    cmd.assert().success().stderr(notes);
}

#[test]
fn missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("fxmat");
    cmd.arg(dir.path().join("nope.fx"));

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read").and(predicate::str::contains("nope.fx")));
}

#[test]
fn rejects_unknown_format() {
    let mut cmd = cargo_bin_cmd!("fxmat");
    cmd.arg("--format").arg("yaml").write_stdin("");

    cmd.assert().failure();
}
