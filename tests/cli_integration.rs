//! Integration tests that run the CLI binary.

use std::io::Write;
use std::process::{Output, Stdio};

const SAMPLE: &str = r#"{
  "ok": true,
  "kind": "debate",
  "judgeAnalysis": {
    "overallScore": 87,
    "rfd": "**Verbal RFD:** I vote aff on the economy.\n\nWritten RFD and speech-by-speech flow analysis:\nAff Constructive:\nTwo contentions & a <framework>.\n\nNeg Rebuttal:\nTurns were dropped.",
    "flowNotes": [{"speech": "AC", "time": "0:00", "notes": "Econ + jobs"}]
  },
  "deliveryMetrics": {"overallScore": 78}
}"#;

fn bin(tmp: &tempfile::TempDir) -> std::process::Command {
    // CARGO_BIN_EXE_<name> uses the binary target name; hyphens require concat! for env!()
    let bin = env!(concat!("CARGO_BIN_EXE_rfd", "-", "render"));
    let mut cmd = std::process::Command::new(bin);
    // Run from the temp dir so dotenv() won't load .env from the project root
    cmd.current_dir(tmp.path())
        .env("RFD_RENDER_RESULTS_FILE", tmp.path().join("last_result.json"))
        .env_remove("RFD_RENDER_WRAP_WIDTH")
        .env_remove("RUST_LOG");
    cmd
}

fn write_payload(tmp: &tempfile::TempDir, name: &str, content: &str) -> String {
    let path = tmp.path().join(name);
    std::fs::write(&path, content).expect("write payload");
    path.display().to_string()
}

fn run_with_stdin(mut cmd: std::process::Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary not found - run cargo build first");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn cli_help_succeeds_and_outputs_usage() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin(&tmp)
        .arg("--help")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("render"), "expected usage text in output");
}

#[test]
fn cli_version_succeeds() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin(&tmp).arg("--version").output().expect("run");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("rfd-render"));
}

#[test]
fn render_html_from_file() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let input = write_payload(&tmp, "result.json", SAMPLE);
    let output = bin(&tmp).args(["render", &input]).output().expect("run");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let html = stdout(&output);
    assert!(html.contains("<p>I vote aff on the economy.</p>"));
    assert!(html.contains("<h3>Aff Constructive</h3>"));
    assert!(html.contains("<p>Two contentions &amp; a &lt;framework&gt;.</p>"));
    assert!(html.contains("<h3>Neg Rebuttal</h3>\n<p>Turns were dropped.</p>"));
    assert!(html.contains("<h3>AC (0:00)</h3>"));
    assert!(!html.contains("<framework>"));
}

#[test]
fn render_single_section_from_stdin() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let mut cmd = bin(&tmp);
    cmd.args(["render", "-", "--section", "verbal"]);
    let output = run_with_stdin(cmd, SAMPLE);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim_end(), "<p>I vote aff on the economy.</p>");
}

#[test]
fn render_json_report() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let input = write_payload(&tmp, "result.json", SAMPLE);
    let output = bin(&tmp)
        .args(["render", &input, "--format", "json"])
        .output()
        .expect("run");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json output");
    assert_eq!(value["scores"]["argument"], 87);
    assert_eq!(value["scores"]["delivery"], 78);
    assert_eq!(value["sections"]["verbal"], "I vote aff on the economy.");
    assert_eq!(value["verbalHtml"], "<p>I vote aff on the economy.</p>");
}

#[test]
fn render_without_feedback_exits_with_code_2() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let input = write_payload(&tmp, "empty.json", r#"{"ok": true, "files": []}"#);
    let output = bin(&tmp).args(["render", &input]).output().expect("run");

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("No formatted feedback found"));
}

#[test]
fn render_failed_analysis_reports_error() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let input = write_payload(
        &tmp,
        "failed.json",
        r#"{"ok": false, "kind": "debate", "error": "Missing: aai_key, or_key"}"#,
    );
    let output = bin(&tmp).args(["render", &input]).output().expect("run");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Missing: aai_key, or_key"));
}

#[test]
fn render_invalid_json_fails() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let input = write_payload(&tmp, "bad.json", "{ not json");
    let output = bin(&tmp).args(["render", &input]).output().expect("run");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid JSON payload"));
}

#[test]
fn store_then_render_default() {
    let tmp = tempfile::TempDir::new().expect("temp dir");

    let none = bin(&tmp).output().expect("run");
    assert!(!none.status.success());
    assert!(stderr(&none).contains("No stored result"));

    let input = write_payload(&tmp, "result.json", SAMPLE);
    let stored = bin(&tmp).args(["store", &input]).output().expect("run");
    assert!(stored.status.success(), "stderr: {}", stderr(&stored));
    assert!(tmp.path().join("last_result.json").exists());

    let rendered = bin(&tmp).output().expect("run");
    assert!(rendered.status.success(), "stderr: {}", stderr(&rendered));
    assert!(stdout(&rendered).contains("<h3>Aff Constructive</h3>"));

    let cleared = bin(&tmp).arg("clear").output().expect("run");
    assert!(cleared.status.success());
    assert!(!tmp.path().join("last_result.json").exists());
}

#[test]
fn sections_prints_json() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let input = write_payload(
        &tmp,
        "rfd.json",
        r#"{"rfd": "Some summary text. Written RFD: Aff Constructive: detail."}"#,
    );
    let output = bin(&tmp).args(["sections", &input]).output().expect("run");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json output");
    assert_eq!(value["verbal"], "Some summary text.");
    assert_eq!(value["written"], "Aff Constructive: detail.");
}

#[test]
fn text_format_wraps() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let input = write_payload(&tmp, "result.json", SAMPLE);
    let output = bin(&tmp)
        .args(["render", &input, "-f", "text", "-s", "written"])
        .env("RFD_RENDER_WRAP_WIDTH", "20")
        .output()
        .expect("run");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("AFF CONSTRUCTIVE\n"));
    assert!(text.lines().all(|l| l.chars().count() <= 20));
}

#[test]
fn invalid_wrap_width_is_reported() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let input = write_payload(&tmp, "result.json", SAMPLE);
    let output = bin(&tmp)
        .args(["render", &input])
        .env("RFD_RENDER_WRAP_WIDTH", "3")
        .output()
        .expect("run");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("RFD_RENDER_WRAP_WIDTH"));
}

#[test]
fn workdir_loads_text_feedback() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let out = tmp.path().join("run").join("out");
    std::fs::create_dir_all(&out).expect("out dir");
    std::fs::write(
        out.join("judging_feedback.txt"),
        "Verbal RFD: Neg.\nWritten RFD:\nNeg Summary:\nWeighing.",
    )
    .expect("write feedback");

    let run_dir = tmp.path().join("run").display().to_string();
    let output = bin(&tmp).args(["workdir", &run_dir]).output().expect("run");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json output");
    assert!(
        value["judgeAnalysis"]["rfd"]
            .as_str()
            .is_some_and(|s| s.contains("Neg Summary"))
    );

    let stored = bin(&tmp)
        .args(["workdir", &run_dir, "--store"])
        .output()
        .expect("run");
    assert!(stored.status.success(), "stderr: {}", stderr(&stored));

    let rendered = bin(&tmp).args(["render", "-s", "written"]).output().expect("run");
    assert!(rendered.status.success(), "stderr: {}", stderr(&rendered));
    assert_eq!(
        stdout(&rendered).trim_end(),
        "<h3>Neg Summary</h3>\n<p>Weighing.</p>"
    );
}

#[test]
fn workdir_without_feedback_fails() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let run_dir = tmp.path().display().to_string();
    let output = bin(&tmp).args(["workdir", &run_dir]).output().expect("run");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("No judge feedback found"));
}

#[test]
fn completions_bash() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin(&tmp).args(["completions", "bash"]).output().expect("run");
    assert!(output.status.success());
    assert!(stdout(&output).contains("rfd-render"));
}
