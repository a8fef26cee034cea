#![allow(clippy::unwrap_used, clippy::expect_used)] // Integration tests use unwrap for brevity

//! Tests for the CLI subcommands, driven through the library entry points
//! with an in-memory writer.

use serde_json::Value;

use gamebridge_cli::{channels_cmd, check_cmd, replay_cmd, resolve_profile};
use gamebridge_core::Direction;

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

#[test]
fn unknown_bridge_lists_known_names() {
    let err = resolve_profile("settings").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unknown bridge 'settings'. Known bridges: messagebox, login"
    );
}

#[test]
fn channels_text_lists_every_bridge() {
    let mut out = Vec::new();
    channels_cmd::run(None, false, &mut out).unwrap();
    let text = output(out);

    assert!(text.contains("messagebox (messagebox-preload)"));
    assert!(text.contains("login (login-preload)"));
    assert!(text.contains("receive:     window-arguments"));
    assert!(text.contains("receive:     (none)"));
}

#[test]
fn channels_json_for_single_bridge() {
    let mut out = Vec::new();
    channels_cmd::run(Some(resolve_profile("login").unwrap()), true, &mut out).unwrap();
    let views: Value = serde_json::from_str(&output(out)).unwrap();

    let views = views.as_array().unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0]["identity"], "login-preload");
    assert_eq!(
        views[0]["outbound"],
        serde_json::json!(["credentials-path", "translate", "window-close"])
    );
    assert_eq!(views[0]["inbound"], serde_json::json!([]));
}

#[test]
fn check_reports_decision() {
    let profile = resolve_profile("messagebox").unwrap();

    let mut out = Vec::new();
    assert!(check_cmd::run(profile, Direction::Send, "window-resize", &mut out).unwrap());
    assert_eq!(output(out), "allowed\n");

    let mut out = Vec::new();
    assert!(!check_cmd::run(profile, Direction::Receive, "window-close", &mut out).unwrap());
    assert_eq!(output(out), "denied\n");

    let mut out = Vec::new();
    assert!(!check_cmd::run(profile, Direction::Invoke, "Window-Close", &mut out).unwrap());
}

#[tokio::test]
async fn replay_reports_one_line_per_request() {
    let input = concat!(
        r#"{"op":"send","channel":"window-close"}"#,
        "\n",
        r#"{"op":"invoke","channel":"translate","payload":["menu.close"]}"#,
        "\n\n",
        r#"{"op":"send","channel":"credentials-path"}"#,
        "\n",
        r#"{"op":"once","channel":"window-arguments"}"#,
        "\n",
        r#"{"op":"send","channel":7}"#,
        "\n",
        "not json\n",
    );

    let mut out = Vec::new();
    let summary = replay_cmd::run(resolve_profile("messagebox").unwrap(), input, 8, &mut out)
        .await
        .unwrap();
    let text = output(out);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "1: send window-close -> forwarded");
    assert_eq!(
        lines[1],
        r#"2: invoke translate -> {"channel":"translate","payload":["menu.close"]}"#
    );
    assert_eq!(lines[2], "4: send credentials-path -> denied");
    assert_eq!(lines[3], "5: once window-arguments -> armed");
    assert_eq!(lines[4], "6: send <missing> -> denied");
    assert!(lines[5].starts_with("7: malformed -> "));

    assert_eq!(summary.forwarded, 3);
    assert_eq!(summary.denied, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.malformed, 1);
}

#[tokio::test]
async fn replay_login_denies_every_once() {
    let input = r#"{"op":"once","channel":"window-arguments"}"#;
    let mut out = Vec::new();
    let summary = replay_cmd::run(resolve_profile("login").unwrap(), input, 4, &mut out)
        .await
        .unwrap();

    assert_eq!(output(out), "1: once window-arguments -> denied\n");
    assert_eq!(summary.denied, 1);
}

#[tokio::test]
async fn replay_reads_request_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("requests.ndjson");
    std::fs::write(&path, r#"{"op":"invoke","channel":"cwd"}"#).unwrap();

    let mut out = Vec::new();
    let summary = replay_cmd::run_path(resolve_profile("messagebox").unwrap(), &path, 4, &mut out)
        .await
        .unwrap();

    // `cwd` is reserved for the dedicated capability, not the generic invoke.
    assert_eq!(output(out), "1: invoke cwd -> denied\n");
    assert_eq!(summary.denied, 1);
}

#[tokio::test]
async fn replay_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut out = Vec::new();
    let err = replay_cmd::run_path(
        resolve_profile("messagebox").unwrap(),
        &dir.path().join("absent.ndjson"),
        4,
        &mut out,
    )
    .await
    .unwrap_err();
    assert!(err.to_string().starts_with("Failed to read"));
}
