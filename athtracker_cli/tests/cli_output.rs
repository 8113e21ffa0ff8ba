use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("CLI crate should be inside workspace")
        .to_path_buf()
}

fn load_fixture(name: &str) -> String {
    let path = workspace_root()
        .join("alphavantage_api/tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read fixture {}: {}", path.display(), e))
}

fn athtracker(args: &[&str], env: &[(&str, &str)]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_athtracker"));
    cmd.args(args)
        .env_remove("ALPHA_VANTAGE_KEY")
        .env_remove("ALPHA_VANTAGE_BASE_URL")
        .env_remove("RUST_LOG");
    for (key, val) in env {
        cmd.env(key, val);
    }
    cmd
}

async fn run(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().expect("binary runs"))
        .await
        .expect("join")
}

async fn mock_ibm() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .and(query_param("symbol", "IBM"))
        .and(query_param("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("daily_ibm.json")))
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn test_text_output_unbounded() {
    let server = mock_ibm().await;
    let uri = server.uri();
    let output = run(athtracker(
        &["IBM"],
        &[("ALPHA_VANTAGE_KEY", "test-key"), ("ALPHA_VANTAGE_BASE_URL", &uri)],
    ))
    .await;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Date: 2024-03-04, All-time high: 193.98\n\
         Date: 2024-03-06, All-time high: 198.13\n\
         Date: 2024-03-07, All-time high: 198.73\n\
         All-time highs for IBM from 2024-03-04 to 2024-03-08\n\
         Total number of all-time highs: 3\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_text_output_bounded() {
    let server = mock_ibm().await;
    let uri = server.uri();
    let output = run(athtracker(
        &["IBM", "--eod", "2024-3-5"],
        &[("ALPHA_VANTAGE_KEY", "test-key"), ("ALPHA_VANTAGE_BASE_URL", &uri)],
    ))
    .await;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Date: 2024-03-04, All-time high: 193.98\n\
         All-time highs for IBM from 2024-03-04 to 2024-03-05\n\
         Total number of all-time highs: 1\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_json_output() {
    let server = mock_ibm().await;
    let uri = server.uri();
    let output = run(athtracker(
        &["IBM", "--output", "json"],
        &[("ALPHA_VANTAGE_KEY", "test-key"), ("ALPHA_VANTAGE_BASE_URL", &uri)],
    ))
    .await;

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["symbol"], "IBM");
    assert_eq!(json["total"], 3);
    assert_eq!(json["range_end"], "2024-03-08");
    assert_eq!(json["events"].as_array().unwrap().len(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upstream_status_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let uri = server.uri();
    let output = run(athtracker(
        &["IBM"],
        &[("ALPHA_VANTAGE_KEY", "test-key"), ("ALPHA_VANTAGE_BASE_URL", &uri)],
    ))
    .await;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("503"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_api_key_fails_before_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let uri = server.uri();
    let output = run(athtracker(&["IBM"], &[("ALPHA_VANTAGE_BASE_URL", &uri)])).await;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("ALPHA_VANTAGE_KEY not found in environment variables"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_eod_exits_with_usage_error() {
    let output = run(athtracker(
        &["IBM", "--eod", "2024-02-30x"],
        &[("ALPHA_VANTAGE_KEY", "test-key")],
    ))
    .await;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("'2024-02-30x' is not a valid date in YYYY-MM-DD format"));
}
