use std::process::{Command, Output};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use love_match::matching::GENERIC_FAILURE;
use serde_json::{json, Value};

#[derive(Clone)]
struct ScoringStub {
    base: String,
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl ScoringStub {
    fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().expect("capture mutex poisoned").clone()
    }
}

async fn config_document(State(stub): State<ScoringStub>) -> Json<Value> {
    Json(json!({ "API_BASE_URL": format!("{}/api", stub.base) }))
}

async fn name_match(State(stub): State<ScoringStub>, Json(body): Json<Value>) -> Json<Value> {
    stub.bodies
        .lock()
        .expect("capture mutex poisoned")
        .push(body.clone());
    Json(json!({
        "name1": body["name1"],
        "name2": body["name2"],
        "compatibility_percent": 0,
    }))
}

async fn rashi_match(
    State(stub): State<ScoringStub>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    stub.bodies.lock().expect("capture mutex poisoned").push(body);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": "ephemeris offline" })),
    )
}

async fn spawn_stub() -> ScoringStub {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local address");
    let stub = ScoringStub {
        base: format!("http://{addr}"),
        bodies: Arc::default(),
    };

    let app = Router::new()
        .route("/config.json", get(config_document))
        .route("/api/name-match", post(name_match))
        .route("/api/rashi-match", post(rashi_match))
        .with_state(stub.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub service runs");
    });

    stub
}

/// Runs the binary off the runtime thread so the stub keeps serving.
async fn love_match(config_source: String, args: &[&str]) -> Output {
    let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
    tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_love-match"))
            .args(&args)
            .env("APP_CONFIG_SOURCE", config_source)
            .env("APP_ENV", "test")
            .env("APP_LOG_LEVEL", "warn")
            .env("NO_PROXY", "127.0.0.1,localhost")
            .env_remove("RUST_LOG")
            .env_remove("HTTP_PROXY")
            .env_remove("http_proxy")
            .env_remove("HTTPS_PROXY")
            .env_remove("https_proxy")
            .env_remove("ALL_PROXY")
            .env_remove("all_proxy")
            .output()
            .expect("binary runs")
    })
    .await
    .expect("blocking task joins")
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[tokio::test]
async fn rejected_submission_exits_with_failure() {
    let stub = spawn_stub().await;
    let output = love_match(
        format!("{}/missing.json", stub.base),
        &["--json", "name", "--name1", "Arjun", "--name2", "Meera"],
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "stdout: {}", text(&output.stdout));
    let stderr = text(&output.stderr);
    assert!(stderr.contains("Config not loaded yet!"), "stderr: {stderr}");
    assert!(stderr.contains("submission rejected"), "stderr: {stderr}");
    assert!(stub.bodies().is_empty());
}

#[tokio::test]
async fn server_failure_prints_json_and_exits_cleanly() {
    let stub = spawn_stub().await;
    let output = love_match(
        format!("{}/config.json", stub.base),
        &[
            "--json",
            "rashi",
            "--name1",
            "Arjun",
            "--dob1",
            "1994-03-12",
            "--time1",
            "06:45",
            "--name2",
            "Meera",
        ],
    )
    .await;

    assert!(output.status.success(), "stderr: {}", text(&output.stderr));
    let printed: Value = serde_json::from_slice(&output.stdout).expect("stdout is only JSON");
    assert_eq!(printed, json!({ "error": GENERIC_FAILURE }));

    let bodies = stub.bodies();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["dob1"], json!("1994-03-12 06:45"));
    assert_eq!(bodies[0]["dob2"], json!(""));
}

#[tokio::test]
async fn config_flag_overrides_environment_and_renders_text() {
    let stub = spawn_stub().await;
    let config_url = format!("{}/config.json", stub.base);
    let output = love_match(
        format!("{}/missing.json", stub.base),
        &[
            "--config",
            config_url.as_str(),
            "--lat",
            "19.07",
            "--lon",
            "72.88",
            "name",
            "--name1",
            "Arjun",
            "--name2",
            "Meera",
        ],
    )
    .await;

    assert!(output.status.success(), "stderr: {}", text(&output.stderr));
    assert_eq!(text(&output.stdout), "❤️ Arjun & Meera\nScore: 0%\n");
    assert!(!text(&output.stderr).contains("Score"));
    assert_eq!(
        stub.bodies(),
        vec![json!({ "name1": "Arjun", "name2": "Meera" })]
    );
}
