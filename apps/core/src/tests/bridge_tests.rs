//! Bridge Route Tests
//!
//! Drives the router with `tower::ServiceExt::oneshot`; external programs are
//! replaced by a recording runner.

use crate::actors::speech::HttpSpeech;
use crate::actors::{AssistantHandle, AssistantOptions, ConfirmationHandle};
use crate::bridge::{router, AppState, CommandOutput, CommandRunner, Scripts};
use crate::codegen::TemplateCodeGenerator;
use crate::error::AppError;
use crate::tests::actor_tests::{slow_confirmations, MockCodeGenerator, RecordingSpeech};
use crate::utilities::NoteBook;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Mock Runner
// ============================================================================

/// Records every invocation and answers from a per-program table.
#[derive(Default)]
pub struct MockRunner {
    pub calls: Mutex<Vec<(String, Vec<String>)>>,
    pub outputs: HashMap<String, Result<String, String>>,
}

impl MockRunner {
    pub fn answering(program: &str, stdout: &str) -> Self {
        let mut runner = Self::default();
        runner.outputs.insert(program.to_string(), Ok(stdout.to_string()));
        runner
    }

    pub fn with(mut self, program: &str, result: Result<&str, &str>) -> Self {
        self.outputs.insert(
            program.to_string(),
            result.map(str::to_string).map_err(str::to_string),
        );
        self
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));
        match self.outputs.get(program) {
            Some(Ok(stdout)) => Ok(CommandOutput {
                stdout: stdout.clone(),
                stderr: String::new(),
            }),
            Some(Err(stderr)) => Err(AppError::Command(stderr.clone())),
            None => Err(AppError::Command(format!("{}: not found", program))),
        }
    }
}

struct TestBridge {
    app: Router,
    runner: Arc<MockRunner>,
    assistant: AssistantHandle,
    confirmations: ConfirmationHandle,
}

fn bridge_with(runner: MockRunner, speech_url: &str) -> TestBridge {
    let runner = Arc::new(runner);
    let confirmations = slow_confirmations();
    let assistant = AssistantHandle::new(
        Arc::new(MockCodeGenerator::new("print(1)", "python")),
        Arc::new(RecordingSpeech::default()),
        confirmations.clone(),
        AssistantOptions::default(),
    );
    let state = AppState {
        assistant: assistant.clone(),
        confirmations: confirmations.clone(),
        codegen: Arc::new(TemplateCodeGenerator),
        speech_service: HttpSpeech::new(speech_url).unwrap(),
        runner: runner.clone(),
        scripts: Scripts::new("/opt/jarvis/scripts"),
        notes: Arc::new(AsyncMutex::new(NoteBook::new())),
    };
    TestBridge {
        app: router(state),
        runner,
        assistant,
        confirmations,
    }
}

fn bridge(runner: MockRunner) -> TestBridge {
    bridge_with(runner, "http://127.0.0.1:9/speak")
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

// ============================================================================
// External command shell
// ============================================================================

#[tokio::test]
async fn test_phone_control_runs_script_with_argv() {
    // 1. Arrange
    let bridge = bridge(MockRunner::answering("bash", "wifi enabled\n"));

    // 2. Act
    let (status, body) = send(
        &bridge.app,
        Method::POST,
        "/api/phone-control",
        Some(json!({ "action": "wifi", "value": "on" })),
    )
    .await;

    // 3. Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "result": "wifi enabled\n" }));

    let calls = bridge.runner.calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![(
            "bash".to_string(),
            vec![
                "/opt/jarvis/scripts/phone-controls.sh".to_string(),
                "wifi".to_string(),
                "on".to_string()
            ]
        )]
    );

    let entries = bridge.confirmations.snapshot().await.unwrap();
    assert_eq!(entries[0].action, "wifi control executed");
    assert_eq!(entries[0].details.as_deref(), Some("Enabled"));
}

#[tokio::test]
async fn test_phone_control_numeric_value() {
    let bridge = bridge(MockRunner::answering("bash", ""));

    send(
        &bridge.app,
        Method::POST,
        "/api/phone-control",
        Some(json!({ "action": "brightness", "value": 120 })),
    )
    .await;

    let calls = bridge.runner.calls.lock().unwrap().clone();
    assert_eq!(calls[0].1[1..], ["brightness".to_string(), "120".to_string()]);
}

#[tokio::test]
async fn test_script_failure_is_500() {
    let bridge = bridge(MockRunner::default().with("bash", Err("torch: permission denied")));

    let (status, body) = send(
        &bridge.app,
        Method::POST,
        "/api/phone-control",
        Some(json!({ "action": "torch" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "success": false, "error": "torch: permission denied" })
    );
    assert!(bridge.confirmations.snapshot().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_launch_app_records_recent_app() {
    let bridge = bridge(MockRunner::answering("bash", "launched"));

    let (status, _) = send(
        &bridge.app,
        Method::POST,
        "/api/launch-app",
        Some(json!({ "appName": "Camera" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let calls = bridge.runner.calls.lock().unwrap().clone();
    assert_eq!(calls[0].1, vec!["/opt/jarvis/scripts/app-launcher.sh", "Camera"]);
    assert_eq!(bridge.assistant.state().await.unwrap().recent_apps, vec!["Camera"]);
}

#[tokio::test]
async fn test_launch_app_uses_catalogue_name() {
    let bridge = bridge(MockRunner::answering("bash", ""));

    let (status, _) = send(
        &bridge.app,
        Method::POST,
        "/api/launch-app",
        Some(json!({ "appName": " calculator " })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let calls = bridge.runner.calls.lock().unwrap().clone();
    assert_eq!(calls[0].1, vec!["/opt/jarvis/scripts/app-launcher.sh", "Calculator"]);
}

#[tokio::test]
async fn test_apps_route_lists_catalogue() {
    let bridge = bridge(MockRunner::default());

    let (status, body) = send(&bridge.app, Method::GET, "/api/apps", None).await;

    assert_eq!(status, StatusCode::OK);
    let apps = body["result"].as_array().unwrap();
    assert_eq!(apps.len(), 12);
    assert_eq!(apps[0]["name"], json!("Camera"));
    assert_eq!(apps[5]["launch_url"], json!("tel:"));
}

#[tokio::test]
async fn test_launch_app_requires_name() {
    let bridge = bridge(MockRunner::answering("bash", ""));

    let (status, body) = send(
        &bridge.app,
        Method::POST,
        "/api/launch-app",
        Some(json!({ "appName": "  " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(bridge.runner.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_system_info_parses_termux_output() {
    let runner = MockRunner::answering("termux-battery-status", r#"{"percentage": 81}"#)
        .with("termux-wifi-connectioninfo", Ok(r#"{"ssid": "Stark"}"#));
    let bridge = bridge(runner);

    let (status, body) = send(&bridge.app, Method::GET, "/api/system-info", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["battery"]["percentage"], json!(81));
    assert_eq!(body["result"]["wifi"]["ssid"], json!("Stark"));
    assert!(body["result"]["timestamp"].is_string());
}

#[tokio::test]
async fn test_system_info_invalid_json_is_500() {
    let runner = MockRunner::answering("termux-battery-status", "not json")
        .with("termux-wifi-connectioninfo", Ok("{}"));
    let bridge = bridge(runner);

    let (status, body) = send(&bridge.app, Method::GET, "/api/system-info", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_speak_forwards_to_speech_service() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/speak"))
        .and(body_json(json!({ "text": "Good morning", "language": "en" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    let bridge = bridge_with(MockRunner::default(), &format!("{}/speak", mock_server.uri()));

    let (status, body) = send(
        &bridge.app,
        Method::POST,
        "/api/speak",
        Some(json!({ "text": "Good morning" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
}

#[tokio::test]
async fn test_speak_service_down_is_500() {
    let bridge = bridge(MockRunner::default());

    let (status, body) = send(
        &bridge.app,
        Method::POST,
        "/api/speak",
        Some(json!({ "text": "hello", "language": "hi" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
}

// ============================================================================
// Code generation service
// ============================================================================

#[tokio::test]
async fn test_generate_code_requires_prompt() {
    let bridge = bridge(MockRunner::default());

    let (status, body) = send(&bridge.app, Method::POST, "/api/generate-code", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Prompt is required" }));

    let (status, _) = send(
        &bridge.app,
        Method::POST,
        "/api/generate-code",
        Some(json!({ "prompt": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_code_returns_code_and_language() {
    let bridge = bridge(MockRunner::default());

    let (status, body) = send(
        &bridge.app,
        Method::POST,
        "/api/generate-code",
        Some(json!({ "prompt": "python hello" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language"], json!("python"));
    assert!(body["code"].as_str().unwrap().contains("python hello"));
}

// ============================================================================
// Assistant surface
// ============================================================================

#[tokio::test]
async fn test_command_dispatches_final_text() {
    let bridge = bridge(MockRunner::default());

    let (status, body) = send(
        &bridge.app,
        Method::POST,
        "/api/command",
        Some(json!({ "text": "hello" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["intent"], json!("greeting"));
    assert_eq!(body["result"]["reply"]["action"], json!("Greeting processed"));

    let (_, state) = send(&bridge.app, Method::GET, "/api/state", None).await;
    assert!(state["result"]["response"].as_str().unwrap().starts_with("Hello!"));
}

#[tokio::test]
async fn test_interim_command_returns_null() {
    let bridge = bridge(MockRunner::default());

    let (status, body) = send(
        &bridge.app,
        Method::POST,
        "/api/command",
        Some(json!({ "text": "what ti", "final": false })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "result": null }));
}

#[tokio::test]
async fn test_blank_command_is_400() {
    let bridge = bridge(MockRunner::default());

    let (status, _) = send(
        &bridge.app,
        Method::POST,
        "/api/command",
        Some(json!({ "text": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_confirmations_listing() {
    let bridge = bridge(MockRunner::default());
    send(
        &bridge.app,
        Method::POST,
        "/api/command",
        Some(json!({ "text": "weather" })),
    )
    .await;

    let (status, body) = send(&bridge.app, Method::GET, "/api/confirmations", None).await;

    assert_eq!(status, StatusCode::OK);
    let entries = body["result"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["action"], json!("Weather information provided"));
    assert_eq!(entries[0]["status"], json!("pending"));
    assert_eq!(entries[1]["action"], json!("Processing voice command"));
}

#[tokio::test]
async fn test_host_events_route() {
    let bridge = bridge(MockRunner::default());

    let (status, body) = send(
        &bridge.app,
        Method::POST,
        "/api/events",
        Some(json!({ "type": "toggle_voice" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], json!("Voice output disabled"));
    assert!(!bridge.assistant.state().await.unwrap().voice_enabled);
}

#[tokio::test]
async fn test_utility_route_accepts_panel_actions() {
    let bridge = bridge(MockRunner::default());

    let (status, body) = send(
        &bridge.app,
        Method::POST,
        "/api/utility",
        Some(json!({ "action": "location_check", "latitude": 40.7128, "longitude": -74.006 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["result"],
        json!("Your location coordinates are 40.7128, -74.0060.")
    );
}

// ============================================================================
// Utilities
// ============================================================================

#[tokio::test]
async fn test_calculate_route() {
    let bridge = bridge(MockRunner::default());

    let (status, body) = send(
        &bridge.app,
        Method::POST,
        "/api/calculate",
        Some(json!({ "expression": "2 + 3 * 4" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["result"], json!("14"));

    let (status, _) = send(
        &bridge.app,
        Method::POST,
        "/api/calculate",
        Some(json!({ "expression": "4 / 0" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let entries = bridge.confirmations.snapshot().await.unwrap();
    assert_eq!(entries[0].action, "Calculation error");
    assert_eq!(entries[1].action, "Calculation completed");
}

#[tokio::test]
async fn test_calculate_rejects_oversized_expression() {
    let bridge = bridge(MockRunner::default());
    let expression = format!("{}1", "(".repeat(100_000));

    let (status, body) = send(
        &bridge.app,
        Method::POST,
        "/api/calculate",
        Some(json!({ "expression": expression })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));

    // The server is still answering.
    let (status, _) = send(
        &bridge.app,
        Method::POST,
        "/api/calculate",
        Some(json!({ "expression": "1 + 1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_message_link_route() {
    let bridge = bridge(MockRunner::default());

    let (status, body) = send(
        &bridge.app,
        Method::POST,
        "/api/messages",
        Some(json!({ "platform": "telegram", "recipient": "@happy", "message": "on my way" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["result"]["link"],
        json!("https://t.me/happy?text=on%20my%20way")
    );
    let entries = bridge.confirmations.snapshot().await.unwrap();
    assert_eq!(entries[0].action, "Telegram message prepared");
}

#[tokio::test]
async fn test_notes_routes() {
    let bridge = bridge(MockRunner::default());

    let (status, body) = send(
        &bridge.app,
        Method::POST,
        "/api/notes",
        Some(json!({ "content": "suit up at 9" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["result"]["id"].as_str().unwrap().to_string();

    let (_, body) = send(&bridge.app, Method::GET, "/api/notes", None).await;
    assert_eq!(body["result"][0]["content"], json!("suit up at 9"));

    let (status, _) = send(&bridge.app, Method::DELETE, &format!("/api/notes/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&bridge.app, Method::DELETE, &format!("/api/notes/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));

    let entries = bridge.confirmations.snapshot().await.unwrap();
    assert_eq!(entries[0].action, "Note deleted");
    assert_eq!(entries[1].action, "Note saved");
}

#[tokio::test]
async fn test_health() {
    let bridge = bridge(MockRunner::default());

    let (status, body) = send(&bridge.app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
}
