use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use chrono::Local;
use futures::stream::{self, Stream};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use uuid::Uuid;

use super::{ApiError, AppState};
use crate::brain::{find_app, APP_CATALOGUE};
use crate::error::AppError;
use crate::models::Platform;
use crate::utilities::calculator::{evaluate, format_result};
use crate::utilities::messaging::message_link;
use crate::utilities::{HostEvent, UtilityAction};

fn success(result: impl Serialize) -> Json<Value> {
    Json(json!({ "success": true, "result": result }))
}

/// Tells the assistant what the bridge just did. Narration is best effort.
async fn narrate(state: &AppState, event: HostEvent) {
    if let Err(e) = state.assistant.host_event(event).await {
        warn!("Failed to narrate host event: {}", e);
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "timestamp": Local::now().to_rfc3339() }))
}

#[derive(Debug, Deserialize)]
pub struct PhoneControlRequest {
    pub action: String,
    #[serde(default)]
    pub value: Option<Value>,
}

fn value_argument(value: &Option<Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

fn value_enabled(value: &Option<Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !matches!(
            s.to_lowercase().as_str(),
            "off" | "false" | "0" | "disable" | "down"
        ),
        _ => true,
    }
}

pub async fn phone_control(
    State(state): State<AppState>,
    Json(body): Json<PhoneControlRequest>,
) -> Result<Json<Value>, ApiError> {
    let action = body.action.trim();
    if action.is_empty() {
        return Err(ApiError::BadRequest("Action is required".to_string()));
    }
    let argument = value_argument(&body.value);
    let argv = state.scripts.phone_control(action, argument.as_deref());

    info!("Phone control: {} {:?}", action, argument);
    let output = state.runner.run("bash", &argv).await?;

    narrate(
        &state,
        HostEvent::PhoneControl {
            action: action.to_string(),
            enabled: value_enabled(&body.value),
        },
    )
    .await;
    Ok(success(output.stdout))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchAppRequest {
    pub app_name: String,
}

pub async fn launch_app(
    State(state): State<AppState>,
    Json(body): Json<LaunchAppRequest>,
) -> Result<Json<Value>, ApiError> {
    let requested = body.app_name.trim();
    if requested.is_empty() {
        return Err(ApiError::BadRequest("App name is required".to_string()));
    }
    // Catalogue apps use their canonical name; others go to the script as typed.
    let app = find_app(requested).map_or(requested, |entry| entry.name);

    info!("Launching app: {}", app);
    let output = state.runner.run("bash", &state.scripts.launch_app(app)).await?;

    narrate(&state, HostEvent::AppLaunched { app: app.to_string() }).await;
    Ok(success(output.stdout))
}

/// Launcher panel contents.
pub async fn list_apps() -> Json<Value> {
    success(APP_CATALOGUE)
}

fn default_language() -> String {
    "en".to_string()
}

#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    pub text: String,
    #[serde(default = "default_language")]
    pub language: String,
}

pub async fn speak(
    State(state): State<AppState>,
    Json(body): Json<SpeakRequest>,
) -> Result<Json<Value>, ApiError> {
    state.speech_service.forward(&body.text, &body.language).await?;
    Ok(Json(json!({ "success": true })))
}

async fn command_json(state: &AppState, program: &str) -> Result<Value, AppError> {
    let output = state.runner.run(program, &[]).await?;
    serde_json::from_str(&output.stdout)
        .map_err(|e| AppError::Command(format!("{} printed invalid JSON: {}", program, e)))
}

pub async fn system_info(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let battery = command_json(&state, "termux-battery-status").await?;
    let wifi = command_json(&state, "termux-wifi-connectioninfo").await?;
    Ok(success(json!({
        "battery": battery,
        "wifi": wifi,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}

#[derive(Debug, Deserialize)]
pub struct GenerateCodeRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Answers `{code, language}` or `{error}`, the shape the assistant's
/// remote code generator expects.
pub async fn generate_code(
    State(state): State<AppState>,
    Json(body): Json<GenerateCodeRequest>,
) -> Response {
    let prompt = body.prompt.as_deref().map(str::trim).unwrap_or_default();
    if prompt.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Prompt is required" })),
        )
            .into_response();
    }

    match state.codegen.generate(prompt).await {
        Ok(code) => Json(code).into_response(),
        Err(e) => {
            warn!("Code generation error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

fn default_final() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub text: String,
    #[serde(rename = "final", default = "default_final")]
    pub is_final: bool,
}

pub async fn command(
    State(state): State<AppState>,
    Json(body): Json<CommandRequest>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state
        .assistant
        .process_transcript(body.text, body.is_final)
        .await?;
    Ok(success(outcome))
}

/// Assistant-level UI events that are not tied to a bridge action.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEventRequest {
    ToggleVoice,
    Listening { active: bool },
    RecognitionError { code: String },
    Ready,
}

impl From<HostEventRequest> for HostEvent {
    fn from(request: HostEventRequest) -> Self {
        match request {
            HostEventRequest::ToggleVoice => HostEvent::ToggleVoice,
            HostEventRequest::Listening { active } => HostEvent::Listening { active },
            HostEventRequest::RecognitionError { code } => HostEvent::RecognitionError { code },
            HostEventRequest::Ready => HostEvent::Ready,
        }
    }
}

pub async fn host_event(
    State(state): State<AppState>,
    Json(body): Json<HostEventRequest>,
) -> Result<Json<Value>, ApiError> {
    let response = state.assistant.host_event(body.into()).await?;
    Ok(success(response))
}

pub async fn utility(
    State(state): State<AppState>,
    Json(action): Json<UtilityAction>,
) -> Result<Json<Value>, ApiError> {
    let response = state.assistant.host_event(HostEvent::Utility(action)).await?;
    Ok(success(response))
}

pub async fn assistant_state(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(success(state.assistant.state().await?))
}

pub async fn confirmations(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(success(state.confirmations.snapshot().await?))
}

/// Streams confirmation changes as `confirmation` events.
pub async fn confirmation_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.confirmations.subscribe();

    let stream = stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(entry) => {
                    let event = Event::default()
                        .event("confirmation")
                        .json_data(&entry)
                        .unwrap_or_else(|_| Event::default().comment("error"));
                    return Some((Ok(event), receiver));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Confirmation stream lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keepalive"),
    )
}

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    pub expression: String,
}

pub async fn calculate(
    State(state): State<AppState>,
    Json(body): Json<CalculateRequest>,
) -> Result<Json<Value>, ApiError> {
    let input = body.expression.trim().to_string();
    match evaluate(&input) {
        Ok(value) => {
            let result = format_result(value);
            narrate(
                &state,
                HostEvent::Utility(UtilityAction::Calculation {
                    input: input.clone(),
                    result: result.clone(),
                }),
            )
            .await;
            Ok(success(json!({ "expression": input, "result": result })))
        }
        Err(e) => {
            narrate(
                &state,
                HostEvent::Utility(UtilityAction::CalculationError { input }),
            )
            .await;
            Err(e.into())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub platform: Platform,
    pub recipient: String,
    pub message: String,
}

pub async fn prepare_message(
    State(state): State<AppState>,
    Json(body): Json<MessageRequest>,
) -> Result<Json<Value>, ApiError> {
    let link = message_link(body.platform, &body.recipient, &body.message)?;
    narrate(
        &state,
        HostEvent::MessagePrepared {
            platform: body.platform,
            message: body.message,
        },
    )
    .await;
    Ok(success(json!({ "link": link })))
}

pub async fn list_notes(State(state): State<AppState>) -> Json<Value> {
    let notes = state.notes.lock().await;
    success(notes.notes())
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub content: String,
}

pub async fn add_note(
    State(state): State<AppState>,
    Json(body): Json<NoteRequest>,
) -> Result<Json<Value>, ApiError> {
    let note = state.notes.lock().await.add(&body.content)?;
    narrate(
        &state,
        HostEvent::Utility(UtilityAction::NoteSaved {
            content: note.content.clone(),
        }),
    )
    .await;
    Ok(success(note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let removed = state.notes.lock().await.delete(id)?;
    if !removed {
        return Err(ApiError::NotFound(format!("Note {} not found", id)));
    }
    narrate(&state, HostEvent::Utility(UtilityAction::NoteDeleted { id: Some(id) })).await;
    Ok(success(json!({ "id": id })))
}
