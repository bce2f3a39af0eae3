//! HTTP bridge between a browser UI and the device.
//!
//! Runs the helper scripts, forwards speech, serves code generation and
//! exposes the assistant and its confirmation queue.

pub mod error;
pub mod routes;
pub mod shell;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::actors::speech::HttpSpeech;
use crate::actors::{AssistantHandle, CodeGenerator, ConfirmationHandle};
use crate::utilities::NoteBook;

pub use error::ApiError;
pub use shell::{CommandOutput, CommandRunner, ProcessRunner, Scripts};

/// Shared state of every handler.
#[derive(Clone)]
pub struct AppState {
    pub assistant: AssistantHandle,
    pub confirmations: ConfirmationHandle,
    /// Generator behind `/api/generate-code`.
    pub codegen: Arc<dyn CodeGenerator>,
    pub speech_service: HttpSpeech,
    pub runner: Arc<dyn CommandRunner>,
    pub scripts: Scripts,
    pub notes: Arc<Mutex<NoteBook>>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health))
        .route("/api/phone-control", post(routes::phone_control))
        .route("/api/launch-app", post(routes::launch_app))
        .route("/api/apps", get(routes::list_apps))
        .route("/api/speak", post(routes::speak))
        .route("/api/system-info", get(routes::system_info))
        .route("/api/generate-code", post(routes::generate_code))
        .route("/api/command", post(routes::command))
        .route("/api/events", post(routes::host_event))
        .route("/api/utility", post(routes::utility))
        .route("/api/state", get(routes::assistant_state))
        .route("/api/confirmations", get(routes::confirmations))
        .route("/api/confirmations/stream", get(routes::confirmation_stream))
        .route("/api/calculate", post(routes::calculate))
        .route("/api/messages", post(routes::prepare_message))
        .route("/api/notes", get(routes::list_notes).post(routes::add_note))
        .route("/api/notes/{id}", delete(routes::delete_note))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
