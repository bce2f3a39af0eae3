use serde::Serialize;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::brain::Reply;
use crate::models::{AssistantState, Confirmation};
use crate::utilities::actions::HostEvent;

/// Defines errors that can occur within the actor system.
#[derive(Debug, thiserror::Error, Serialize, Clone)]
pub enum ActorError {
    /// The code-generation endpoint answered with an explicit error.
    #[error("Code generation failed: {0}")]
    CodeGen(String),
    /// A speech back-end could not produce audio.
    #[error("Speech synthesis failed: {0}")]
    Speech(String),
    /// The actor's mailbox is closed or its responder was dropped.
    #[error("Actor unavailable: {0}")]
    Unavailable(String),
    /// A generic internal error within an actor.
    #[error("Internal system error: {0}")]
    Internal(String),
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for ActorError {
    fn from(err: tokio::sync::mpsc::error::SendError<T>) -> Self {
        ActorError::Unavailable(err.to_string())
    }
}

impl From<oneshot::error::RecvError> for ActorError {
    fn from(err: oneshot::error::RecvError) -> Self {
        ActorError::Unavailable(err.to_string())
    }
}

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the confirmation queue actor.
#[derive(Debug)]
pub enum ConfirmationMessage {
    /// Record a new pending entry.
    Add {
        action: String,
        details: Option<String>,
        responder: oneshot::Sender<Uuid>,
    },
    /// Move a pending entry to `error`. Answers whether the entry was found.
    MarkError {
        id: Uuid,
        details: Option<String>,
        responder: oneshot::Sender<bool>,
    },
    /// Sent by the entry's own timer once the completion delay elapsed.
    Complete { id: Uuid },
    /// Current entries, newest first.
    Snapshot {
        responder: oneshot::Sender<Vec<Confirmation>>,
    },
}

/// What a dispatched command produced.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    pub intent: crate::brain::Intent,
    pub reply: Reply,
    /// Final response text (may carry the voice-unavailable suffix).
    pub response: String,
    pub spoken: bool,
    /// Id of the "Processing voice command" confirmation.
    pub confirmation_id: Uuid,
}

/// Messages that can be sent to the `AssistantActor`.
#[derive(Debug)]
pub enum AssistantMessage {
    /// Classify and dispatch a complete command.
    ProcessCommand {
        text: String,
        responder: oneshot::Sender<Result<DispatchOutcome, AppError>>,
    },
    /// A speech-recognition result; only final ones are dispatched.
    Transcript {
        text: String,
        is_final: bool,
        responder: oneshot::Sender<Result<Option<DispatchOutcome>, AppError>>,
    },
    /// Something happened in a UI panel that the assistant should narrate.
    Host {
        event: HostEvent,
        responder: oneshot::Sender<Result<String, AppError>>,
    },
    /// Snapshot of the observable state.
    State {
        responder: oneshot::Sender<AssistantState>,
    },
    /// A command to shut down the assistant.
    Shutdown,
}
