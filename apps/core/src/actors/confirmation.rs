use crate::actors::messages::{ActorError, AppError, ConfirmationMessage};
use crate::models::{Confirmation, ConfirmationStatus};
use chrono::Local;
use std::collections::VecDeque;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{sleep, timeout, Duration};
use tracing::{debug, info, instrument};
use uuid::Uuid;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const EVENT_BUFFER: usize = 64;

/// Timing and size of the confirmation queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationSettings {
    /// How long an entry stays pending before it completes on its own.
    pub delay: Duration,
    /// Maximum number of retained entries.
    pub capacity: usize,
}

impl Default for ConfirmationSettings {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1000),
            capacity: 5,
        }
    }
}

/// A handle to the confirmation queue actor.
///
/// Entries start `pending` and turn `completed` once the delay elapses.
/// Marking an entry `error` wins over both, even after it completed.
/// Every change is broadcast to subscribers.
#[derive(Clone)]
pub struct ConfirmationHandle {
    sender: mpsc::Sender<ConfirmationMessage>,
    events: broadcast::Sender<Confirmation>,
}

impl ConfirmationHandle {
    /// Spawns the queue actor and returns a handle to it.
    pub fn new(settings: ConfirmationSettings) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        let runner = ConfirmationRunner {
            receiver,
            timer_sender: sender.downgrade(),
            entries: VecDeque::with_capacity(settings.capacity),
            settings,
            events: events.clone(),
        };
        tokio::spawn(async move { runner.run().await });
        Self { sender, events }
    }

    /// Records a new pending entry and returns its id.
    #[instrument(skip_all)]
    pub async fn add(&self, action: impl Into<String>, details: Option<String>) -> Result<Uuid, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(ConfirmationMessage::Add {
                action: action.into(),
                details,
                responder: send,
            })
            .await
            .map_err(ActorError::from)?;
        Ok(timeout(REQUEST_TIMEOUT, recv).await?.map_err(ActorError::from)?)
    }

    /// Marks an entry as failed. Returns `false` if the id is unknown
    /// (never added, or already evicted).
    pub async fn mark_error(&self, id: Uuid, details: Option<String>) -> Result<bool, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(ConfirmationMessage::MarkError {
                id,
                details,
                responder: send,
            })
            .await
            .map_err(ActorError::from)?;
        Ok(timeout(REQUEST_TIMEOUT, recv).await?.map_err(ActorError::from)?)
    }

    /// Current entries, newest first.
    pub async fn snapshot(&self) -> Result<Vec<Confirmation>, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(ConfirmationMessage::Snapshot { responder: send })
            .await
            .map_err(ActorError::from)?;
        Ok(timeout(REQUEST_TIMEOUT, recv).await?.map_err(ActorError::from)?)
    }

    /// Subscribes to entry changes (added, completed, errored).
    pub fn subscribe(&self) -> broadcast::Receiver<Confirmation> {
        self.events.subscribe()
    }
}

// --- Actor Runner ---
struct ConfirmationRunner {
    receiver: mpsc::Receiver<ConfirmationMessage>,
    // Weak so the timers alone do not keep the actor alive.
    timer_sender: mpsc::WeakSender<ConfirmationMessage>,
    entries: VecDeque<Confirmation>,
    settings: ConfirmationSettings,
    events: broadcast::Sender<Confirmation>,
}

impl ConfirmationRunner {
    async fn run(mut self) {
        info!("Confirmation queue started");
        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg);
        }
        info!("Confirmation queue stopped");
    }

    fn handle_message(&mut self, msg: ConfirmationMessage) {
        match msg {
            ConfirmationMessage::Add {
                action,
                details,
                responder,
            } => {
                let id = self.add(action, details);
                let _ = responder.send(id);
            }
            ConfirmationMessage::MarkError {
                id,
                details,
                responder,
            } => {
                let found = self.fail(id, details);
                let _ = responder.send(found);
            }
            ConfirmationMessage::Complete { id } => {
                self.complete(id);
            }
            ConfirmationMessage::Snapshot { responder } => {
                let _ = responder.send(self.entries.iter().cloned().collect());
            }
        }
    }

    fn add(&mut self, action: String, details: Option<String>) -> Uuid {
        let entry = Confirmation {
            id: Uuid::new_v4(),
            action,
            status: ConfirmationStatus::Pending,
            timestamp: Local::now(),
            details,
        };
        let id = entry.id;
        debug!("Confirmation added: {} ({})", entry.action, id);

        self.entries.push_front(entry.clone());
        self.entries.truncate(self.settings.capacity);
        let _ = self.events.send(entry);

        let timer_sender = self.timer_sender.clone();
        let delay = self.settings.delay;
        tokio::spawn(async move {
            sleep(delay).await;
            if let Some(sender) = timer_sender.upgrade() {
                let _ = sender.send(ConfirmationMessage::Complete { id }).await;
            }
        });

        id
    }

    /// Timer transition. Only a still-pending entry completes.
    fn complete(&mut self, id: Uuid) {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return;
        };
        if entry.status != ConfirmationStatus::Pending {
            return;
        }
        entry.status = ConfirmationStatus::Completed;
        let _ = self.events.send(entry.clone());
    }

    /// Marks an entry failed whatever its current status. Returns whether
    /// the id is present in the queue.
    fn fail(&mut self, id: Uuid, details: Option<String>) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        entry.status = ConfirmationStatus::Error;
        if details.is_some() {
            entry.details = details;
        }
        let _ = self.events.send(entry.clone());
        true
    }
}
