use crate::actors::confirmation::ConfirmationHandle;
use crate::actors::messages::{ActorError, AppError, AssistantMessage, DispatchOutcome};
use crate::actors::traits::{CodeGenerator, SpeechSynthesizer, VoiceSettings};
use crate::brain::responses::{CODE_GENERATION_ERROR, VOICE_UNAVAILABLE_SUFFIX};
use crate::brain::{compose, contains_wake_word, Command, IntentClassifier, RecentApps, Reply, ResponseBook};
use crate::models::{AssistantState, GeneratedCode, Locale};
use crate::utilities::actions::{
    message_prepared_reply, phone_control_reply, recognition_error_reply, utility_reply, HostEvent,
    UtilityAction,
};
use chrono::Local;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{error, info, instrument, warn};

// Code generation makes the only outbound call, so dispatch gets the longest budget.
pub(crate) const DISPATCH_TIMEOUT: Duration = Duration::from_secs(90);
const HOST_EVENT_TIMEOUT: Duration = Duration::from_secs(30);
const STATE_TIMEOUT: Duration = Duration::from_secs(5);

/// Initial settings of the assistant.
#[derive(Debug, Clone, Copy)]
pub struct AssistantOptions {
    pub locale: Locale,
    pub voice_enabled: bool,
    pub wake_word_active: bool,
}

impl Default for AssistantOptions {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            voice_enabled: true,
            wake_word_active: true,
        }
    }
}

/// A handle to the `AssistantActor`.
///
/// The assistant owns the conversational state (locale, voice toggle,
/// transcript, last response, generated code, recent apps). Commands are
/// processed one at a time in arrival order.
#[derive(Clone)]
pub struct AssistantHandle {
    sender: mpsc::Sender<AssistantMessage>,
}

impl AssistantHandle {
    /// Spawns the assistant actor with its collaborators and returns a handle.
    ///
    /// # Arguments
    ///
    /// * `codegen` - Where code-generation requests go.
    /// * `speech` - The speech back-end used for every spoken response.
    /// * `confirmations` - The shared confirmation queue.
    /// * `options` - Initial locale and toggles.
    pub fn new(
        codegen: Arc<dyn CodeGenerator>,
        speech: Arc<dyn SpeechSynthesizer>,
        confirmations: ConfirmationHandle,
        options: AssistantOptions,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let runner = AssistantRunner {
            receiver,
            codegen,
            speech,
            confirmations,
            classifier: IntentClassifier::new(),
            locale: options.locale,
            voice_enabled: options.voice_enabled,
            wake_word_active: options.wake_word_active,
            listening: false,
            transcript: String::new(),
            response: String::new(),
            generated_code: None,
            recent_apps: RecentApps::default(),
        };
        tokio::spawn(async move { runner.run().await });
        Self { sender }
    }

    /// Classifies and dispatches a complete command.
    #[instrument(skip(self))]
    pub async fn process_command(&self, text: String) -> Result<DispatchOutcome, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(AssistantMessage::ProcessCommand { text, responder: send })
            .await
            .map_err(ActorError::from)?;
        timeout(DISPATCH_TIMEOUT, recv).await?.map_err(ActorError::from)?
    }

    /// Feeds a speech-recognition result. Interim results only update the
    /// transcript (and may trigger the wake word); final ones are dispatched.
    #[instrument(skip(self))]
    pub async fn process_transcript(
        &self,
        text: String,
        is_final: bool,
    ) -> Result<Option<DispatchOutcome>, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(AssistantMessage::Transcript {
                text,
                is_final,
                responder: send,
            })
            .await
            .map_err(ActorError::from)?;
        timeout(DISPATCH_TIMEOUT, recv).await?.map_err(ActorError::from)?
    }

    /// Narrates a UI panel event and returns the response text.
    #[instrument(skip(self))]
    pub async fn host_event(&self, event: HostEvent) -> Result<String, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(AssistantMessage::Host { event, responder: send })
            .await
            .map_err(ActorError::from)?;
        timeout(HOST_EVENT_TIMEOUT, recv).await?.map_err(ActorError::from)?
    }

    pub async fn state(&self) -> Result<AssistantState, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(AssistantMessage::State { responder: send })
            .await
            .map_err(ActorError::from)?;
        Ok(timeout(STATE_TIMEOUT, recv).await?.map_err(ActorError::from)?)
    }

    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender
            .send(AssistantMessage::Shutdown)
            .await
            .map_err(ActorError::from)?;
        Ok(())
    }
}

// --- Actor Runner ---
struct AssistantRunner {
    receiver: mpsc::Receiver<AssistantMessage>,
    codegen: Arc<dyn CodeGenerator>,
    speech: Arc<dyn SpeechSynthesizer>,
    confirmations: ConfirmationHandle,
    classifier: IntentClassifier,
    locale: Locale,
    voice_enabled: bool,
    wake_word_active: bool,
    listening: bool,
    transcript: String,
    response: String,
    generated_code: Option<GeneratedCode>,
    recent_apps: RecentApps,
}

impl AssistantRunner {
    async fn run(mut self) {
        info!("Assistant started");
        while let Some(msg) = self.receiver.recv().await {
            if matches!(msg, AssistantMessage::Shutdown) {
                info!("Assistant shutting down...");
                break;
            }
            self.handle_message(msg).await;
        }
        info!("Assistant stopped");
    }

    async fn handle_message(&mut self, msg: AssistantMessage) {
        match msg {
            AssistantMessage::ProcessCommand { text, responder } => {
                let result = self.dispatch(text).await;
                if let Err(e) = &result {
                    error!("Error processing command: {:?}", e);
                }
                let _ = responder.send(result);
            }
            AssistantMessage::Transcript {
                text,
                is_final,
                responder,
            } => {
                let result = self.handle_transcript(text, is_final).await;
                if let Err(e) = &result {
                    error!("Error processing transcript: {:?}", e);
                }
                let _ = responder.send(result);
            }
            AssistantMessage::Host { event, responder } => {
                let result = self.handle_host_event(event).await;
                if let Err(e) = &result {
                    error!("Error handling host event: {:?}", e);
                }
                let _ = responder.send(result);
            }
            AssistantMessage::State { responder } => {
                let _ = responder.send(self.snapshot());
            }
            AssistantMessage::Shutdown => {}
        }
    }

    fn snapshot(&self) -> AssistantState {
        AssistantState {
            locale: self.locale,
            voice_enabled: self.voice_enabled,
            wake_word_active: self.wake_word_active,
            listening: self.listening,
            transcript: self.transcript.clone(),
            response: self.response.clone(),
            generated_code: self.generated_code.clone(),
            recent_apps: self.recent_apps.names().to_vec(),
        }
    }

    /// Classifies and answers one command. Blank input is rejected; anything
    /// else is classified as given, so the fallback echoes it verbatim.
    #[instrument(skip(self))]
    async fn dispatch(&mut self, text: String) -> Result<DispatchOutcome, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::Validation("Command text is required".to_string()));
        }

        let confirmation_id = self
            .confirmations
            .add("Processing voice command", Some(text.clone()))
            .await?;

        let classified = self.classifier.classify(&text);
        info!(
            "Intent {} (keyword {:?})",
            classified.intent, classified.matched_keyword
        );

        let book = ResponseBook::new(self.locale);
        let mut reply = compose(&classified.command, &book, &Local::now());

        match &classified.command {
            Command::LaunchApp { app: Some(app) } => {
                self.recent_apps.record(app);
                self.confirmations
                    .add(format!("{} app launched", app), Some("Check your device".to_string()))
                    .await?;
            }
            Command::GenerateCode { request } if !request.is_empty() => {
                if let Some(failure) = self.generate_code(request).await? {
                    reply = failure;
                }
            }
            Command::SwitchLanguage { target: Some(locale) } => {
                self.locale = *locale;
            }
            _ => {}
        }

        self.confirmations
            .add(reply.action.clone(), reply.details.clone())
            .await?;

        let (response, spoken) = self.say(&reply.text).await;
        self.response = response.clone();

        Ok(DispatchOutcome {
            intent: classified.intent,
            reply,
            response,
            spoken,
            confirmation_id,
        })
    }

    /// Runs one code-generation call. Returns the replacement reply when it failed.
    async fn generate_code(&mut self, request: &str) -> Result<Option<Reply>, AppError> {
        let pending = self
            .confirmations
            .add("Generating code", Some(request.to_string()))
            .await?;

        match self.codegen.generate(request).await {
            Ok(code) => {
                self.generated_code = Some(code);
                self.confirmations
                    .add(
                        "Code generation successful",
                        Some("Check code preview section".to_string()),
                    )
                    .await?;
                Ok(None)
            }
            Err(e) => {
                warn!("Code generation failed: {}", e);
                self.confirmations.mark_error(pending, Some(e.to_string())).await?;
                let text = match &e {
                    AppError::Actor(ActorError::CodeGen(msg)) => {
                        format!("Sorry, I couldn't generate the code: {}", msg)
                    }
                    _ => CODE_GENERATION_ERROR.to_string(),
                };
                Ok(Some(
                    Reply::new(text, "Code generation failed").with_details(request.to_string()),
                ))
            }
        }
    }

    async fn handle_transcript(
        &mut self,
        text: String,
        is_final: bool,
    ) -> Result<Option<DispatchOutcome>, AppError> {
        self.transcript = text.clone();

        if is_final {
            return self.dispatch(text).await.map(Some);
        }

        if self.wake_word_active && contains_wake_word(&text) {
            info!("Wake word detected");
            self.listening = true;
            let book = ResponseBook::new(self.locale);
            let reply = Reply::new(book.listening(), "Wake word detected").with_details("J.A.R.V.I.S activated");
            self.narrate(reply).await?;
        }
        Ok(None)
    }

    #[instrument(skip(self))]
    async fn handle_host_event(&mut self, event: HostEvent) -> Result<String, AppError> {
        let now = Local::now();
        match event {
            HostEvent::Utility(action) => {
                if let UtilityAction::AppLaunched { app } = &action {
                    self.recent_apps.record(app);
                }
                self.narrate(utility_reply(&action, &now)).await
            }
            HostEvent::AppLaunched { app } => {
                self.recent_apps.record(&app);
                let action = UtilityAction::AppLaunched { app };
                self.narrate(utility_reply(&action, &now)).await
            }
            HostEvent::MessagePrepared { platform, message } => {
                self.narrate(message_prepared_reply(platform, &message)).await
            }
            HostEvent::PhoneControl { action, enabled } => {
                self.narrate(phone_control_reply(&action, enabled)).await
            }
            HostEvent::ToggleVoice => {
                self.voice_enabled = !self.voice_enabled;
                let action = if self.voice_enabled {
                    "Voice output enabled"
                } else {
                    "Voice output disabled"
                };
                self.confirmations.add(action, None).await?;
                Ok(action.to_string())
            }
            HostEvent::Listening { active } => {
                self.listening = active;
                let action = if active {
                    "Voice listening started"
                } else {
                    "Voice listening stopped"
                };
                self.confirmations.add(action, None).await?;
                Ok(action.to_string())
            }
            HostEvent::RecognitionError { code } => {
                self.listening = false;
                self.narrate(recognition_error_reply(&code)).await
            }
            HostEvent::Ready => {
                let book = ResponseBook::new(self.locale);
                let reply = Reply::new(book.ready(), "J.A.R.V.I.S initialized").with_details("Ready to assist");
                self.narrate(reply).await
            }
        }
    }

    /// Records the reply's confirmation, speaks it and makes it the current response.
    async fn narrate(&mut self, reply: Reply) -> Result<String, AppError> {
        self.confirmations.add(reply.action, reply.details).await?;
        let (response, _) = self.say(&reply.text).await;
        self.response = response.clone();
        Ok(response)
    }

    /// Speaks `text` when voice output is on. Returns the text to show and
    /// whether it was handed to the synthesizer.
    async fn say(&self, text: &str) -> (String, bool) {
        if !self.voice_enabled {
            return (text.to_string(), false);
        }
        if !self.speech.is_available() {
            return (format!("{}{}", text, VOICE_UNAVAILABLE_SUFFIX), false);
        }
        match self.speech.speak(text, &VoiceSettings::for_locale(self.locale)).await {
            Ok(()) => (text.to_string(), true),
            Err(e) => {
                warn!("Speech synthesis failed: {}", e);
                (text.to_string(), false)
            }
        }
    }
}
