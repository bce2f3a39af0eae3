use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::process::Stdio;
use tokio::process::Command;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::actors::messages::{ActorError, AppError};
use crate::actors::traits::{SpeechSynthesizer, VoiceSettings};
use crate::models::Locale;

const ESPEAK: &str = "espeak";
const TERMUX_TTS: &str = "termux-tts-speak";
const FORWARD_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the argument vector for a local speech engine.
///
/// Hindi always goes through `termux-tts-speak`, which has the voice for it.
/// English prefers `espeak` when it is installed.
pub fn speech_argv(text: &str, voice: &VoiceSettings, espeak_available: bool) -> Vec<String> {
    if voice.locale == Locale::Hi || !espeak_available {
        let mut argv = vec![TERMUX_TTS.to_string()];
        if voice.locale == Locale::Hi {
            argv.extend(["-l".to_string(), voice.locale.speech_tag().to_string()]);
        }
        argv.push(text.to_string());
        return argv;
    }

    // espeak defaults: 175 wpm, pitch 50, amplitude 100.
    vec![
        ESPEAK.to_string(),
        "-s".to_string(),
        ((175.0 * voice.rate).round() as u32).to_string(),
        "-p".to_string(),
        ((50.0 * voice.pitch).round() as u32).min(99).to_string(),
        "-a".to_string(),
        ((100.0 * voice.volume).round() as u32).min(200).to_string(),
        text.to_string(),
    ]
}

/// Speaks through a local process.
///
/// A new utterance kills the one still playing.
#[derive(Default)]
pub struct ShellSpeech {
    current: Mutex<Option<JoinHandle<()>>>,
}

impl ShellSpeech {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SpeechSynthesizer for ShellSpeech {
    fn is_available(&self) -> bool {
        which::which(ESPEAK).is_ok() || which::which(TERMUX_TTS).is_ok()
    }

    #[instrument(skip(self, text))]
    async fn speak(&self, text: &str, voice: &VoiceSettings) -> Result<(), AppError> {
        let argv = speech_argv(text, voice, which::which(ESPEAK).is_ok());
        let program = which::which(&argv[0])?;

        let mut child = Command::new(program)
            .args(&argv[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ActorError::Speech(format!("Failed to start {}: {}", argv[0], e)))?;

        let mut current = self.current.lock().await;
        if let Some(previous) = current.take() {
            // Aborting drops the previous child, which kills it.
            previous.abort();
        }
        *current = Some(tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if !status.success() => warn!("Speech process exited with {}", status),
                Ok(_) => debug!("Utterance finished"),
                Err(e) => warn!("Speech process failed: {}", e),
            }
        }));
        Ok(())
    }
}

/// Forwards utterances to a speech service (`POST {text, language}`).
#[derive(Clone)]
pub struct HttpSpeech {
    client: Client,
    endpoint: Url,
}

impl HttpSpeech {
    pub fn new(endpoint: &str) -> Result<Self, AppError> {
        Ok(Self {
            client: Client::new(),
            endpoint: Url::parse(endpoint)?,
        })
    }

    /// Sends raw text with a language code and returns the service's JSON answer.
    pub async fn forward(&self, text: &str, language: &str) -> Result<serde_json::Value, AppError> {
        let res = self
            .client
            .post(self.endpoint.clone())
            .timeout(FORWARD_TIMEOUT)
            .json(&json!({ "text": text, "language": language }))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ActorError::Speech(format!("Speech service returned {}: {}", status, body)).into());
        }
        let body = res.text().await?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpSpeech {
    #[instrument(skip(self, text))]
    async fn speak(&self, text: &str, voice: &VoiceSettings) -> Result<(), AppError> {
        self.forward(text, voice.locale.code()).await.map(|_| ())
    }
}

/// No audio at all; responses get the voice-unavailable suffix.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSpeech;

#[async_trait]
impl SpeechSynthesizer for SilentSpeech {
    fn is_available(&self) -> bool {
        false
    }

    async fn speak(&self, _text: &str, _voice: &VoiceSettings) -> Result<(), AppError> {
        Ok(())
    }
}
