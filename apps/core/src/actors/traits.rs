use crate::actors::messages::AppError;
use crate::models::{GeneratedCode, Locale};
use async_trait::async_trait;

/// Defines the interface for anything that turns a request into source code.
///
/// The assistant talks to a remote endpoint through this trait, and the
/// endpoint itself is served by a generator behind the same trait, so tests
/// can swap either side for a mock.
#[async_trait]
pub trait CodeGenerator: Send + Sync + 'static {
    async fn generate(&self, prompt: &str) -> Result<GeneratedCode, AppError>;
}

/// Voice parameters applied to every utterance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceSettings {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    pub locale: Locale,
}

impl VoiceSettings {
    pub fn for_locale(locale: Locale) -> Self {
        Self {
            rate: 0.9,
            pitch: 1.1,
            volume: 0.8,
            locale,
        }
    }
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self::for_locale(Locale::En)
    }
}

/// Defines the interface of a text-to-speech back-end.
///
/// `speak` should return quickly; a new utterance cancels the previous one.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + 'static {
    /// Whether this back-end can produce audio at all in the current environment.
    fn is_available(&self) -> bool {
        true
    }

    async fn speak(&self, text: &str, voice: &VoiceSettings) -> Result<(), AppError>;
}
