use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use validator::Validate;

use crate::actors::ConfirmationSettings;
use crate::error::AppError;
use crate::models::Locale;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    /// Bunyan-style JSON lines.
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown log format: {}", other))),
        }
    }
}

/// Which speech back-end the assistant talks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoiceBackend {
    /// Local `espeak` / `termux-tts-speak`.
    #[default]
    Shell,
    /// The speech service at `speech_url`.
    Http,
    None,
}

impl FromStr for VoiceBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shell" | "local" => Ok(VoiceBackend::Shell),
            "http" => Ok(VoiceBackend::Http),
            "none" | "off" => Ok(VoiceBackend::None),
            other => Err(AppError::Config(format!("Unknown voice back-end: {}", other))),
        }
    }
}

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone, Validate)]
pub struct Config {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    pub scripts_dir: PathBuf,
    #[validate(url)]
    pub speech_url: String,
    #[validate(url)]
    pub codegen_url: String,
    pub openai_api_key: Option<String>,
    #[validate(length(min = 1))]
    pub openai_model: String,
    #[validate(url)]
    pub openai_base_url: String,
    #[validate(range(min = 1, max = 60000))]
    pub confirmation_delay_ms: u64,
    #[validate(range(min = 1, max = 100))]
    pub confirmation_capacity: usize,
    pub language: Locale,
    pub voice: VoiceBackend,
    pub notes_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {}", name, raw))),
        None => Ok(default),
    }
}

/// Expands a leading `~/` with `$HOME`.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), env::var("HOME")) {
        (Some(rest), Ok(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(path),
    }
}

impl Config {
    /// Loads the configuration from `JARVIS_*` / `OPENAI_*` variables and validates it.
    pub fn from_env() -> Result<Self, AppError> {
        let config = Self {
            host: var("JARVIS_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_var("JARVIS_PORT", 8000)?,
            scripts_dir: expand_home(&var("JARVIS_SCRIPTS_DIR").unwrap_or_else(|| "~/jarvis/scripts".to_string())),
            speech_url: var("JARVIS_SPEECH_URL").unwrap_or_else(|| "http://localhost:8001/speak".to_string()),
            codegen_url: var("JARVIS_CODEGEN_URL")
                .unwrap_or_else(|| "http://localhost:8000/api/generate-code".to_string()),
            openai_api_key: var("OPENAI_API_KEY"),
            openai_model: var("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o".to_string()),
            openai_base_url: var("OPENAI_BASE_URL").unwrap_or_else(|| "https://api.openai.com".to_string()),
            confirmation_delay_ms: parse_var("JARVIS_CONFIRMATION_DELAY_MS", 1000)?,
            confirmation_capacity: parse_var("JARVIS_CONFIRMATION_CAPACITY", 5)?,
            language: parse_var("JARVIS_LANGUAGE", Locale::En)?,
            voice: parse_var("JARVIS_VOICE", VoiceBackend::Shell)?,
            notes_path: var("JARVIS_NOTES_PATH").map(|p| expand_home(&p)),
            log_format: parse_var("JARVIS_LOG_FORMAT", LogFormat::Pretty)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn confirmation_settings(&self) -> ConfirmationSettings {
        ConfirmationSettings {
            delay: Duration::from_millis(self.confirmation_delay_ms),
            capacity: self.confirmation_capacity,
        }
    }
}
