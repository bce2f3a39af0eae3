use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AppError;

/// The two locales the assistant speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Hi,
}

impl Locale {
    /// Short language code used on the wire ("en" / "hi").
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Hi => "hi",
        }
    }

    /// BCP-47 tag handed to speech engines.
    pub fn speech_tag(&self) -> &'static str {
        match self {
            Locale::En => "en-US",
            Locale::Hi => "hi-IN",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "en-us" | "english" => Ok(Locale::En),
            "hi" | "hi-in" | "hindi" => Ok(Locale::Hi),
            other => Err(AppError::Validation(format!("Unsupported language: {}", other))),
        }
    }
}

/// Lifecycle state of a confirmation toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationStatus {
    Pending,
    Completed,
    Error,
}

impl ConfirmationStatus {
    /// Badge text shown next to the entry.
    pub fn label(&self) -> &'static str {
        match self {
            ConfirmationStatus::Pending => "Processing...",
            ConfirmationStatus::Completed => "Done ✅",
            ConfirmationStatus::Error => "Error ❌",
        }
    }
}

/// A single entry of the confirmation queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Confirmation {
    pub id: Uuid,
    pub action: String,
    pub status: ConfirmationStatus,
    pub timestamp: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

fn default_code_language() -> String {
    "javascript".to_string()
}

/// Source code returned by a code generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    pub code: String,
    #[serde(default = "default_code_language")]
    pub language: String,
}

/// Messaging platforms the assistant can prepare links for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    WhatsApp,
    Telegram,
    Email,
}

impl Platform {
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::WhatsApp => "WhatsApp",
            Platform::Telegram => "Telegram",
            Platform::Email => "Email",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Observable state of the assistant, as a UI would render it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantState {
    pub locale: Locale,
    pub voice_enabled: bool,
    pub wake_word_active: bool,
    pub listening: bool,
    pub transcript: String,
    pub response: String,
    pub generated_code: Option<GeneratedCode>,
    pub recent_apps: Vec<String>,
}
