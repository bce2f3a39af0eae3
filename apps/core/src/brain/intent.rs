//! Intent classification using ordered keyword containment.
//!
//! Predicates are checked in a fixed priority order and the first one whose
//! keyword is a substring of the lower-cased command wins. There is no
//! scoring and no backtracking; anything unmatched falls through to an echo.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::apps::extract_app_name;
use crate::models::{Locale, Platform};

/// Detected intent type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    AppLaunch,
    CodeGeneration,
    LanguageSwitch,
    Time,
    Date,
    Weather,
    Notes,
    Calculation,
    Location,
    Messaging,
    DeviceControl,
    /// Nothing matched; the command is echoed back.
    Fallback,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns a machine-friendly label for the intent
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::AppLaunch => "app_launch",
            Intent::CodeGeneration => "code_generation",
            Intent::LanguageSwitch => "language_switch",
            Intent::Time => "time",
            Intent::Date => "date",
            Intent::Weather => "weather",
            Intent::Notes => "notes",
            Intent::Calculation => "calculation",
            Intent::Location => "location",
            Intent::Messaging => "messaging",
            Intent::DeviceControl => "device_control",
            Intent::Fallback => "fallback",
        }
    }
}

/// Requested on/off state for a toggleable device feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Toggle {
    On,
    Off,
    Unspecified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeChange {
    Up,
    Down,
    Unspecified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "control", content = "setting")]
pub enum DeviceAction {
    Wifi(Toggle),
    Torch(Toggle),
    Volume(VolumeChange),
    Brightness,
    Vibrate,
    Battery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteRequest {
    Save,
    Browse,
}

/// A classified command with the parameters its branch needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Command {
    Greeting,
    LaunchApp { app: Option<String> },
    GenerateCode { request: String },
    SwitchLanguage { target: Option<Locale> },
    Time,
    Date,
    Weather,
    Notes { request: NoteRequest },
    Calculate,
    Location,
    Message { platform: Option<Platform> },
    Device { action: DeviceAction },
    Echo { text: String },
}

impl Command {
    pub fn intent(&self) -> Intent {
        match self {
            Command::Greeting => Intent::Greeting,
            Command::LaunchApp { .. } => Intent::AppLaunch,
            Command::GenerateCode { .. } => Intent::CodeGeneration,
            Command::SwitchLanguage { .. } => Intent::LanguageSwitch,
            Command::Time => Intent::Time,
            Command::Date => Intent::Date,
            Command::Weather => Intent::Weather,
            Command::Notes { .. } => Intent::Notes,
            Command::Calculate => Intent::Calculation,
            Command::Location => Intent::Location,
            Command::Message { .. } => Intent::Messaging,
            Command::Device { .. } => Intent::DeviceControl,
            Command::Echo { .. } => Intent::Fallback,
        }
    }
}

/// Result of intent classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentResult {
    pub intent: Intent,
    /// Keyword that committed the classifier, `None` for the fallback.
    pub matched_keyword: Option<String>,
    pub command: Command,
}

struct IntentRule {
    intent: Intent,
    keywords: &'static [&'static str],
}

/// Priority order of the predicates. Fallback is implicit.
const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Greeting,
        keywords: &["hello", "hi", "namaste"],
    },
    IntentRule {
        intent: Intent::AppLaunch,
        keywords: &["open", "launch", "kholo"],
    },
    IntentRule {
        intent: Intent::CodeGeneration,
        keywords: &["code", "generate", "create"],
    },
    IntentRule {
        intent: Intent::LanguageSwitch,
        keywords: &["language", "bhasha"],
    },
    IntentRule {
        intent: Intent::Time,
        keywords: &["time"],
    },
    IntentRule {
        intent: Intent::Date,
        keywords: &["date"],
    },
    IntentRule {
        intent: Intent::Weather,
        keywords: &["weather"],
    },
    IntentRule {
        intent: Intent::Notes,
        keywords: &["note", "remember"],
    },
    IntentRule {
        intent: Intent::Calculation,
        keywords: &["calculate", "math"],
    },
    IntentRule {
        intent: Intent::Location,
        keywords: &["location", "where am i"],
    },
    IntentRule {
        intent: Intent::Messaging,
        keywords: &["message", "whatsapp", "telegram", "email"],
    },
    IntentRule {
        intent: Intent::DeviceControl,
        keywords: &["wifi", "torch", "volume", "brightness", "vibrate", "battery"],
    },
];

// NOTE: expect() is acceptable here, the pattern is a compile-time constant.
static CODE_FILLER_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)generate|code|create|make|jarvis").expect("Invalid regex: code filler words")
});

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Strips the trigger words from a code-generation command, leaving the request.
pub fn extract_code_request(command: &str) -> String {
    CODE_FILLER_WORDS.replace_all(command, "").trim().to_string()
}

/// Intent classifier using ordered keyword rules
#[derive(Debug, Default, Clone, Copy)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Finds the winning rule for a command without building its parameters.
    pub fn detect(&self, command: &str) -> (Intent, Option<&'static str>) {
        let lower = command.to_lowercase();
        for rule in INTENT_RULES {
            if let Some(keyword) = rule.keywords.iter().find(|k| lower.contains(*k)) {
                return (rule.intent, Some(*keyword));
            }
        }
        (Intent::Fallback, None)
    }

    /// Classify a raw command. Matching runs on the lower-cased text; the
    /// original text is kept for the echo and code-request payloads.
    pub fn classify(&self, command: &str) -> IntentResult {
        let lower = command.to_lowercase();
        let (intent, keyword) = self.detect(&lower);

        let command = match intent {
            Intent::Greeting => Command::Greeting,
            Intent::AppLaunch => Command::LaunchApp {
                app: extract_app_name(&lower).map(str::to_string),
            },
            Intent::CodeGeneration => Command::GenerateCode {
                request: extract_code_request(command),
            },
            Intent::LanguageSwitch => Command::SwitchLanguage {
                target: language_target(&lower),
            },
            Intent::Time => Command::Time,
            Intent::Date => Command::Date,
            Intent::Weather => Command::Weather,
            Intent::Notes => Command::Notes {
                request: if contains_any(&lower, &["save", "add"]) {
                    NoteRequest::Save
                } else {
                    NoteRequest::Browse
                },
            },
            Intent::Calculation => Command::Calculate,
            Intent::Location => Command::Location,
            Intent::Messaging => Command::Message {
                platform: messaging_platform(&lower),
            },
            Intent::DeviceControl => Command::Device {
                action: device_action(&lower),
            },
            Intent::Fallback => Command::Echo {
                text: command.to_string(),
            },
        };

        IntentResult {
            intent,
            matched_keyword: keyword.map(str::to_string),
            command,
        }
    }
}

fn language_target(lower: &str) -> Option<Locale> {
    if contains_any(lower, &["hindi", "हिंदी"]) {
        Some(Locale::Hi)
    } else if contains_any(lower, &["english", "अंग्रेजी"]) {
        Some(Locale::En)
    } else {
        None
    }
}

fn messaging_platform(lower: &str) -> Option<Platform> {
    if lower.contains("whatsapp") {
        Some(Platform::WhatsApp)
    } else if lower.contains("telegram") {
        Some(Platform::Telegram)
    } else if lower.contains("email") {
        Some(Platform::Email)
    } else {
        None
    }
}

fn toggle(lower: &str) -> Toggle {
    if contains_any(lower, &["on", "enable"]) {
        Toggle::On
    } else if contains_any(lower, &["off", "disable"]) {
        Toggle::Off
    } else {
        Toggle::Unspecified
    }
}

// Only reached once one of the device keywords matched, so the last arm is
// battery.
fn device_action(lower: &str) -> DeviceAction {
    if lower.contains("wifi") {
        DeviceAction::Wifi(toggle(lower))
    } else if contains_any(lower, &["torch", "flashlight"]) {
        DeviceAction::Torch(toggle(lower))
    } else if lower.contains("volume") {
        let change = if contains_any(lower, &["up", "increase"]) {
            VolumeChange::Up
        } else if contains_any(lower, &["down", "decrease"]) {
            VolumeChange::Down
        } else {
            VolumeChange::Unspecified
        };
        DeviceAction::Volume(change)
    } else if lower.contains("brightness") {
        DeviceAction::Brightness
    } else if lower.contains("vibrate") {
        DeviceAction::Vibrate
    } else {
        DeviceAction::Battery
    }
}
