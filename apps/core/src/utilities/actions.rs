//! Panel events the assistant narrates.
//!
//! The UI panels (utilities, messaging, phone controls, launcher) act on
//! their own and then tell the assistant what happened; the assistant answers
//! with a spoken line and a confirmation entry.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brain::responses::{format_date, format_time};
use crate::brain::Reply;
use crate::models::Platform;

/// Canned weather shown by the utilities panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub temperature: String,
    pub condition: String,
    pub humidity: String,
}

impl Default for WeatherReport {
    fn default() -> Self {
        Self {
            location: "Current Location".to_string(),
            temperature: "22°C".to_string(),
            condition: "Partly Cloudy".to_string(),
            humidity: "65%".to_string(),
        }
    }
}

/// Result reported by the utilities panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UtilityAction {
    TimeCheck,
    DateCheck,
    WeatherCheck {
        #[serde(default)]
        report: WeatherReport,
    },
    LocationCheck {
        latitude: f64,
        longitude: f64,
    },
    LocationError {
        message: String,
    },
    NoteSaved {
        content: String,
    },
    NoteDeleted {
        #[serde(default)]
        id: Option<Uuid>,
    },
    Calculation {
        input: String,
        result: String,
    },
    CalculationError {
        input: String,
    },
    AppLaunched {
        app: String,
    },
    #[serde(other)]
    Unknown,
}

/// Everything a host UI can report to the assistant.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Utility(UtilityAction),
    MessagePrepared { platform: Platform, message: String },
    PhoneControl { action: String, enabled: bool },
    /// An app was opened from the launcher panel.
    AppLaunched { app: String },
    ToggleVoice,
    Listening { active: bool },
    /// Speech recognition failed in the browser (`not-allowed`, `network`, ...).
    RecognitionError { code: String },
    /// Startup announcement.
    Ready,
}

fn preview(content: &str) -> String {
    let head: String = content.chars().take(30).collect();
    format!("{}...", head)
}

/// Reply for a utilities-panel result.
pub fn utility_reply(action: &UtilityAction, now: &DateTime<Local>) -> Reply {
    match action {
        UtilityAction::TimeCheck => {
            let time = format_time(now);
            Reply::new(format!("The current time is {}.", time), "Time check completed").with_details(time)
        }
        UtilityAction::DateCheck => {
            let date = format_date(now);
            Reply::new(format!("Today is {}.", date), "Date check completed").with_details(date)
        }
        UtilityAction::WeatherCheck { report } => Reply::new(
            format!(
                "The weather is {} and {}.",
                report.temperature,
                report.condition.to_lowercase()
            ),
            "Weather check completed",
        )
        .with_details(format!("{} {}", report.temperature, report.condition)),
        UtilityAction::LocationCheck { latitude, longitude } => {
            let coords = format!("{:.4}, {:.4}", latitude, longitude);
            Reply::new(
                format!("Your location coordinates are {}.", coords),
                "Location retrieved",
            )
            .with_details(coords)
        }
        UtilityAction::LocationError { message } => Reply::new(
            format!("Unable to get location: {}", message),
            "Location error",
        )
        .with_details(message.clone()),
        UtilityAction::NoteSaved { content } => Reply::new(
            format!("Note saved successfully: \"{}\"", content),
            "Note saved",
        )
        .with_details(preview(content)),
        UtilityAction::NoteDeleted { .. } => Reply::new("Note deleted successfully.", "Note deleted"),
        UtilityAction::Calculation { input, result } => Reply::new(
            format!("{} equals {}.", input, result),
            "Calculation completed",
        )
        .with_details(format!("{} = {}", input, result)),
        UtilityAction::CalculationError { input } => Reply::new(
            format!("Invalid calculation: {}", input),
            "Calculation error",
        )
        .with_details(input.clone()),
        UtilityAction::AppLaunched { app } => {
            Reply::new(format!("Opening {} app.", app), format!("{} app launched", app))
        }
        UtilityAction::Unknown => Reply::new("Utility action completed.", "Utility action completed"),
    }
}

pub fn message_prepared_reply(platform: Platform, _message: &str) -> Reply {
    Reply::new(
        format!(
            "Message prepared for {}! The app should open automatically.",
            platform.display_name()
        ),
        format!("{} message prepared", platform.display_name()),
    )
    .with_details("App should open automatically")
}

pub fn phone_control_reply(action: &str, enabled: bool) -> Reply {
    let mut chars = action.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    Reply::new(
        format!("{} control executed successfully.", capitalized),
        format!("{} control executed", action),
    )
    .with_details(if enabled { "Enabled" } else { "Disabled" })
}

pub fn recognition_error_reply(code: &str) -> Reply {
    let text = match code {
        "not-allowed" => "Microphone access denied. Please allow microphone permissions and try again.",
        "network" => "Network error. Speech recognition requires internet connection.",
        _ => "Speech recognition temporarily unavailable. You can still use text commands.",
    };
    Reply::new(text, "Voice recognition failed").with_details(code.to_string())
}
