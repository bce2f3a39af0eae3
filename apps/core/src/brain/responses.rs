//! Response composition.
//!
//! Turns a classified [`Command`] into the text shown (and spoken) to the
//! user plus the confirmation entry the branch records. Locale-dependent
//! phrases live in [`ResponseBook`]; guidance texts are English only.

use chrono::{DateTime, Local};
use serde::Serialize;

use super::intent::{Command, DeviceAction, NoteRequest, Toggle, VolumeChange};
use crate::models::{Locale, Platform};

/// Fixed-format local time, e.g. `3:07:09 PM`.
pub fn format_time(now: &DateTime<Local>) -> String {
    now.format("%-I:%M:%S %p").to_string()
}

/// Fixed-format local date, e.g. `10/17/2026`.
pub fn format_date(now: &DateTime<Local>) -> String {
    now.format("%-m/%-d/%Y").to_string()
}

/// Bilingual phrase dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseBook {
    locale: Locale,
}

impl ResponseBook {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn greeting(&self) -> &'static str {
        match self.locale {
            Locale::En => "Hello! I'm J.A.R.V.I.S, your personal AI assistant. How can I help you today?",
            Locale::Hi => "Namaste! Main J.A.R.V.I.S hun, aapka personal AI assistant. Kaise madad kar sakta hun?",
        }
    }

    pub fn time(&self, time: &str) -> String {
        match self.locale {
            Locale::En => format!("The current time is {}", time),
            Locale::Hi => format!("Abhi ka samay hai {}", time),
        }
    }

    pub fn date(&self, date: &str) -> String {
        match self.locale {
            Locale::En => format!("Today is {}", date),
            Locale::Hi => format!("Aaj ki date hai {}", date),
        }
    }

    pub fn weather(&self) -> &'static str {
        match self.locale {
            Locale::En => "The weather is 22 degrees Celsius and partly cloudy. Check the utilities panel for more details.",
            Locale::Hi => "Mausam 22 degree Celsius hai aur thoda cloudy hai. Details ke liye utilities panel check kariye.",
        }
    }

    pub fn code_generated(&self) -> &'static str {
        match self.locale {
            Locale::En => "Code generated successfully! Check the preview below.",
            Locale::Hi => "Code successfully generate ho gaya! Neeche preview dekh sakte hain.",
        }
    }

    pub fn app_launched(&self, app: &str) -> String {
        match self.locale {
            Locale::En => format!("Opening {} app for you.", app),
            Locale::Hi => format!("{} app open kar raha hun aapke liye.", app),
        }
    }

    pub fn listening(&self) -> &'static str {
        match self.locale {
            Locale::En => "I'm listening. How can I assist you?",
            Locale::Hi => "Main sun raha hun. Kya madad chahiye?",
        }
    }

    pub fn ready(&self) -> &'static str {
        match self.locale {
            Locale::En => "J.A.R.V.I.S is ready to assist you.",
            Locale::Hi => "J.A.R.V.I.S ready hai aapki madad ke liye.",
        }
    }
}

pub const CODE_GENERATION_ERROR: &str = "There was an error generating the code. Please try again.";
pub const VOICE_UNAVAILABLE_SUFFIX: &str = " (Voice output not available in this environment)";

/// Response text plus the confirmation the branch records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    pub action: String,
    pub details: Option<String>,
}

impl Reply {
    pub fn new(text: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: action.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Composes the reply for a command. For code generation this is the
/// success reply; the dispatcher replaces it when the call fails.
pub fn compose(command: &Command, book: &ResponseBook, now: &DateTime<Local>) -> Reply {
    match command {
        Command::Greeting => Reply::new(book.greeting(), "Greeting processed"),
        Command::LaunchApp { app: Some(app) } => Reply::new(
            book.app_launched(app),
            format!("{} app launch initiated", app),
        ),
        Command::LaunchApp { app: None } => Reply::new(
            "Which app would you like me to open?",
            "App launch guidance provided",
        ),
        Command::GenerateCode { request } if request.is_empty() => Reply::new(
            "What type of code would you like me to generate?",
            "Code generation guidance provided",
        ),
        Command::GenerateCode { request } => {
            Reply::new(book.code_generated(), "Code generation completed").with_details(request.clone())
        }
        Command::SwitchLanguage { target: Some(Locale::Hi) } => {
            Reply::new("भाषा हिंदी में बदल दी गई है।", "Language changed to Hindi")
        }
        Command::SwitchLanguage { target: Some(Locale::En) } => {
            Reply::new("Language changed to English.", "Language changed to English")
        }
        Command::SwitchLanguage { target: None } => Reply::new(
            "I can speak English or Hindi. Say \"change language to Hindi\" or \"change language to English\".",
            "Language guidance provided",
        ),
        Command::Time => {
            let time = format_time(now);
            Reply::new(book.time(&time), "Time retrieved").with_details(time)
        }
        Command::Date => {
            let date = format_date(now);
            Reply::new(book.date(&date), "Date retrieved").with_details(date)
        }
        Command::Weather => Reply::new(book.weather(), "Weather information provided"),
        Command::Notes { request: NoteRequest::Save } => Reply::new(
            "I can help you save notes! Use the utilities panel below to add your note.",
            "Note saving guidance provided",
        ),
        Command::Notes { request: NoteRequest::Browse } => Reply::new(
            "Your notes are available in the utilities panel. You can add, view, and delete notes there.",
            "Note access guidance provided",
        ),
        Command::Calculate => Reply::new(
            "I can help you with calculations! Use the calculator in the utilities panel or tell me what to calculate.",
            "Calculator guidance provided",
        ),
        Command::Location => Reply::new(
            "I can get your current location! Check the utilities panel and click on the location button.",
            "Location service guidance provided",
        ),
        Command::Message { platform } => compose_messaging(*platform),
        Command::Device { action } => compose_device(*action),
        Command::Echo { text } => Reply::new(
            format!(
                "I heard you say: {}. I'm processing your request and learning to handle more commands.",
                text
            ),
            "General command processed",
        )
        .with_details(text.clone()),
    }
}

fn compose_messaging(platform: Option<Platform>) -> Reply {
    match platform {
        Some(Platform::WhatsApp) => Reply::new(
            "I can help you send a WhatsApp message! Use the messaging center below to compose your message.",
            "WhatsApp messaging guidance provided",
        ),
        Some(Platform::Telegram) => Reply::new(
            "I can help you send a Telegram message! Use the messaging center below to compose your message.",
            "Telegram messaging guidance provided",
        ),
        Some(Platform::Email) => Reply::new(
            "I can help you send an email! Use the messaging center below to compose your message.",
            "Email messaging guidance provided",
        ),
        None => Reply::new(
            "I can help you compose messages for WhatsApp, Telegram, or Email. Check the messaging center below!",
            "Messaging guidance provided",
        ),
    }
}

fn compose_device(action: DeviceAction) -> Reply {
    match action {
        DeviceAction::Wifi(Toggle::On) => Reply::new(
            "Enabling Wi-Fi through phone controls.",
            "Wi-Fi enable command processed",
        ),
        DeviceAction::Wifi(Toggle::Off) => Reply::new(
            "Disabling Wi-Fi through phone controls.",
            "Wi-Fi disable command processed",
        ),
        DeviceAction::Wifi(Toggle::Unspecified) => Reply::new(
            "Wi-Fi control is available in the phone controls section below.",
            "Wi-Fi control guidance provided",
        ),
        DeviceAction::Torch(Toggle::On) => Reply::new(
            "Turning on the torch through phone controls.",
            "Torch enable command processed",
        ),
        DeviceAction::Torch(Toggle::Off) => Reply::new(
            "Turning off the torch through phone controls.",
            "Torch disable command processed",
        ),
        DeviceAction::Torch(Toggle::Unspecified) => Reply::new(
            "Torch control is available in the phone controls section below.",
            "Torch control guidance provided",
        ),
        DeviceAction::Volume(VolumeChange::Up) => Reply::new(
            "Increasing volume through phone controls.",
            "Volume increase command processed",
        ),
        DeviceAction::Volume(VolumeChange::Down) => Reply::new(
            "Decreasing volume through phone controls.",
            "Volume decrease command processed",
        ),
        DeviceAction::Volume(VolumeChange::Unspecified) => Reply::new(
            "Volume control is available in the phone controls section below.",
            "Volume control guidance provided",
        ),
        DeviceAction::Brightness => Reply::new(
            "Brightness control is available in the phone controls section below.",
            "Brightness control guidance provided",
        ),
        DeviceAction::Vibrate => Reply::new(
            "Triggering vibration through phone controls.",
            "Vibration command processed",
        ),
        DeviceAction::Battery => Reply::new(
            "Battery status is displayed in the phone controls section below.",
            "Battery status guidance provided",
        ),
    }
}
