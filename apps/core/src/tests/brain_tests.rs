//! Brain Module Tests
//!
//! Priority order of the classifier, literal substring matching and the
//! composed replies of every branch.

use crate::brain::responses::{compose, format_date, format_time};
use crate::brain::{
    contains_wake_word, Command, DeviceAction, Intent, IntentClassifier, NoteRequest, ResponseBook, Toggle,
    VolumeChange,
};
use crate::models::{Locale, Platform};
use chrono::{DateTime, Local, TimeZone};

fn afternoon() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 10, 17, 15, 7, 9).unwrap()
}

mod intent_classifier_tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let classifier = IntentClassifier::new();

        let cases = [
            ("namaste jarvis", Intent::Greeting, Some("namaste")),
            ("kholo camera", Intent::AppLaunch, Some("kholo")),
            ("write code for a timer", Intent::CodeGeneration, Some("code")),
            ("bhasha badlo", Intent::LanguageSwitch, Some("bhasha")),
            ("what time is it", Intent::Time, Some("time")),
            ("today's date", Intent::Date, Some("date")),
            ("weather today", Intent::Weather, Some("weather")),
            ("remember to buy milk", Intent::Notes, Some("remember")),
            ("do some math", Intent::Calculation, Some("math")),
            ("where am i", Intent::Location, Some("where am i")),
            ("send a telegram", Intent::Messaging, Some("telegram")),
            ("battery status", Intent::DeviceControl, Some("battery")),
            ("sing a song", Intent::Fallback, None),
        ];

        for (command, intent, keyword) in cases {
            let (detected, matched) = classifier.detect(command);
            assert_eq!(detected, intent, "wrong intent for '{}'", command);
            assert_eq!(matched, keyword, "wrong keyword for '{}'", command);
        }
    }

    #[test]
    fn test_first_rule_wins_over_later_ones() {
        let classifier = IntentClassifier::new();

        assert_eq!(classifier.detect("launch clock at dinner time").0, Intent::AppLaunch);
        assert_eq!(classifier.detect("code to format a date").0, Intent::CodeGeneration);
        assert_eq!(classifier.detect("note the weather").0, Intent::Weather);
    }

    #[test]
    fn test_substring_semantics_are_literal() {
        let classifier = IntentClassifier::new();

        // "hi" inside "this" and "which"
        assert_eq!(classifier.detect("is this working").0, Intent::Greeting);
        assert_eq!(classifier.detect("which way").0, Intent::Greeting);
        // "open" inside "reopen", "code" inside "decode"
        assert_eq!(classifier.detect("reopen it").0, Intent::AppLaunch);
        assert_eq!(classifier.detect("decode base64").0, Intent::CodeGeneration);
    }

    #[test]
    fn test_matching_ignores_case() {
        let result = IntentClassifier::new().classify("WHAT TIME IS IT");
        assert_eq!(result.intent, Intent::Time);
        assert_eq!(result.matched_keyword.as_deref(), Some("time"));
    }

    #[test]
    fn test_parameters_are_extracted() {
        let classifier = IntentClassifier::new();

        assert_eq!(
            classifier.classify("open the gallery").command,
            Command::LaunchApp {
                app: Some("Gallery".to_string())
            }
        );
        assert_eq!(
            classifier.classify("language अंग्रेजी").command,
            Command::SwitchLanguage {
                target: Some(Locale::En)
            }
        );
        assert_eq!(
            classifier.classify("add a note").command,
            Command::Notes {
                request: NoteRequest::Save
            }
        );
        assert_eq!(
            classifier.classify("read my notes").command,
            Command::Notes {
                request: NoteRequest::Browse
            }
        );
        assert_eq!(
            classifier.classify("send whatsapp message").command,
            Command::Message {
                platform: Some(Platform::WhatsApp)
            }
        );
        assert_eq!(
            classifier.classify("volume down").command,
            Command::Device {
                action: DeviceAction::Volume(VolumeChange::Down)
            }
        );
        assert_eq!(
            classifier.classify("disable wifi").command,
            Command::Device {
                action: DeviceAction::Wifi(Toggle::Off)
            }
        );
    }

    #[test]
    fn test_on_inside_words_turns_devices_on() {
        // "on" is found inside "connection" before "off" is checked.
        let result = IntentClassifier::new().classify("wifi connection off");
        assert_eq!(
            result.command,
            Command::Device {
                action: DeviceAction::Wifi(Toggle::On)
            }
        );
    }

    #[test]
    fn test_flashlight_needs_torch_keyword() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.detect("flashlight on").0, Intent::Fallback);
        assert_eq!(
            classifier.classify("torch flashlight off").command,
            Command::Device {
                action: DeviceAction::Torch(Toggle::Off)
            }
        );
    }
}

mod response_tests {
    use super::*;

    #[test]
    fn test_time_and_date_formats() {
        assert_eq!(format_time(&afternoon()), "3:07:09 PM");
        assert_eq!(format_date(&afternoon()), "10/17/2026");
    }

    #[test]
    fn test_time_reply_per_locale() {
        let en = compose(&Command::Time, &ResponseBook::new(Locale::En), &afternoon());
        assert_eq!(en.text, "The current time is 3:07:09 PM");
        assert_eq!(en.action, "Time retrieved");

        let hi = compose(&Command::Date, &ResponseBook::new(Locale::Hi), &afternoon());
        assert_eq!(hi.text, "Aaj ki date hai 10/17/2026");
    }

    #[test]
    fn test_app_launch_reply_per_locale() {
        let command = Command::LaunchApp {
            app: Some("Maps".to_string()),
        };
        let hi = compose(&command, &ResponseBook::new(Locale::Hi), &afternoon());
        assert_eq!(hi.text, "Maps app open kar raha hun aapke liye.");
        assert_eq!(hi.action, "Maps app launch initiated");
    }

    #[test]
    fn test_guidance_branches() {
        let book = ResponseBook::new(Locale::En);

        let reply = compose(&Command::Calculate, &book, &afternoon());
        assert_eq!(reply.action, "Calculator guidance provided");

        let reply = compose(&Command::Location, &book, &afternoon());
        assert_eq!(reply.action, "Location service guidance provided");

        let reply = compose(&Command::Message { platform: None }, &book, &afternoon());
        assert_eq!(reply.action, "Messaging guidance provided");

        let reply = compose(&Command::SwitchLanguage { target: None }, &book, &afternoon());
        assert_eq!(reply.action, "Language guidance provided");
    }

    #[test]
    fn test_every_device_action_has_a_reply() {
        let book = ResponseBook::new(Locale::En);
        let actions = [
            DeviceAction::Wifi(Toggle::Unspecified),
            DeviceAction::Torch(Toggle::On),
            DeviceAction::Volume(VolumeChange::Up),
            DeviceAction::Brightness,
            DeviceAction::Vibrate,
            DeviceAction::Battery,
        ];
        for action in actions {
            let reply = compose(&Command::Device { action }, &book, &afternoon());
            assert!(!reply.text.is_empty());
            assert!(!reply.action.is_empty());
        }
    }

    #[test]
    fn test_wake_word() {
        assert!(contains_wake_word("Hey JARVIS, wake up"));
        assert!(contains_wake_word("सुनो जार्विस"));
        assert!(!contains_wake_word("hey siri"));
    }
}
