//! # Brain Module
//!
//! Fast, non-LLM command understanding for J.A.R.V.I.S.
//!
//! ## Components
//! - `intent`: ordered keyword classifier producing a [`Command`]
//! - `apps`: app catalogue and spoken app-name extraction
//! - `responses`: bilingual response composer
//! - `wake_word`: wake-word spotting on interim transcripts

pub mod apps;
pub mod intent;
pub mod responses;
pub mod wake_word;

pub use apps::{extract_app_name, find_app, AppEntry, RecentApps, APP_CATALOGUE};
pub use intent::{Command, DeviceAction, Intent, IntentClassifier, IntentResult, NoteRequest, Toggle, VolumeChange};
pub use responses::{compose, Reply, ResponseBook};
pub use wake_word::contains_wake_word;
