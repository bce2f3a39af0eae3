pub mod assistant;
pub mod confirmation;
pub mod messages;
pub mod speech;
pub mod traits;

pub use assistant::{AssistantHandle, AssistantOptions};
pub use confirmation::{ConfirmationHandle, ConfirmationSettings};
pub use messages::{ActorError, DispatchOutcome};
pub use speech::{HttpSpeech, ShellSpeech, SilentSpeech};
pub use traits::{CodeGenerator, SpeechSynthesizer, VoiceSettings};
