//! Panel utilities: calculator, notes, messaging links and the events the
//! panels report back to the assistant.

pub mod actions;
pub mod calculator;
pub mod messaging;
pub mod notes;

pub use actions::{HostEvent, UtilityAction, WeatherReport};
pub use notes::{Note, NoteBook};
