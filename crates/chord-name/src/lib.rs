pub mod namer;
pub mod templates;

pub use namer::{ChordNamer, TemplateNamer};
pub use templates::{best_match, note_name, ChordTemplate, TEMPLATES};

/// Errors from chord naming operations.
#[derive(Debug, thiserror::Error)]
pub enum NameError {
    #[error("pitch {0} outside MIDI range 0-127")]
    PitchOutOfRange(u8),
}

pub type Result<T> = std::result::Result<T, NameError>;
