pub mod extract;
pub mod note;
pub mod tempo;

pub use extract::{parse, MidiFile};
pub use note::Note;
pub use tempo::{TempoChange, TempoMap, DEFAULT_BPM};

/// Errors from MIDI parsing operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("MIDI parse error: {0}")]
    MidiParse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
