//! MIDI dataset preprocessing.
//!
//! Converts raw MIDI performances into a normalized, quantized, chorded
//! representation for machine-learning consumption. The pipeline flows
//! strictly downstream:
//!
//! ```text
//! raw notes → normalized notes → quantized notes → piano roll
//!           → per-column pitch sets → chord labels → file result
//! ```
//!
//! Parsing lives in the `midi-notes` crate, chord naming in `chord-name`;
//! this crate owns everything in between plus the per-file orchestration.

pub mod config;
pub mod labeler;
pub mod normalize;
pub mod note;
pub mod pipeline;
pub mod quantize;
pub mod roll;
pub mod simultaneous;

pub use config::PrepConfig;
pub use labeler::{ChordLabeler, NO_CHORD, UNKNOWN_CHORD};
pub use normalize::{normalize_pitch, normalize_velocity};
pub use note::Note;
pub use pipeline::{FileResult, Preprocessor};
pub use quantize::quantize_notes;
pub use roll::{PianoRoll, PITCH_BINS};
pub use simultaneous::pitch_sets;

/// Errors from preprocessing operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] midi_notes::Error),

    /// No tracks (or no notes) to rasterize. Callers skip such files.
    #[error("no notes to rasterize")]
    EmptyInput,

    /// The chord namer itself failed on a valid pitch set. Never silently
    /// replaced with a default label.
    #[error("chord naming failed: {0}")]
    ChordNaming(#[from] chord_name::NameError),
}

pub type Result<T> = std::result::Result<T, Error>;
