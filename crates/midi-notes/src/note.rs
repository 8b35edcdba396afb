use serde::{Deserialize, Serialize};

/// A single MIDI note with wall-clock timing and source track.
///
/// Times are in seconds, converted through the file's tempo map at
/// extraction time. Velocity is the raw MIDI value [0, 127].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub pitch: u8,
    pub velocity: u8,
    pub start: f64,
    pub end: f64,
    pub track: usize,
}

impl Note {
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}
