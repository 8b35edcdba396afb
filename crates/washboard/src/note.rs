use serde::{Deserialize, Serialize};

/// A note flowing through the preprocessing stages.
///
/// Ownership of the note collection passes linearly through
/// Normalizer → Quantizer → Rasterizer; no stage keeps the
/// pre-quantization times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub pitch: u8,
    /// Raw MIDI velocity [0, 127] on entry; [0, 1] after normalization.
    pub velocity: f32,
    /// Seconds.
    pub start: f64,
    /// Seconds.
    pub end: f64,
    pub track: usize,
}

impl From<&midi_notes::Note> for Note {
    fn from(n: &midi_notes::Note) -> Self {
        Self {
            pitch: n.pitch,
            velocity: n.velocity as f32,
            start: n.start,
            end: n.end,
            track: n.track,
        }
    }
}
