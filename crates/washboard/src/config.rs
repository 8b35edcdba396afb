use serde::{Deserialize, Serialize};

/// Pipeline configuration.
///
/// Defaults match the common case: the piano's playable pitch range,
/// a sixteenth-note quantization grid, and a 50 column/second roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    /// Lowest pitch kept after clamping (A0 on a piano).
    pub pitch_lower: u8,
    /// Highest pitch kept after clamping (C8 on a piano).
    pub pitch_upper: u8,
    /// Rescale velocity from [0, 127] to [0, 1].
    pub normalize_velocity: bool,
    /// Grid subdivisions per beat; 4 = sixteenth-note grid.
    pub ticks_per_beat: u32,
    /// Piano-roll sampling rate in columns per second.
    pub fs: f64,
    /// Activation above this counts as a sounding pitch.
    pub threshold: f32,
    /// Pitch sets larger than this are classified by their lowest pitches.
    pub max_notes: usize,
    /// Bound on the chord-label cache.
    pub cache_capacity: usize,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            pitch_lower: 21,
            pitch_upper: 108,
            normalize_velocity: true,
            ticks_per_beat: 4,
            fs: 50.0,
            threshold: 0.0,
            max_notes: 6,
            cache_capacity: 5000,
        }
    }
}
