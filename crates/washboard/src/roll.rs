use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::note::Note;
use crate::{Error, Result};

/// One row per MIDI pitch.
pub const PITCH_BINS: usize = 128;

/// Dense time×pitch activation grid.
///
/// 128 pitch rows by `time_steps` columns, row-major in a flat buffer.
/// Cells hold non-negative activation magnitudes (normalized velocity).
/// Built fresh per file; not mutated after the merge step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PianoRoll {
    data: Vec<f32>,
    time_steps: usize,
}

impl PianoRoll {
    pub fn zeros(time_steps: usize) -> Self {
        Self {
            data: vec![0.0; PITCH_BINS * time_steps],
            time_steps,
        }
    }

    pub fn time_steps(&self) -> usize {
        self.time_steps
    }

    pub fn rows(&self) -> usize {
        PITCH_BINS
    }

    pub fn get(&self, pitch: usize, t: usize) -> f32 {
        self.data[pitch * self.time_steps + t]
    }

    fn accumulate_max(&mut self, pitch: usize, t: usize, value: f32) {
        let cell = &mut self.data[pitch * self.time_steps + t];
        *cell = cell.max(value);
    }

    /// Rasterize one track's notes at `fs` columns per second.
    ///
    /// A note activates columns `[floor(start*fs), floor(end*fs))` at its
    /// velocity magnitude, keeping the maximum where notes overlap on the
    /// same pitch. Zero-length notes activate nothing.
    pub fn from_notes(notes: &[&Note], fs: f64) -> Self {
        let time_steps = notes
            .iter()
            .map(|n| (n.end * fs).ceil() as usize)
            .max()
            .unwrap_or(0);

        let mut roll = Self::zeros(time_steps);
        for note in notes {
            let start_col = (note.start * fs).floor() as usize;
            let end_col = (note.end * fs).floor() as usize;
            for t in start_col..end_col {
                roll.accumulate_max(note.pitch as usize, t, note.velocity);
            }
        }
        roll
    }

    /// Merge per-track rolls into one canonical grid.
    ///
    /// Two passes: find the longest roll, then right-pad every shorter roll
    /// with zero columns (never truncate, never pad on the left) and take
    /// the element-wise maximum per cell. Simultaneous notes across tracks
    /// at the same pitch record presence, not a sum.
    pub fn merge(rolls: Vec<PianoRoll>) -> Result<PianoRoll> {
        let max_time_steps = rolls
            .iter()
            .map(|r| r.time_steps)
            .max()
            .ok_or(Error::EmptyInput)?;

        let mut merged = PianoRoll::zeros(max_time_steps);
        for roll in &rolls {
            for pitch in 0..PITCH_BINS {
                for t in 0..roll.time_steps {
                    merged.accumulate_max(pitch, t, roll.get(pitch, t));
                }
            }
        }
        Ok(merged)
    }
}

/// Rasterize notes grouped by track and merge into one roll.
///
/// Fails with [`Error::EmptyInput`] when there are no notes at all: a
/// grid cannot be sized from zero tracks. Callers skip empty files
/// upstream.
pub fn rasterize(notes: &[Note], fs: f64) -> Result<PianoRoll> {
    let mut by_track: BTreeMap<usize, Vec<&Note>> = BTreeMap::new();
    for note in notes {
        by_track.entry(note.track).or_default().push(note);
    }

    let rolls: Vec<PianoRoll> = by_track
        .values()
        .map(|track_notes| PianoRoll::from_notes(track_notes, fs))
        .collect();

    PianoRoll::merge(rolls)
}
