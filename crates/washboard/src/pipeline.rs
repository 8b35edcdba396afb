use std::sync::Arc;

use chord_name::ChordNamer;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PrepConfig;
use crate::labeler::ChordLabeler;
use crate::normalize::{normalize_pitch, normalize_velocity};
use crate::note::Note;
use crate::quantize::quantize_notes;
use crate::roll::{rasterize, PianoRoll};
use crate::simultaneous::pitch_sets;
use crate::{Error, Result};

/// Output of one pipeline run, consumed by the summary writer and
/// then discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileResult {
    pub notes: Vec<Note>,
    pub piano_roll: PianoRoll,
    /// One label per time column of the roll.
    pub chord_labels: Vec<String>,
}

/// Per-file pipeline orchestrator.
///
/// Owns the configuration and the shared chord-label cache. Each
/// [`process`](Preprocessor::process) call is independent; the cache is
/// the only state carried across files, and it never changes output
/// values, only latency.
pub struct Preprocessor {
    config: PrepConfig,
    labeler: ChordLabeler,
}

impl Preprocessor {
    /// Preprocessor with the default template namer.
    pub fn new(config: PrepConfig) -> Self {
        let labeler = ChordLabeler::with_template_namer(config.max_notes, config.cache_capacity);
        Self { config, labeler }
    }

    /// Preprocessor with a custom chord namer (for testing or a future
    /// learned backend).
    pub fn with_namer(config: PrepConfig, namer: Arc<dyn ChordNamer>) -> Self {
        let labeler = ChordLabeler::new(namer, config.max_notes, config.cache_capacity);
        Self { config, labeler }
    }

    pub fn config(&self) -> &PrepConfig {
        &self.config
    }

    /// Run the full pipeline on raw SMF bytes.
    ///
    /// parse → normalize → quantize → rasterize → extract simultaneous
    /// pitch sets → label chords. Quantization tempo is the file's first
    /// tempo event (120 bpm when absent); mid-file tempo changes are
    /// deliberately ignored here.
    pub fn process(&self, midi_bytes: &[u8]) -> Result<FileResult> {
        let midi = midi_notes::parse(midi_bytes)?;
        if midi.notes.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut notes: Vec<Note> = midi.notes.iter().map(Note::from).collect();
        notes.sort_by(|a, b| a.start.total_cmp(&b.start));

        let notes = normalize_pitch(notes, self.config.pitch_lower, self.config.pitch_upper);
        let notes = if self.config.normalize_velocity {
            normalize_velocity(notes)
        } else {
            notes
        };

        let tempo = midi.tempo_map.first_bpm();
        let notes = quantize_notes(notes, self.config.ticks_per_beat, tempo);

        let piano_roll = rasterize(&notes, self.config.fs)?;
        let sets = pitch_sets(&piano_roll, self.config.threshold);

        let mut chord_labels = Vec::with_capacity(sets.len());
        for set in &sets {
            chord_labels.push(self.labeler.label(set)?);
        }

        debug!(
            notes = notes.len(),
            columns = piano_roll.time_steps(),
            tempo,
            "preprocessed MIDI file"
        );

        Ok(FileResult {
            notes,
            piano_roll,
            chord_labels,
        })
    }
}
