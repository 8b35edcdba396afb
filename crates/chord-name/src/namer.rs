use crate::templates::{best_match, note_name};
use crate::{NameError, Result};

/// Chord naming backend.
///
/// Maps an ascending set of MIDI pitches to a display name. `Ok(None)`
/// means the namer has no name for the set, which is a valid empty
/// result, not a failure.
pub trait ChordNamer: Send + Sync {
    fn name_chord(&self, pitches: &[u8]) -> Result<Option<String>>;
}

/// Interval-template namer.
///
/// Reduces pitches to pitch classes, matches against the template table
/// with the lowest sounding pitch as root hint, and renders names like
/// "C major" or "G dominant seventh". A single pitch is named as the bare
/// note ("C", "F#").
#[derive(Debug, Clone, Default)]
pub struct TemplateNamer {
    /// Spell roots with flats ("Db") instead of sharps ("C#").
    pub use_flats: bool,
}

impl TemplateNamer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChordNamer for TemplateNamer {
    fn name_chord(&self, pitches: &[u8]) -> Result<Option<String>> {
        if let Some(&bad) = pitches.iter().find(|&&p| p > 127) {
            return Err(NameError::PitchOutOfRange(bad));
        }
        if pitches.is_empty() {
            return Ok(None);
        }

        let bass = pitches.iter().min().map(|&p| p % 12);

        let mut pitch_classes: Vec<u8> = Vec::with_capacity(pitches.len());
        for &pitch in pitches {
            let pc = pitch % 12;
            if !pitch_classes.contains(&pc) {
                pitch_classes.push(pc);
            }
        }

        if pitch_classes.len() == 1 {
            return Ok(Some(note_name(pitch_classes[0], self.use_flats).to_string()));
        }

        Ok(best_match(&pitch_classes, bass)
            .map(|(root, quality, _)| format!("{} {}", note_name(root, self.use_flats), quality)))
    }
}
