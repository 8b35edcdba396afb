use std::collections::HashMap;

use midly::{MetaMessage, MidiMessage, Smf, TrackEventKind};
use serde::{Deserialize, Serialize};

use crate::note::Note;
use crate::tempo::TempoMap;
use crate::{Error, Result};

/// Parsed MIDI file: notes in seconds, grouped by track index, plus the
/// tempo map used for the conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MidiFile {
    /// All notes across all tracks, sorted by start time then pitch.
    pub notes: Vec<Note>,
    pub tempo_map: TempoMap,
    pub ppq: u16,
    pub track_count: usize,
}

impl MidiFile {
    /// Notes belonging to one track, in file order.
    pub fn track_notes(&self, track: usize) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(move |n| n.track == track)
    }
}

struct TickNote {
    onset_tick: u64,
    offset_tick: u64,
    pitch: u8,
    velocity: u8,
    track: usize,
}

/// Parse raw SMF bytes into timed notes, pairing note-on/note-off events.
///
/// A note-on with velocity 0 counts as a note-off. Notes still sounding at
/// the end of their track are closed at the track's final tick. Tick times
/// are converted to seconds through the full tempo map.
pub fn parse(bytes: &[u8]) -> Result<MidiFile> {
    let smf = Smf::parse(bytes).map_err(|e| Error::MidiParse(e.to_string()))?;

    let ppq = match smf.header.timing {
        midly::Timing::Metrical(ticks) => ticks.as_int(),
        midly::Timing::Timecode(_, _) => 480,
    };

    let mut tick_notes = Vec::new();
    let mut tempo_events: Vec<(u64, u32)> = Vec::new();

    for (track, events) in smf.tracks.iter().enumerate() {
        let mut current_tick: u64 = 0;
        // (channel, pitch) → stack of (onset_tick, velocity) for overlapping
        // same-pitch notes
        let mut pending: HashMap<(u8, u8), Vec<(u64, u8)>> = HashMap::new();

        for event in events {
            current_tick += event.delta.as_int() as u64;

            match event.kind {
                TrackEventKind::Meta(MetaMessage::Tempo(tempo)) => {
                    tempo_events.push((current_tick, tempo.as_int()));
                }
                TrackEventKind::Midi { channel, message } => {
                    let ch = channel.as_int();
                    match message {
                        MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => {
                            pending
                                .entry((ch, key.as_int()))
                                .or_default()
                                .push((current_tick, vel.as_int()));
                        }
                        MidiMessage::NoteOff { key, .. } | MidiMessage::NoteOn { key, .. } => {
                            if let Some(stack) = pending.get_mut(&(ch, key.as_int())) {
                                if let Some((onset, velocity)) = stack.pop() {
                                    tick_notes.push(TickNote {
                                        onset_tick: onset,
                                        offset_tick: current_tick,
                                        pitch: key.as_int(),
                                        velocity,
                                        track,
                                    });
                                }
                            }
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // Close unclosed notes at the track's final tick
        for ((_, pitch), stack) in &pending {
            for &(onset, velocity) in stack {
                tick_notes.push(TickNote {
                    onset_tick: onset,
                    offset_tick: current_tick,
                    pitch: *pitch,
                    velocity,
                    track,
                });
            }
        }
    }

    let tempo_map = TempoMap::new(tempo_events, ppq);

    let mut notes: Vec<Note> = tick_notes
        .into_iter()
        .map(|n| Note {
            pitch: n.pitch,
            velocity: n.velocity,
            start: tempo_map.tick_to_seconds(n.onset_tick),
            end: tempo_map.tick_to_seconds(n.offset_tick),
            track: n.track,
        })
        .collect();

    notes.sort_by(|a, b| a.start.total_cmp(&b.start).then(a.pitch.cmp(&b.pitch)));

    Ok(MidiFile {
        notes,
        tempo_map,
        ppq,
        track_count: smf.tracks.len(),
    })
}
