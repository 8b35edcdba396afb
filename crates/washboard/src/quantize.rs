use crate::note::Note;

/// Snap note onsets and offsets onto a `1/ticks_per_beat`-of-a-beat grid.
///
/// Timing noise from human performance fragments otherwise-identical
/// rhythmic patterns; snapping collapses them back onto the grid. Ties
/// round half away from zero (`f64::round`). A note whose quantized end
/// lands at or before its start is kept as-is: zero-length notes are valid
/// degenerate output and contribute no activation downstream.
pub fn quantize_notes(mut notes: Vec<Note>, ticks_per_beat: u32, tempo_bpm: f64) -> Vec<Note> {
    let seconds_per_beat = 60.0 / tempo_bpm;
    for note in &mut notes {
        note.start = snap_to_grid(note.start, ticks_per_beat, seconds_per_beat);
        note.end = snap_to_grid(note.end, ticks_per_beat, seconds_per_beat);
    }
    notes
}

fn snap_to_grid(time: f64, ticks_per_beat: u32, seconds_per_beat: f64) -> f64 {
    let ticks = (time / seconds_per_beat * ticks_per_beat as f64).round();
    ticks / ticks_per_beat as f64 * seconds_per_beat
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn note(start: f64, end: f64) -> Note {
        Note {
            pitch: 60,
            velocity: 0.5,
            start,
            end,
            track: 0,
        }
    }

    #[test]
    fn snaps_to_nearest_sixteenth() {
        // 120 bpm, sixteenth grid: tick = 0.125s
        let notes = quantize_notes(vec![note(0.13, 0.49)], 4, 120.0);
        assert!((notes[0].start - 0.125).abs() < 1e-9);
        assert!((notes[0].end - 0.5).abs() < 1e-9);
    }

    #[test]
    fn grid_times_are_fixed_points() {
        let notes = quantize_notes(vec![note(0.0, 0.5)], 4, 120.0);
        assert_eq!(notes[0].start, 0.0);
        assert_eq!(notes[0].end, 0.5);
    }

    #[test]
    fn quantized_times_lie_on_grid() {
        let inputs = vec![note(0.07, 0.21), note(1.33, 2.816), note(0.0601, 0.0602)];
        let ticks_per_beat = 4u32;
        let tempo = 97.0;
        let seconds_per_beat = 60.0 / tempo;

        for n in quantize_notes(inputs, ticks_per_beat, tempo) {
            for time in [n.start, n.end] {
                let ticks = time / seconds_per_beat * ticks_per_beat as f64;
                assert!(
                    (ticks - ticks.round()).abs() < 1e-9,
                    "{time} is not on the grid"
                );
            }
        }
    }

    #[test]
    fn collapsed_note_retained() {
        // Both ends round to the same grid point; note survives with
        // zero duration
        let notes = quantize_notes(vec![note(0.0601, 0.0602)], 4, 120.0);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].start, notes[0].end);
    }

    #[test]
    fn ties_round_half_away_from_zero() {
        // 0.0625s is exactly half a tick at 120 bpm / sixteenth grid
        let notes = quantize_notes(vec![note(0.0625, 0.5)], 4, 120.0);
        assert!((notes[0].start - 0.125).abs() < 1e-9);
    }
}
