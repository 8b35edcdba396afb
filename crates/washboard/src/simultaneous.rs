use crate::roll::{PianoRoll, PITCH_BINS};

/// Pitches sounding at column `t`: rows whose activation exceeds
/// `threshold`, in ascending pitch order.
pub fn active_pitches(roll: &PianoRoll, t: usize, threshold: f32) -> Vec<u8> {
    (0..PITCH_BINS)
        .filter(|&pitch| roll.get(pitch, t) > threshold)
        .map(|pitch| pitch as u8)
        .collect()
}

/// One pitch set per time column, length `roll.time_steps()`.
///
/// Purely a function of the roll; ascending order within each set is the
/// canonical form for chord lookup.
pub fn pitch_sets(roll: &PianoRoll, threshold: f32) -> Vec<Vec<u8>> {
    (0..roll.time_steps())
        .map(|t| active_pitches(roll, t, threshold))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Note;
    use crate::roll::rasterize;
    use pretty_assertions::assert_eq;

    fn note(pitch: u8, velocity: f32, start: f64, end: f64) -> Note {
        Note {
            pitch,
            velocity,
            start,
            end,
            track: 0,
        }
    }

    #[test]
    fn sets_are_ascending() {
        let notes = vec![
            note(67, 0.5, 0.0, 0.1),
            note(60, 0.5, 0.0, 0.1),
            note(64, 0.5, 0.0, 0.1),
        ];
        let roll = rasterize(&notes, 50.0).unwrap();
        assert_eq!(active_pitches(&roll, 0, 0.0), vec![60, 64, 67]);
    }

    #[test]
    fn one_set_per_column() {
        let notes = vec![note(60, 0.5, 0.0, 0.3)];
        let roll = rasterize(&notes, 50.0).unwrap();
        let sets = pitch_sets(&roll, 0.0);
        assert_eq!(sets.len(), roll.time_steps());
    }

    #[test]
    fn threshold_filters_quiet_cells() {
        let notes = vec![note(60, 0.2, 0.0, 0.1), note(64, 0.9, 0.0, 0.1)];
        let roll = rasterize(&notes, 50.0).unwrap();
        assert_eq!(active_pitches(&roll, 0, 0.5), vec![64]);
    }

    #[test]
    fn silent_column_is_empty() {
        // Note ends at 0.1s; columns past it are silent
        let notes = vec![note(60, 0.5, 0.0, 0.1), note(62, 0.5, 0.3, 0.4)];
        let roll = rasterize(&notes, 50.0).unwrap();
        assert_eq!(active_pitches(&roll, 10, 0.0), Vec::<u8>::new());
    }
}
