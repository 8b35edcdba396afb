/// A chord template: display quality + interval set from the root,
/// stored as a bitmask over the 12 pitch classes.
pub struct ChordTemplate {
    pub quality: &'static str,
    pub intervals: u16,
    pub size: usize,
}

impl ChordTemplate {
    const fn new(quality: &'static str, intervals: &[u8]) -> Self {
        let mut mask = 0u16;
        let mut i = 0;
        while i < intervals.len() {
            mask |= 1 << intervals[i];
            i += 1;
        }
        Self {
            quality,
            intervals: mask,
            size: intervals.len(),
        }
    }
}

/// All recognized templates, larger chords first so a full seventh beats
/// its embedded triad on score ties.
pub static TEMPLATES: &[ChordTemplate] = &[
    ChordTemplate::new("dominant seventh", &[0, 4, 7, 10]),
    ChordTemplate::new("major seventh", &[0, 4, 7, 11]),
    ChordTemplate::new("minor seventh", &[0, 3, 7, 10]),
    ChordTemplate::new("minor-major seventh", &[0, 3, 7, 11]),
    ChordTemplate::new("diminished seventh", &[0, 3, 6, 9]),
    ChordTemplate::new("half-diminished seventh", &[0, 3, 6, 10]),
    ChordTemplate::new("major sixth", &[0, 4, 7, 9]),
    ChordTemplate::new("minor sixth", &[0, 3, 7, 9]),
    ChordTemplate::new("added ninth", &[0, 2, 4, 7]),
    // Triads
    ChordTemplate::new("major", &[0, 4, 7]),
    ChordTemplate::new("minor", &[0, 3, 7]),
    ChordTemplate::new("diminished", &[0, 3, 6]),
    ChordTemplate::new("augmented", &[0, 4, 8]),
    ChordTemplate::new("suspended fourth", &[0, 5, 7]),
    ChordTemplate::new("suspended second", &[0, 2, 7]),
    // Dyad
    ChordTemplate::new("power chord", &[0, 7]),
];

const NOTE_NAMES_SHARP: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const NOTE_NAMES_FLAT: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

pub fn note_name(pitch_class: u8, use_flats: bool) -> &'static str {
    let idx = (pitch_class % 12) as usize;
    if use_flats {
        NOTE_NAMES_FLAT[idx]
    } else {
        NOTE_NAMES_SHARP[idx]
    }
}

fn to_interval_mask(pitch_classes: &[u8], root: u8) -> u16 {
    let mut mask = 0u16;
    for &pc in pitch_classes {
        let interval = (pc + 12 - root) % 12;
        mask |= 1 << interval;
    }
    mask
}

fn popcount(x: u16) -> usize {
    x.count_ones() as usize
}

/// Match a set of pitch classes against the template table.
///
/// Tries all 12 roots, scores each template by coverage, penalizes
/// non-chord tones, and biases toward `bass_hint` as the root. Returns
/// `(root_pc, quality, score)` or `None` when nothing scores above the
/// acceptance threshold.
pub fn best_match(pitch_classes: &[u8], bass_hint: Option<u8>) -> Option<(u8, &'static str, f64)> {
    if pitch_classes.len() < 2 {
        return None;
    }

    let mut best: Option<(u8, &'static str, f64)> = None;

    for root in 0..12u8 {
        let intervals = to_interval_mask(pitch_classes, root);

        for template in TEMPLATES {
            let matched = popcount(intervals & template.intervals);
            if matched < template.size.min(2) {
                continue;
            }

            let extra = popcount(intervals & !template.intervals);
            let mut score = matched as f64 / template.size as f64 - extra as f64 * 0.1;

            if let Some(bass) = bass_hint {
                if bass % 12 == root {
                    score += 0.15;
                }
            }

            if intervals & template.intervals == template.intervals {
                score += 0.1;
            }

            if best.map_or(true, |(_, _, s)| score > s) {
                best = Some((root, template.quality, score));
            }
        }
    }

    best.filter(|&(_, _, score)| score > 0.4)
        .map(|(root, quality, score)| (root, quality, score.min(1.0)))
}
