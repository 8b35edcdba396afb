use serde::{Deserialize, Serialize};

/// Tempo assumed before the first tempo event, per the SMF spec.
pub const DEFAULT_BPM: f64 = 120.0;

const DEFAULT_USEC_PER_BEAT: u32 = 500_000;

/// A tempo change at an absolute tick position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempoChange {
    pub tick: u64,
    /// Seconds from the start of the file.
    pub time: f64,
    pub microseconds_per_beat: u32,
    pub bpm: f64,
}

/// Ordered tempo changes for one file, with tick-to-seconds conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempoMap {
    changes: Vec<TempoChange>,
    ppq: u16,
}

impl TempoMap {
    /// Build from `(tick, microseconds_per_beat)` pairs collected across all
    /// tracks. Duplicates (format-1 files repeat tempo events per track) are
    /// removed; the result is sorted by tick.
    pub fn new(mut raw: Vec<(u64, u32)>, ppq: u16) -> Self {
        raw.sort_by_key(|&(tick, _)| tick);
        raw.dedup();

        let mut changes = Vec::with_capacity(raw.len());
        let mut seconds = 0.0;
        let mut last_tick = 0u64;
        let mut usec = DEFAULT_USEC_PER_BEAT;

        for (tick, microseconds_per_beat) in raw {
            seconds += tick_span_seconds(tick - last_tick, usec, ppq);
            changes.push(TempoChange {
                tick,
                time: seconds,
                microseconds_per_beat,
                bpm: 60_000_000.0 / microseconds_per_beat as f64,
            });
            last_tick = tick;
            usec = microseconds_per_beat;
        }

        Self { changes, ppq }
    }

    pub fn changes(&self) -> &[TempoChange] {
        &self.changes
    }

    pub fn ppq(&self) -> u16 {
        self.ppq
    }

    /// The first tempo of the file, or 120 bpm when no tempo event exists.
    pub fn first_bpm(&self) -> f64 {
        self.changes.first().map(|c| c.bpm).unwrap_or(DEFAULT_BPM)
    }

    /// Convert an absolute tick to seconds, honoring every tempo segment
    /// up to that tick.
    pub fn tick_to_seconds(&self, tick: u64) -> f64 {
        let mut seconds = 0.0;
        let mut last_tick = 0u64;
        let mut usec = DEFAULT_USEC_PER_BEAT;

        for change in &self.changes {
            if change.tick >= tick {
                break;
            }
            seconds += tick_span_seconds(change.tick - last_tick, usec, self.ppq);
            last_tick = change.tick;
            usec = change.microseconds_per_beat;
        }

        seconds + tick_span_seconds(tick - last_tick, usec, self.ppq)
    }
}

fn tick_span_seconds(ticks: u64, usec_per_beat: u32, ppq: u16) -> f64 {
    ticks as f64 * usec_per_beat as f64 / (ppq as f64 * 1_000_000.0)
}
