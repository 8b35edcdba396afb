use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chord_name::{ChordNamer, TemplateNamer};
use tracing::trace;

use crate::Result;

/// Label for an empty pitch set. The namer is never consulted for it.
pub const NO_CHORD: &str = "No Chord";

/// Label when the namer produces no name for a non-empty set.
pub const UNKNOWN_CHORD: &str = "Unknown Chord";

struct CacheEntry {
    label: String,
    last_access: u64,
}

struct CacheInner {
    entries: HashMap<Vec<u8>, CacheEntry>,
    capacity: usize,
    access_counter: u64,
}

impl CacheInner {
    fn evict_lru(&mut self) {
        if let Some(oldest) = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(key, _)| key.clone())
        {
            self.entries.remove(&oldest);
        }
    }
}

/// Memoizing chord labeler.
///
/// Chord classification is expensive and identical pitch sets recur across
/// a piece and across a dataset, so results are cached in a bounded map
/// with least-recently-used eviction. The cache key is the full
/// untruncated pitch tuple; truncation to `max_notes` happens inside the
/// cached computation. One labeler is shared across all files of a batch
/// run; the mutex makes that safe without changing observable output.
pub struct ChordLabeler {
    namer: Arc<dyn ChordNamer>,
    max_notes: usize,
    cache: Mutex<CacheInner>,
}

impl ChordLabeler {
    pub fn new(namer: Arc<dyn ChordNamer>, max_notes: usize, cache_capacity: usize) -> Self {
        Self {
            namer,
            max_notes,
            cache: Mutex::new(CacheInner {
                entries: HashMap::new(),
                capacity: cache_capacity.max(1),
                access_counter: 0,
            }),
        }
    }

    /// Labeler with the default template namer.
    pub fn with_template_namer(max_notes: usize, cache_capacity: usize) -> Self {
        Self::new(Arc::new(TemplateNamer::new()), max_notes, cache_capacity)
    }

    /// Label an ascending, deduplicated pitch tuple.
    ///
    /// Namer failures propagate; "no name found" does not (it maps to
    /// [`UNKNOWN_CHORD`]).
    pub fn label(&self, pitches: &[u8]) -> Result<String> {
        if pitches.is_empty() {
            return Ok(NO_CHORD.to_string());
        }

        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.access_counter += 1;
        let access = cache.access_counter;

        if let Some(entry) = cache.entries.get_mut(pitches) {
            entry.last_access = access;
            trace!(pitches = ?pitches, "chord label cache hit");
            return Ok(entry.label.clone());
        }

        let label = self.classify(pitches)?;

        while cache.entries.len() >= cache.capacity {
            cache.evict_lru();
        }
        cache.entries.insert(
            pitches.to_vec(),
            CacheEntry {
                label: label.clone(),
                last_access: access,
            },
        );

        Ok(label)
    }

    /// Number of cached labels, for capacity checks.
    pub fn cache_size(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .len()
    }

    fn classify(&self, pitches: &[u8]) -> Result<String> {
        // Dense clusters are classified by their lowest pitches only
        let name = if pitches.len() > self.max_notes {
            let mut lowest = pitches.to_vec();
            lowest.sort_unstable();
            lowest.truncate(self.max_notes);
            self.namer.name_chord(&lowest)?
        } else {
            self.namer.name_chord(pitches)?
        };

        Ok(match name {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_CHORD.to_string(),
        })
    }
}
