use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use washboard::FileResult;

/// Per-file entry in the JSON report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub file_index: usize,
    pub path: String,
    pub note_count: usize,
    pub piano_roll_rows: usize,
    pub piano_roll_columns: usize,
    pub chord_label_count: usize,
    pub chord_labels: Vec<String>,
}

impl FileSummary {
    pub fn new(file_index: usize, path: &Path, result: &FileResult) -> Self {
        Self {
            file_index,
            path: path.display().to_string(),
            note_count: result.notes.len(),
            piano_roll_rows: result.piano_roll.rows(),
            piano_roll_columns: result.piano_roll.time_steps(),
            chord_label_count: result.chord_labels.len(),
            chord_labels: result.chord_labels.clone(),
        }
    }
}

/// Write the batch summary as pretty-printed JSON, overwriting `path`.
pub fn write_summary(summaries: &[FileSummary], path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), summaries)
        .context("serializing summary")?;
    Ok(())
}
