use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;
use walkdir::WalkDir;
use washboard::Preprocessor;

use crate::summary::FileSummary;

/// Recursively collect `.mid`/`.midi` files under `root`, sorted for
/// deterministic batch order.
pub fn discover(root: &Path, max_files: Option<usize>) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_midi = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("mid") || ext.eq_ignore_ascii_case("midi"));
        if is_midi {
            paths.push(entry.into_path());
        }
    }

    paths.sort();
    if let Some(max) = max_files {
        paths.truncate(max);
    }
    Ok(paths)
}

/// Sequentially preprocess every discovered file.
///
/// Unparseable or empty files are reported and skipped; the batch always
/// runs to the end. Returns one summary per successfully processed file.
pub fn run_batch(
    preprocessor: &Preprocessor,
    root: &Path,
    max_files: Option<usize>,
) -> Result<Vec<FileSummary>> {
    let paths = discover(root, max_files)?;
    let mut summaries = Vec::new();

    for (index, path) in paths.iter().enumerate() {
        println!("[{}/{}] {}", index + 1, paths.len(), path.display());

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable file, skipping");
                continue;
            }
        };

        match preprocessor.process(&bytes) {
            Ok(result) => {
                summaries.push(FileSummary::new(summaries.len(), path, &result));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "preprocessing failed, skipping");
            }
        }
    }

    println!(
        "Processed {} of {} files successfully.",
        summaries.len(),
        paths.len()
    );
    Ok(summaries)
}
