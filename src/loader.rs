use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{LoopDiffError, Result};
use crate::record::{LoopRecord, LoopSets, RawLoop};

/// Minimum genomic span (bp) a loop must cover to enter the analysis.
pub const MIN_LOOP_SPAN: i64 = 1_000_000;

/// Loads both loop tables and applies the span filter to each.
pub fn load_loop_sets(sample_path: &Path, random_path: &Path) -> Result<LoopSets> {
    let sample = load_filtered(sample_path)?;
    let random = load_filtered(random_path)?;
    Ok(LoopSets::new(sample, random))
}

/// Reads one headerless, tab-delimited, nine-column loop table and drops
/// every loop spanning less than [`MIN_LOOP_SPAN`].
///
/// A table that ends up empty after filtering is not an error; downstream
/// stages handle zero-row sets.
pub fn load_filtered(path: &Path) -> Result<Vec<LoopRecord>> {
    let file = File::open(path).map_err(|source| LoopDiffError::InputIo {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_reader(file);

    let mut loops = Vec::new();
    for row in reader.deserialize::<RawLoop>() {
        let raw = row.map_err(|source| LoopDiffError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let record = LoopRecord::from(raw);
        if record.loop_size >= MIN_LOOP_SPAN {
            loops.push(record);
        }
    }
    Ok(loops)
}
