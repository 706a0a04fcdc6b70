//! loopdiff: differential chromatin loop strength testing
//!
//! This library scores chromatin interaction loops (Hi-C style) for
//! differential strength between two conditions by comparing an observed
//! sample set against a randomized null set:
//!
//! 1. Load both loop tables and drop loops spanning less than 1 Mb
//! 2. Compute a pseudocount-stabilized log2 fold change per loop
//! 3. Compute a two-sided empirical p-value per sample loop against the
//!    null fold-change distribution, then Benjamini-Hochberg correct
//! 4. Write a delimited results table and a volcano plot
//!
//! The main entry points are:
//! - [`RunConfig`]: run configuration, parsed from a key=value file
//! - [`run`]: executes the four stages for one configuration
//! - [`TestedLoop`]: one sample loop with its test results attached

mod config;
mod error;
mod fold_change;
mod loader;
mod math;
mod pipeline;
mod record;
mod report;
mod tester;

pub use config::{DecimalSeparator, RunConfig};
pub use error::{LoopDiffError, Result};
pub use fold_change::score_loops;
pub use loader::{load_filtered, load_loop_sets, MIN_LOOP_SPAN};
pub use pipeline::{run, RunSummary};
pub use record::{LoopRecord, LoopSets, RawLoop, ScoredLoop, TestedLoop};
pub use report::{write_report, PLOT_FILENAME, SIGNIFICANCE_THRESHOLD, TABLE_FILENAME};
pub use tester::{null_vector, test_sample};
