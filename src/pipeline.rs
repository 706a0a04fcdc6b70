use std::path::PathBuf;

use crate::config::RunConfig;
use crate::error::Result;
use crate::fold_change::score_loops;
use crate::loader::{load_loop_sets, MIN_LOOP_SPAN};
use crate::report::write_report;
use crate::tester::{null_vector, test_sample};

/// Paths and counts from one finished run.
#[derive(Debug)]
pub struct RunSummary {
    pub table_path: PathBuf,
    pub plot_path: PathBuf,
    pub tested_loops: usize,
    pub null_size: usize,
}

/// Runs the whole pipeline for one configuration.
///
/// The four stages execute strictly in sequence, each consuming the previous
/// stage's output:
/// 1. Load and span-filter the sample and random loop tables
/// 2. Attach log2 fold changes to both sets
/// 3. Test each sample loop against the random set's fold-change null and
///    apply Benjamini-Hochberg correction
/// 4. Write the results table and the volcano plot
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let sets = load_loop_sets(&config.sample_loops_path, &config.random_loops_path)?;
    log::info!(
        "loaded {} sample and {} random loops past the {} bp span floor",
        sets.sample.len(),
        sets.random.len(),
        MIN_LOOP_SPAN
    );

    let sample = score_loops(sets.sample);
    let random = score_loops(sets.random);

    let null = null_vector(&random);
    let tested = test_sample(sample, &null);
    log::info!(
        "tested {} loops against a null of {} fold changes",
        tested.len(),
        null.len()
    );

    let (table_path, plot_path) =
        write_report(&tested, &config.output_directory, config.decimal_separator)?;
    Ok(RunSummary {
        table_path,
        plot_path,
        tested_loops: tested.len(),
        null_size: null.len(),
    })
}
