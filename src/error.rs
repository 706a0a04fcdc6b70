use std::path::PathBuf;

use thiserror::Error;

/// Fatal failure modes of a pipeline run.
///
/// Degenerate statistical situations (empty null distribution, empty sample
/// set) are deliberately absent: those produce well-defined undefined/empty
/// outputs instead of aborting the run.
#[derive(Error, Debug)]
pub enum LoopDiffError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unable to read {path}: {source}")]
    InputIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed loop table {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("unable to write {path}: {detail}")]
    OutputIo { path: PathBuf, detail: String },
}

pub type Result<T> = std::result::Result<T, LoopDiffError>;
