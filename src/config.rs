use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bon::Builder;

use crate::error::{LoopDiffError, Result};

/// Decimal separator for float columns in the results table.
///
/// The original tool wrote comma decimals; that remains the default and can
/// be switched to a period with the `decimal_separator` config key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecimalSeparator {
    #[default]
    Comma,
    Period,
}

/// Everything one run needs, resolved before any processing starts.
///
/// Parsed from a key=value text file via [`RunConfig::from_file`], or built
/// programmatically with [`RunConfig::builder`].
#[derive(Debug, Clone, Builder)]
pub struct RunConfig {
    pub sample_loops_path: PathBuf,
    pub random_loops_path: PathBuf,
    pub output_directory: PathBuf,
    #[builder(default)]
    pub decimal_separator: DecimalSeparator,
}

impl RunConfig {
    /// Reads a key=value configuration file, one pair per line. Blank lines
    /// and `#` comments are skipped. Missing any required key is fatal.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| LoopDiffError::InputIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_key_values(&text)
    }

    fn from_key_values(text: &str) -> Result<Self> {
        let mut entries = HashMap::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| {
                LoopDiffError::Config(format!(
                    "line {}: expected key=value, got {line:?}",
                    lineno + 1
                ))
            })?;
            entries.insert(key.trim().to_string(), value.trim().to_string());
        }

        let required = |key: &str| {
            entries
                .get(key)
                .cloned()
                .ok_or_else(|| LoopDiffError::Config(format!("missing required key {key:?}")))
        };
        let decimal_separator = match entries.get("decimal_separator").map(String::as_str) {
            None => DecimalSeparator::default(),
            Some("comma") => DecimalSeparator::Comma,
            Some("period") => DecimalSeparator::Period,
            Some(other) => {
                return Err(LoopDiffError::Config(format!(
                    "decimal_separator must be \"comma\" or \"period\", got {other:?}"
                )))
            }
        };

        Ok(Self {
            sample_loops_path: required("sample_loops_path")?.into(),
            random_loops_path: required("random_loops_path")?.into(),
            output_directory: required("output_directory")?.into(),
            decimal_separator,
        })
    }
}
