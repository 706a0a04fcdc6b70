use bon::Builder;
use derive_new::new;
use serde::Deserialize;

/// One called chromatin interaction exactly as it appears in the input
/// table: two anchors, an identifier, and a strength measurement per
/// condition. Column order is fixed and the tables carry no header.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLoop {
    pub chr_a: String,
    pub start_a: i64,
    pub end_a: i64,
    pub chr_b: String,
    pub start_b: i64,
    pub end_b: i64,
    pub loop_id: String,
    pub strength_control: f64,
    pub strength_mutant: f64,
}

/// A loop with its derived genomic span attached.
#[derive(Debug, Clone)]
pub struct LoopRecord {
    pub chr_a: String,
    pub start_a: i64,
    pub end_a: i64,
    pub chr_b: String,
    pub start_b: i64,
    pub end_b: i64,
    pub loop_id: String,
    pub strength_control: f64,
    pub strength_mutant: f64,
    /// `start_b - start_a`; negative when the anchors arrive inverted.
    /// Inverted loops are not corrected, they simply fail the span filter.
    pub loop_size: i64,
}

impl From<RawLoop> for LoopRecord {
    fn from(raw: RawLoop) -> Self {
        let loop_size = raw.start_b - raw.start_a;
        Self {
            chr_a: raw.chr_a,
            start_a: raw.start_a,
            end_a: raw.end_a,
            chr_b: raw.chr_b,
            start_b: raw.start_b,
            end_b: raw.end_b,
            loop_id: raw.loop_id,
            strength_control: raw.strength_control,
            strength_mutant: raw.strength_mutant,
            loop_size,
        }
    }
}

/// A loop enriched with its log2 fold change.
#[derive(Debug, Clone, new)]
pub struct ScoredLoop {
    pub record: LoopRecord,
    pub logfc: f64,
}

/// A sample loop after significance testing.
///
/// `pval` and `padj` are `None` when the null distribution was empty; `None`
/// is the explicit "undefined" marker, never a numeric stand-in.
#[derive(Debug, Clone, Builder)]
pub struct TestedLoop {
    pub record: LoopRecord,
    pub logfc: f64,
    pub pval: Option<f64>,
    pub padj: Option<f64>,
}

/// The two loop sets of one run. The sample set is the subject of inference;
/// the random set only ever feeds the null distribution. They are never
/// merged.
#[derive(Debug, new)]
pub struct LoopSets {
    pub sample: Vec<LoopRecord>,
    pub random: Vec<LoopRecord>,
}
