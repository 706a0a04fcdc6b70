use adjustp::{adjust, Procedure};

use crate::math::empirical_pvalue;
use crate::record::{ScoredLoop, TestedLoop};

/// The null distribution: every fold change of the filtered random set, in
/// arrival order. Only magnitudes matter downstream, so no sorting or
/// deduplication happens here.
pub fn null_vector(random: &[ScoredLoop]) -> Vec<f64> {
    random.iter().map(|l| l.logfc).collect()
}

/// Tests every sample loop against the null distribution and applies
/// Benjamini-Hochberg correction across all of them.
///
/// Each loop's p-value depends only on its own fold change and the shared
/// null vector. Output order matches input order. An empty null leaves every
/// `pval`/`padj` undefined rather than substituting a numeric fallback; an
/// empty sample set yields an empty result.
pub fn test_sample(sample: Vec<ScoredLoop>, null: &[f64]) -> Vec<TestedLoop> {
    if null.is_empty() {
        log::warn!(
            "null distribution is empty; p-values are undefined for all {} sample loops",
            sample.len()
        );
        return sample
            .into_iter()
            .map(|l| {
                TestedLoop::builder()
                    .record(l.record)
                    .logfc(l.logfc)
                    .build()
            })
            .collect();
    }

    let pvalues: Vec<f64> = sample
        .iter()
        .map(|l| empirical_pvalue(l.logfc, null))
        .collect();
    let padjs = adjust(&pvalues, Procedure::BenjaminiHochberg);

    sample
        .into_iter()
        .zip(pvalues)
        .zip(padjs)
        .map(|((l, pval), padj)| {
            TestedLoop::builder()
                .record(l.record)
                .logfc(l.logfc)
                .pval(pval)
                .padj(padj)
                .build()
        })
        .collect()
}
