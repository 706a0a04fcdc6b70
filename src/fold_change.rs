use crate::math::log2_fold_change;
use crate::record::{LoopRecord, ScoredLoop};

/// Attaches a pseudocount-stabilized log2 fold change to every loop.
///
/// Pure, field-wise and order-preserving; applied identically to the sample
/// and random sets.
pub fn score_loops(loops: Vec<LoopRecord>) -> Vec<ScoredLoop> {
    loops
        .into_iter()
        .map(|record| {
            let logfc = log2_fold_change(record.strength_control, record.strength_mutant);
            ScoredLoop::new(record, logfc)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::record::RawLoop;

    fn record(loop_id: &str, control: f64, mutant: f64) -> LoopRecord {
        LoopRecord::from(RawLoop {
            chr_a: "chr1".to_string(),
            start_a: 1_000_000,
            end_a: 1_005_000,
            chr_b: "chr1".to_string(),
            start_b: 2_500_000,
            end_b: 2_505_000,
            loop_id: loop_id.to_string(),
            strength_control: control,
            strength_mutant: mutant,
        })
    }

    #[test]
    fn test_scoring_preserves_order() {
        let scored = score_loops(vec![
            record("a", 10.0, 10.0),
            record("b", 3.0, 7.0),
            record("c", 7.0, 3.0),
        ]);
        let ids: Vec<&str> = scored.iter().map(|l| l.record.loop_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(scored[0].logfc, 0.0);
        assert_relative_eq!(scored[1].logfc, 1.0);
        assert_relative_eq!(scored[2].logfc, -1.0);
    }

    #[test]
    fn test_empty_set_scores_to_empty() {
        assert!(score_loops(Vec::new()).is_empty());
    }
}
