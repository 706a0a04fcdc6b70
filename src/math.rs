/// Log2 ratio of mutant to control strength with an additive pseudocount of 1
/// on both terms, so zero strengths stay finite. Negative strengths are not
/// range-checked and propagate NaN if they drive the argument negative.
pub fn log2_fold_change(control: f64, mutant: f64) -> f64 {
    ((mutant + 1.0) / (control + 1.0)).log2()
}

/// Proportion of null observations at least as extreme (in magnitude) as `x`.
///
/// Two-sided and magnitude-based; ties count as extreme (`>=`). The caller
/// guarantees a non-empty null vector.
pub fn empirical_pvalue(x: f64, null: &[f64]) -> f64 {
    let hits = null.iter().filter(|v| v.abs() >= x.abs()).count();
    hits as f64 / null.len() as f64
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_equal_strengths_give_zero() {
        assert_eq!(log2_fold_change(7.0, 7.0), 0.0);
        assert_eq!(log2_fold_change(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_pseudocount_keeps_zero_strength_finite() {
        assert_relative_eq!(log2_fold_change(0.0, 1.0), 1.0);
        assert_relative_eq!(log2_fold_change(1.0, 0.0), -1.0);
    }

    #[test]
    fn test_logfc_monotone_in_mutant_strength() {
        let mut previous = f64::NEG_INFINITY;
        for mutant in 0..100 {
            let logfc = log2_fold_change(10.0, mutant as f64);
            assert!(logfc >= previous);
            previous = logfc;
        }
    }

    #[test]
    fn test_empirical_pvalue_concrete() {
        let null = vec![0.1, -0.2, 0.3, -0.1];
        assert_relative_eq!(empirical_pvalue(0.25, &null), 0.25);
    }

    #[test]
    fn test_zero_fold_change_gives_one() {
        let null = vec![0.1, -0.2, 0.3, -0.1];
        assert_relative_eq!(empirical_pvalue(0.0, &null), 1.0);
    }

    #[test]
    fn test_ties_count_as_extreme() {
        let null = vec![0.25, -0.25, 0.5, 0.1];
        assert_relative_eq!(empirical_pvalue(0.25, &null), 0.75);
    }

    #[test]
    fn test_pvalue_bounds() {
        let null = vec![0.4, -1.2, 0.05, 0.0, 2.5];
        for x in [-3.0, -0.5, 0.0, 0.1, 1.0, 10.0] {
            let pval = empirical_pvalue(x, &null);
            assert!((0.0..=1.0).contains(&pval));
        }
    }
}
