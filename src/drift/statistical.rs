//! Statistical helper functions for drift detection.

use std::cmp::Ordering;

/// Two-sample Kolmogorov-Smirnov statistic.
///
/// Largest absolute gap between the two empirical CDFs. Tied values are
/// consumed together on both sides before the gap is measured, so equal
/// samples give exactly 0.
pub fn ks_statistic<T, F>(reference: &[T], current: &[T], cmp: F) -> f64
where
    F: Fn(&T, &T) -> Ordering,
{
    if reference.is_empty() || current.is_empty() {
        return 0.0;
    }

    let mut sorted_reference: Vec<&T> = reference.iter().collect();
    let mut sorted_current: Vec<&T> = current.iter().collect();
    sorted_reference.sort_by(|a, b| cmp(a, b));
    sorted_current.sort_by(|a, b| cmp(a, b));

    let n1 = sorted_reference.len() as f64;
    let n2 = sorted_current.len() as f64;

    let mut d_max = 0.0f64;
    let mut i = 0usize;
    let mut j = 0usize;

    while i < sorted_reference.len() && j < sorted_current.len() {
        let next = if cmp(sorted_reference[i], sorted_current[j]) == Ordering::Greater {
            sorted_current[j]
        } else {
            sorted_reference[i]
        };
        while i < sorted_reference.len() && cmp(sorted_reference[i], next) == Ordering::Equal {
            i += 1;
        }
        while j < sorted_current.len() && cmp(sorted_current[j], next) == Ordering::Equal {
            j += 1;
        }

        let diff = (i as f64 / n1 - j as f64 / n2).abs();
        d_max = d_max.max(diff);
    }

    d_max
}

/// Survival function of the Kolmogorov distribution, `P(K > lambda)`.
pub fn ks_p_value(lambda: f64) -> f64 {
    if lambda <= 0.0 {
        return 1.0;
    }

    if lambda < 1.18 {
        // Small-lambda form: P(K <= λ) = √(2π)/λ · Σ exp(-(2k-1)²π²/(8λ²))
        let y = (-std::f64::consts::PI.powi(2) / (8.0 * lambda.powi(2))).exp();
        let cdf = (2.0 * std::f64::consts::PI).sqrt() / lambda
            * (y + y.powi(9) + y.powi(25) + y.powi(49));
        return (1.0 - cdf).clamp(0.0, 1.0);
    }

    // Asymptotic approximation: P(D > d) ≈ 2 * sum_{k=1}^∞ (-1)^{k+1} * exp(-2 * k^2 * λ^2)
    let mut p = 0.0;
    for k in 1..=100 {
        let sign = if k % 2 == 1 { 1.0 } else { -1.0 };
        let term = sign * (-2.0 * f64::from(k).powi(2) * lambda.powi(2)).exp();
        p += term;
        if term.abs() < 1e-10 {
            break;
        }
    }
    (2.0 * p).clamp(0.0, 1.0)
}

/// Two-sided p-value for a KS statistic `d` from samples of size `n1` and `n2`.
///
/// Uses the effective sample size `n1·n2/(n1+n2)` with Stephens' correction.
pub fn ks_two_sample_p_value(d: f64, n1: usize, n2: usize) -> f64 {
    if n1 == 0 || n2 == 0 {
        return 1.0;
    }
    let n_eff = (n1 as f64 * n2 as f64) / (n1 + n2) as f64;
    let root = n_eff.sqrt();
    ks_p_value((root + 0.12 + 0.11 / root) * d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn by_value(a: &f64, b: &f64) -> Ordering {
        a.total_cmp(b)
    }

    #[test]
    fn test_ks_statistic_identical_samples() {
        let a = [1.0, 2.0, 2.0, 3.0];
        assert_abs_diff_eq!(ks_statistic(&a, &a, by_value), 0.0);
    }

    #[test]
    fn test_ks_statistic_disjoint_samples() {
        let a = [1.0, 2.0, 3.0];
        let b = [10.0, 11.0];
        assert_abs_diff_eq!(ks_statistic(&a, &b, by_value), 1.0);
    }

    #[test]
    fn test_ks_statistic_ties_across_samples() {
        // CDFs agree at every distinct value except 1.0 (0.5 vs 0.25)
        let a = [1.0, 1.0, 2.0, 2.0];
        let b = [1.0, 2.0, 2.0, 2.0];
        assert_abs_diff_eq!(ks_statistic(&a, &b, by_value), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_ks_statistic_text_order() {
        let a = ["a", "a", "b"];
        let b = ["b", "c"];
        // After "a": 2/3 vs 0; after "b": 1 vs 1/2; after "c": 1 vs 1
        assert_abs_diff_eq!(ks_statistic(&a, &b, |x, y| x.cmp(y)), 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ks_p_value_bounds() {
        assert_eq!(ks_p_value(0.0), 1.0);
        assert_eq!(ks_p_value(-1.0), 1.0);
        assert!(ks_p_value(0.1) > 0.999);
        assert!(ks_p_value(5.0) < 1e-10);
    }

    #[test]
    fn test_ks_p_value_known_points() {
        // Kolmogorov survival function reference values
        assert_abs_diff_eq!(ks_p_value(0.5), 0.9639, epsilon = 1e-3);
        assert_abs_diff_eq!(ks_p_value(1.0), 0.2700, epsilon = 1e-3);
        assert_abs_diff_eq!(ks_p_value(1.36), 0.0494, epsilon = 1e-3);
    }

    #[test]
    fn test_ks_p_value_continuous_at_branch() {
        assert_abs_diff_eq!(ks_p_value(1.18 - 1e-9), ks_p_value(1.18), epsilon = 1e-6);
    }

    #[test]
    fn test_ks_p_value_monotone() {
        let mut prev = 1.0;
        for i in 1..300 {
            let p = ks_p_value(f64::from(i) * 0.01);
            assert!(p <= prev + 1e-12, "not monotone at {i}");
            prev = p;
        }
    }

    #[test]
    fn test_two_sample_p_value_shrinks_with_size() {
        let small = ks_two_sample_p_value(0.3, 10, 10);
        let large = ks_two_sample_p_value(0.3, 500, 500);
        assert!(large < small);
        assert_eq!(ks_two_sample_p_value(0.3, 0, 10), 1.0);
    }
}
