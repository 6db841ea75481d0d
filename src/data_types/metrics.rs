
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::data_types::variant_key::VariantSet;

/// Agreement statistics for one truth/prediction pair of variant sets.
/// All ratios are defined as 0.0 when their denominator is 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct MetricsResult {
    /// Variants in both truth and prediction
    true_positive_count: u64,
    /// Variants in prediction but not in truth
    false_positive_count: u64,
    /// Variants in truth but not in prediction
    false_negative_count: u64,
    /// TP / (TP + FP)
    precision: f64,
    /// TP / (TP + FN)
    recall: f64,
    /// Harmonic mean of precision and recall
    f1: f64
}

impl MetricsResult {
    /// Builds the result from raw counts, deriving precision, recall, and F1.
    /// # Arguments
    /// * `true_positive_count` - shared variants
    /// * `false_positive_count` - prediction-only variants
    /// * `false_negative_count` - truth-only variants
    pub fn from_counts(true_positive_count: u64, false_positive_count: u64, false_negative_count: u64) -> Self {
        let precision = safe_ratio(true_positive_count as f64, (true_positive_count + false_positive_count) as f64);
        let recall = safe_ratio(true_positive_count as f64, (true_positive_count + false_negative_count) as f64);
        let f1 = safe_ratio(2.0 * precision * recall, precision + recall);
        Self {
            true_positive_count,
            false_positive_count,
            false_negative_count,
            precision,
            recall,
            f1
        }
    }

    // getters
    pub fn true_positive_count(&self) -> u64 {
        self.true_positive_count
    }

    pub fn false_positive_count(&self) -> u64 {
        self.false_positive_count
    }

    pub fn false_negative_count(&self) -> u64 {
        self.false_negative_count
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    pub fn recall(&self) -> f64 {
        self.recall
    }

    pub fn f1(&self) -> f64 {
        self.f1
    }
}

fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Compares a prediction set against a truth set.
/// # Arguments
/// * `truth` - the expected variants
/// * `pred` - the variants produced by the pipeline
pub fn compute(truth: &VariantSet, pred: &VariantSet) -> MetricsResult {
    let tp = truth.intersection(pred).count() as u64;
    let fp = pred.difference(truth).count() as u64;
    let fn_ = truth.difference(pred).count() as u64;
    MetricsResult::from_counts(tp, fp, fn_)
}

/// Runs `compute` separately for every chromosome found in either set.
/// Results are ordered by chromosome name; a chromosome missing from one side is compared against an empty set.
/// # Arguments
/// * `truth` - the expected variants
/// * `pred` - the variants produced by the pipeline
pub fn compute_per_chromosome(truth: &VariantSet, pred: &VariantSet) -> Vec<(String, MetricsResult)> {
    let truth_lookup = partition_by_chromosome(truth);
    let pred_lookup = partition_by_chromosome(pred);
    let empty = VariantSet::default();

    truth_lookup.keys()
        .merge(pred_lookup.keys())
        .dedup()
        .map(|&chrom| {
            let truth_chrom = truth_lookup.get(chrom).unwrap_or(&empty);
            let pred_chrom = pred_lookup.get(chrom).unwrap_or(&empty);
            (chrom.to_string(), compute(truth_chrom, pred_chrom))
        })
        .collect()
}

/// Splits a variant set into one set per chromosome, keyed and sorted by chromosome name.
/// # Arguments
/// * `variants` - the set to split
pub fn partition_by_chromosome(variants: &VariantSet) -> BTreeMap<&str, VariantSet> {
    let mut lookup: BTreeMap<&str, VariantSet> = Default::default();
    for variant in variants.iter() {
        lookup.entry(variant.chrom())
            .or_default()
            .insert(variant.clone());
    }
    lookup
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;
    use crate::data_types::variant_key::VariantKey;

    fn build_set(variants: &[(&str, u64, &str, &str)]) -> VariantSet {
        variants.iter()
            .map(|&(c, p, r, a)| VariantKey::new(c, p, r, a))
            .collect()
    }

    #[test]
    fn test_scores() {
        let metrics = MetricsResult::from_counts(7, 5, 2);
        assert_approx_eq!(metrics.precision(), 7.0 / 12.0);
        assert_approx_eq!(metrics.recall(), 7.0 / 9.0);
        assert_approx_eq!(metrics.f1(), 2.0 * (7.0 / 12.0) * (7.0 / 9.0) / (7.0 / 12.0 + 7.0 / 9.0));
    }

    #[test]
    fn test_zero_denominators() {
        let metrics = MetricsResult::from_counts(0, 0, 0);
        assert_eq!(metrics, MetricsResult::default());

        // no truth-positives at all means both are 0, including f1
        let metrics = MetricsResult::from_counts(0, 3, 4);
        assert_eq!(metrics.precision(), 0.0);
        assert_eq!(metrics.recall(), 0.0);
        assert_eq!(metrics.f1(), 0.0);
        assert!(!metrics.f1().is_nan());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let truth = build_set(&[("chr1", 100, "A", "T")]);
        let pred = build_set(&[("chr1", 100, "A", "T"), ("chr1", 200, "G", "C")]);
        let metrics = compute(&truth, &pred);
        assert_eq!(metrics.true_positive_count(), 1);
        assert_eq!(metrics.false_positive_count(), 1);
        assert_eq!(metrics.false_negative_count(), 0);
        assert_approx_eq!(metrics.precision(), 0.5);
        assert_approx_eq!(metrics.recall(), 1.0);
        assert_approx_eq!(metrics.f1(), 2.0 / 3.0);
    }

    #[test]
    fn test_reversal() {
        let a = build_set(&[("chr1", 1, "A", "T"), ("chr1", 2, "A", "G"), ("chr2", 3, "C", "CT")]);
        let b = build_set(&[("chr1", 1, "A", "T"), ("chr2", 3, "C", "CA")]);
        let ab = compute(&a, &b);
        let ba = compute(&b, &a);
        assert_eq!(ab.true_positive_count(), 1);
        assert_eq!(ab.true_positive_count(), ba.true_positive_count());
        assert_eq!(ab.false_positive_count(), ba.false_negative_count());
        assert_eq!(ab.false_negative_count(), ba.false_positive_count());
        assert_eq!(ab.false_positive_count(), 1);
        assert_eq!(ab.false_negative_count(), 2);
    }

    #[test]
    fn test_self_comparison() {
        let a = build_set(&[("chr1", 1, "A", "T"), ("chr3", 10, "ACG", "A")]);
        let metrics = compute(&a, &a);
        assert_eq!(metrics.true_positive_count(), 2);
        assert_eq!(metrics.false_positive_count(), 0);
        assert_eq!(metrics.false_negative_count(), 0);
        assert_approx_eq!(metrics.precision(), 1.0);
        assert_approx_eq!(metrics.recall(), 1.0);
        assert_approx_eq!(metrics.f1(), 1.0);
    }

    #[test]
    fn test_empty_sets() {
        let empty = VariantSet::default();
        let metrics = compute(&empty, &empty);
        assert_eq!(metrics, MetricsResult::from_counts(0, 0, 0));
        assert_eq!(metrics.precision(), 0.0);
        assert_eq!(metrics.recall(), 0.0);
        assert_eq!(metrics.f1(), 0.0);

        // one-sided empties
        let a = build_set(&[("chr1", 1, "A", "T")]);
        assert_eq!(compute(&a, &empty), MetricsResult::from_counts(0, 0, 1));
        assert_eq!(compute(&empty, &a), MetricsResult::from_counts(0, 1, 0));
    }

    #[test]
    fn test_per_chromosome() {
        let truth = build_set(&[
            ("chr1", 100, "A", "T"),
            ("chr2", 10, "G", "C"),
            ("chr2", 20, "G", "GA"),
            ("chr10", 5, "T", "C")
        ]);
        let pred = build_set(&[
            ("chr1", 100, "A", "T"),
            ("chr1", 150, "C", "G"),
            ("chrX", 7, "A", "C")
        ]);

        let results = compute_per_chromosome(&truth, &pred);
        let labels: Vec<&str> = results.iter().map(|(c, _m)| c.as_str()).collect();
        // lexicographic, not natural, ordering
        assert_eq!(labels, vec!["chr1", "chr10", "chr2", "chrX"]);

        let (_, chr1) = &results[0];
        assert_eq!(*chr1, MetricsResult::from_counts(1, 1, 0));

        let (_, chr10) = &results[1];
        assert_eq!(*chr10, MetricsResult::from_counts(0, 0, 1));

        // truth-only chromosome
        let (_, chr2) = &results[2];
        assert_eq!(chr2.true_positive_count(), 0);
        assert_eq!(chr2.false_positive_count(), 0);
        assert_eq!(chr2.false_negative_count(), 2);
        assert_eq!(chr2.precision(), 0.0);
        assert_eq!(chr2.recall(), 0.0);

        // prediction-only chromosome
        let (_, chrx) = &results[3];
        assert_eq!(*chrx, MetricsResult::from_counts(0, 1, 0));

        // the partitions should add back up to the global result
        let global = compute(&truth, &pred);
        let tp_sum: u64 = results.iter().map(|(_c, m)| m.true_positive_count()).sum();
        let fp_sum: u64 = results.iter().map(|(_c, m)| m.false_positive_count()).sum();
        let fn_sum: u64 = results.iter().map(|(_c, m)| m.false_negative_count()).sum();
        assert_eq!(tp_sum, global.true_positive_count());
        assert_eq!(fp_sum, global.false_positive_count());
        assert_eq!(fn_sum, global.false_negative_count());
    }

    #[test]
    fn test_per_chromosome_empty() {
        let empty = VariantSet::default();
        assert!(compute_per_chromosome(&empty, &empty).is_empty());
    }

    #[test]
    fn test_partition() {
        let set = build_set(&[("chr1", 1, "A", "T"), ("chr1", 2, "A", "T"), ("chr2", 1, "A", "T")]);
        let lookup = partition_by_chromosome(&set);
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup["chr1"].len(), 2);
        assert_eq!(lookup["chr2"].len(), 1);
    }
}
