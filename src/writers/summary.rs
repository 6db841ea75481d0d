
use anyhow::Context;
use log::info;
use serde::Serialize;
use std::path::Path;

use crate::data_types::metrics::MetricsResult;
use crate::util::file_io::create_parent_folder;
use crate::util::json_io::save_json;

/// The global comparison result along with the sizes of the two input sets
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GlobalSummary {
    /// Metrics over all chromosomes
    #[serde(flatten)]
    metrics: MetricsResult,
    /// Number of canonical variants loaded from the truth VCF
    truth_variants: u64,
    /// Number of canonical variants loaded from the predicted VCF
    predicted_variants: u64
}

impl GlobalSummary {
    /// Constructor
    pub fn new(metrics: MetricsResult, truth_variants: u64, predicted_variants: u64) -> Self {
        Self {
            metrics, truth_variants, predicted_variants
        }
    }

    /// Writes the summary to the log at info level
    pub fn log_report(&self) {
        let m = &self.metrics;
        info!("==== GLOBAL PERFORMANCE ====");
        info!("True Positives (TP): {}", m.true_positive_count());
        info!("False Positives (FP): {}", m.false_positive_count());
        info!("False Negatives (FN): {}", m.false_negative_count());
        info!("Precision: {:.4}", m.precision());
        info!("Recall:    {:.4}", m.recall());
        info!("F1 Score:  {:.4}", m.f1());
    }

    /// Saves the summary as a pretty JSON object
    /// # Arguments
    /// * `filename` - output path, .gz is supported
    pub fn write_json(&self, filename: &Path) -> anyhow::Result<()> {
        save_json(self, filename)
    }

    /// Saves the summary as a two column metric/value CSV
    /// # Arguments
    /// * `filename` - output path
    pub fn write_csv(&self, filename: &Path) -> anyhow::Result<()> {
        create_parent_folder(filename)?;
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(filename)
            .with_context(|| format!("Error while creating {filename:?}:"))?;

        let m = &self.metrics;
        csv_writer.write_record(["metric", "value"])?;
        csv_writer.serialize(("TP", m.true_positive_count()))?;
        csv_writer.serialize(("FP", m.false_positive_count()))?;
        csv_writer.serialize(("FN", m.false_negative_count()))?;
        csv_writer.serialize(("precision", m.precision()))?;
        csv_writer.serialize(("recall", m.recall()))?;
        csv_writer.serialize(("f1", m.f1()))?;
        csv_writer.serialize(("truth_variants", self.truth_variants))?;
        csv_writer.serialize(("predicted_variants", self.predicted_variants))?;
        csv_writer.flush()?;
        Ok(())
    }
}

/// Contains all the data written to each row of the per-chromosome file
#[derive(Serialize)]
struct ChromRow<'a> {
    chrom: &'a str,
    #[serde(rename = "TP")]
    true_positive_count: u64,
    #[serde(rename = "FP")]
    false_positive_count: u64,
    #[serde(rename = "FN")]
    false_negative_count: u64,
    precision: f64,
    recall: f64,
    f1: f64
}

impl<'a> ChromRow<'a> {
    fn new(chrom: &'a str, metrics: &MetricsResult) -> Self {
        Self {
            chrom,
            true_positive_count: metrics.true_positive_count(),
            false_positive_count: metrics.false_positive_count(),
            false_negative_count: metrics.false_negative_count(),
            precision: metrics.precision(),
            recall: metrics.recall(),
            f1: metrics.f1()
        }
    }
}

/// Writes each per-chromosome result to the log at info level
/// # Arguments
/// * `results` - chromosome label and metrics, in report order
pub fn log_per_chromosome(results: &[(String, MetricsResult)]) {
    info!("==== PER-CHROMOSOME ====");
    for (chrom, m) in results.iter() {
        info!(
            "--- {chrom} --- TP={}, FP={}, FN={}, Precision={:.3}, Recall={:.3}, F1={:.3}",
            m.true_positive_count(), m.false_positive_count(), m.false_negative_count(),
            m.precision(), m.recall(), m.f1()
        );
    }
}

/// Writes all per-chromosome results to a CSV with a header row, replacing any existing file.
/// Rows are written to a temporary file next to the destination which is then renamed over it,
/// so an interrupted run never leaves a partial table behind.
/// # Arguments
/// * `results` - chromosome label and metrics, in report order
/// * `filename` - output path
pub fn write_per_chromosome_csv(results: &[(String, MetricsResult)], filename: &Path) -> anyhow::Result<()> {
    create_parent_folder(filename)?;
    let out_folder = match filename.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::path::PathBuf::from(".")
    };
    let temp_file = tempfile::NamedTempFile::new_in(&out_folder)
        .with_context(|| format!("Error while creating temporary file in {out_folder:?}:"))?;

    {
        let mut csv_writer = csv::Writer::from_writer(temp_file.as_file());
        if results.is_empty() {
            // serialize only emits the header alongside the first row
            csv_writer.write_record(["chrom", "TP", "FP", "FN", "precision", "recall", "f1"])?;
        }
        for (chrom, metrics) in results.iter() {
            csv_writer.serialize(ChromRow::new(chrom, metrics))?;
        }
        csv_writer.flush()?;
    }

    temp_file.persist(filename)
        .with_context(|| format!("Error while saving {filename:?}:"))?;
    Ok(())
}
