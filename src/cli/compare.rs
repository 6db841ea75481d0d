
use clap::Args;
use log::{info, warn};
use std::path::PathBuf;

use crate::cli::core::{check_optional_filename, check_required_filename, AFTER_HELP, FULL_VERSION};

#[derive(Args, Clone, Debug, Default)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct CompareSettings {
    #[clap(default_value = "")]
    #[clap(hide = true)]
    vcfconcord_version: String,

    /// Truth variant call file (VCF), expected variants
    #[clap(required = true)]
    #[clap(short = 't')]
    #[clap(long = "truth")]
    #[clap(value_name = "VCF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub truth_vcf_filename: PathBuf,

    /// Predicted variant call file (VCF), produced by the pipeline
    #[clap(required = true)]
    #[clap(short = 'p')]
    #[clap(long = "pred")]
    #[clap(value_name = "VCF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub pred_vcf_filename: PathBuf,

    /// Confidence regions (BED-like, inclusive chrom/start/end columns)
    #[clap(short = 'b')]
    #[clap(long = "bed")]
    #[clap(value_name = "BED")]
    #[clap(help_heading = Some("Input/Output"))]
    pub regions: Option<PathBuf>,

    /// Optional output JSON with the global results
    #[clap(long = "save-json")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_json: Option<PathBuf>,

    /// Optional output CSV with the global results
    #[clap(long = "save-csv")]
    #[clap(value_name = "CSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_csv: Option<PathBuf>,

    /// Optional output CSV with the per-chromosome results, implies --per-chrom
    #[clap(long = "save-perchrom-csv")]
    #[clap(value_name = "CSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_perchrom_csv: Option<PathBuf>,

    /// Reports the comparison separately for each chromosome
    #[clap(long = "per-chrom")]
    #[clap(help_heading = Some("Compare parameters"))]
    pub per_chrom: bool,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl CompareSettings {
    pub fn vcfconcord_version(&self) -> &str {
        &self.vcfconcord_version
    }
}

pub fn check_compare_settings(mut settings: CompareSettings) -> anyhow::Result<CompareSettings> {
    // hard code the version in
    settings.vcfconcord_version = FULL_VERSION.clone();
    info!("vcfconcord version: {:?}", &settings.vcfconcord_version);
    info!("Sub-command: compare");
    info!("Inputs:");

    // check for all the required input files
    check_required_filename(&settings.truth_vcf_filename, "Truth VCF")?;
    check_required_filename(&settings.pred_vcf_filename, "Predicted VCF")?;
    check_optional_filename(settings.regions.as_deref(), "Regions")?;

    // dump stuff to the logger
    info!("\tTruth VCF: {:?}", &settings.truth_vcf_filename);
    info!("\tPredicted VCF: {:?}", &settings.pred_vcf_filename);
    if let Some(bed_fn) = settings.regions.as_deref() {
        info!("\tRegions: {bed_fn:?}");
    } else {
        info!("\tRegions: None");
    }

    // a per-chromosome output only makes sense if we compute it
    if settings.output_perchrom_csv.is_some() && !settings.per_chrom {
        warn!("--save-perchrom-csv was provided without --per-chrom, enabling per-chromosome metrics.");
        settings.per_chrom = true;
    }

    info!("Compare parameters:");
    info!("\tPer-chromosome metrics: {}", if settings.per_chrom { "ENABLED" } else { "DISABLED" });

    // outputs
    info!("Outputs:");
    for (label, opt_fn) in [
        ("JSON", settings.output_json.as_ref()),
        ("CSV", settings.output_csv.as_ref()),
        ("Per-chromosome CSV", settings.output_perchrom_csv.as_ref())
    ] {
        match opt_fn {
            Some(filename) => info!("\t{label}: {filename:?}"),
            None => info!("\t{label}: None")
        };
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing_settings(truth: &tempfile::NamedTempFile, pred: &tempfile::NamedTempFile) -> CompareSettings {
        CompareSettings {
            truth_vcf_filename: truth.path().to_path_buf(),
            pred_vcf_filename: pred.path().to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_check_settings() {
        let truth = tempfile::NamedTempFile::new().unwrap();
        let pred = tempfile::NamedTempFile::new().unwrap();

        let settings = check_compare_settings(existing_settings(&truth, &pred)).unwrap();
        assert_eq!(settings.vcfconcord_version(), FULL_VERSION.as_str());
        assert!(!settings.per_chrom);

        // missing regions file
        let mut settings = existing_settings(&truth, &pred);
        settings.regions = Some(PathBuf::from("does/not/exist.bed"));
        assert!(check_compare_settings(settings).is_err());

        // missing pred file
        let mut settings = existing_settings(&truth, &pred);
        settings.pred_vcf_filename = PathBuf::from("does/not/exist.vcf");
        assert!(check_compare_settings(settings).is_err());
    }

    #[test]
    fn test_perchrom_csv_implies_per_chrom() {
        let truth = tempfile::NamedTempFile::new().unwrap();
        let pred = tempfile::NamedTempFile::new().unwrap();
        let mut settings = existing_settings(&truth, &pred);
        settings.output_perchrom_csv = Some(PathBuf::from("out/per_chrom.csv"));
        let settings = check_compare_settings(settings).unwrap();
        assert!(settings.per_chrom);
    }
}
