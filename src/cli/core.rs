
use anyhow::bail;
use clap::{Parser, Subcommand};
use chrono::Datelike;
use lazy_static::lazy_static;
use std::path::Path;

use crate::cli::compare::CompareSettings;

lazy_static! {
    /// Stores the full version string we plan to use, which is generated in build.rs
    /// # Examples
    /// * `0.1.0-6bb9635-dirty` - while on a dirty branch
    /// * `0.1.0-6bb9635` - with a fresh commit
    pub static ref FULL_VERSION: String = format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("VERGEN_GIT_DESCRIBE"));

    /// Shared after help string
    pub static ref AFTER_HELP: String = format!("Copyright (C) 2024-{}     vcfconcord contributors
This program comes with ABSOLUTELY NO WARRANTY; it is intended for
research use only.", chrono::Utc::now().year());
}

#[derive(Parser)]
#[clap(author,
    version = &**FULL_VERSION,
    about,
    after_help = &**AFTER_HELP)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

/// vcfconcord, measures how well pipeline variant calls agree with a truth set.
/// Select a subcommand to see more usage information:
#[derive(Subcommand)]
pub enum Commands {
    /// Computes TP/FP/FN, precision, recall, and F1 of a predicted VCF relative to a truth VCF
    Compare(Box<CompareSettings>)
}

pub fn get_cli() -> Cli {
    Cli::parse()
}

/// Checks if a file exists and will otherwise exit
/// # Arguments
/// * `filename` - the file path to check for
/// * `label` - the label to use for error messages
pub fn check_required_filename(filename: &Path, label: &str) -> anyhow::Result<()> {
    if !filename.exists() {
        bail!("{} does not exist: \"{}\"", label, filename.display());
    }

    // file exists
    Ok(())
}

/// Checks if a file exists and will otherwise exit
/// # Arguments
/// * `filename` - the file path to check for
/// * `label` - the label to use for error messages
pub fn check_optional_filename(opt_filename: Option<&Path>, label: &str) -> anyhow::Result<()> {
    if let Some(filename) = opt_filename {
        check_required_filename(filename, label)?;
    }

    // file either was not specified OR it exists
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compare() {
        let cli = Cli::try_parse_from([
            "vcfconcord", "compare", "--truth", "truth.vcf.gz", "--pred", "pred.vcf", "--per-chrom", "-vv"
        ]).unwrap();
        let Commands::Compare(settings) = cli.command;
        assert_eq!(settings.truth_vcf_filename, Path::new("truth.vcf.gz"));
        assert_eq!(settings.pred_vcf_filename, Path::new("pred.vcf"));
        assert!(settings.regions.is_none());
        assert!(settings.per_chrom);
        assert_eq!(settings.verbosity, 2);

        // both inputs are required
        assert!(Cli::try_parse_from(["vcfconcord", "compare", "--truth", "truth.vcf"]).is_err());
    }

    #[test]
    fn test_check_filenames() {
        let temp_file = tempfile::NamedTempFile::new().unwrap();
        assert!(check_required_filename(temp_file.path(), "Truth VCF").is_ok());
        assert!(check_required_filename(Path::new("does/not/exist.vcf"), "Truth VCF").is_err());
        assert!(check_optional_filename(None, "Regions").is_ok());
        assert!(check_optional_filename(Some(Path::new("does/not/exist.bed")), "Regions").is_err());
    }
}
