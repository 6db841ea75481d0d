
use anyhow::{anyhow, Context};
use log::{debug, trace};
use noodles::vcf;
use std::path::Path;

use crate::data_types::allele_type::AlleleType;
use crate::data_types::variant_key::{VariantKey, VariantSet};
use crate::parsing::interval_index::IntervalIndex;
use crate::parsing::sanitizer::sanitize_vcf_in;
use crate::util::file_io::open_text_reader;

/// Loads every comparable variant in a VCF file into a set of canonical keys.
/// The file is first sanitized into a temporary copy, which is removed before this returns.
/// # Arguments
/// * `vcf_fn` - the VCF file to load, optionally gzip compressed
/// * `regions` - if provided and not empty, only records with a POS inside one of these regions are kept
/// # Errors
/// * if the file cannot be opened or sanitized
/// * if the header or any record fails to parse
pub fn load_vcf_as_set(vcf_fn: &Path, regions: Option<&IntervalIndex>) -> anyhow::Result<VariantSet> {
    load_vcf_as_set_in(vcf_fn, regions, &std::env::temp_dir())
}

/// Same as `load_vcf_as_set`, but the sanitized copy is placed in `temp_dir`.
/// The copy is removed on return, whether or not loading succeeded.
pub fn load_vcf_as_set_in(vcf_fn: &Path, regions: Option<&IntervalIndex>, temp_dir: &Path) -> anyhow::Result<VariantSet> {
    // the guard has to outlive the reader
    let sanitized = sanitize_vcf_in(vcf_fn, temp_dir)?;
    if sanitized.repaired_lines() > 0 {
        debug!("Repaired {} malformed header line(s) in {vcf_fn:?}.", sanitized.repaired_lines());
    }

    let mut vcf_reader = vcf::io::Reader::new(open_text_reader(sanitized.path())?);
    let vcf_header = vcf_reader.read_header()
        .with_context(|| format!("Error while reading header of {vcf_fn:?}:"))?;

    let mut variants = VariantSet::default();
    let mut num_records: u64 = 0;
    for result in vcf_reader.records() {
        let record = result
            .with_context(|| format!("Error while reading record #{} of {vcf_fn:?}:", num_records + 1))?;
        let record_buf = vcf::variant::RecordBuf::try_from_variant_record(&vcf_header, &record)
            .with_context(|| format!("Error while parsing record #{} of {vcf_fn:?}:", num_records + 1))?;
        add_record(&record_buf, regions, &mut variants)
            .with_context(|| format!("Error while canonicalizing {record_buf:?}:"))?;
        num_records += 1;
    }

    debug!("Parsed {num_records} records from {vcf_fn:?} into {} variants.", variants.len());
    Ok(variants)
}

/// Adds all comparable alleles of a parsed record to the variant set.
/// # Arguments
/// * `record` - the parsed VCF record
/// * `regions` - optional region filter, applied to the record POS
/// * `variants` - the set to add to
/// # Errors
/// * if the record has no position
pub fn add_record(record: &vcf::variant::RecordBuf, regions: Option<&IntervalIndex>, variants: &mut VariantSet) -> anyhow::Result<usize> {
    let chrom = record.reference_sequence_name();
    let position = record.variant_start()
        .ok_or(anyhow!("Missing POS"))?
        .get() as u64; // 1-based
    let alternates: Vec<&str> = record.alternate_bases().as_ref().iter()
        .map(|a| a.as_str())
        .collect();
    Ok(add_alleles(chrom, position, record.reference_bases(), &alternates, regions, variants))
}

/// Adds one canonical key per SNV or INDEL alternate allele of a single record.
/// The region check is done once for the record, so an excluded record drops all of its alleles together.
/// An index without any regions does not filter anything.
/// Returns the number of keys newly added to the set.
/// # Arguments
/// * `chrom` - the record chromosome
/// * `position` - the record POS, 1-based
/// * `reference` - the REF allele
/// * `alternates` - every entry in the ALT column
/// * `regions` - optional region filter
/// * `variants` - the set to add to
pub fn add_alleles(
    chrom: &str, position: u64, reference: &str, alternates: &[&str],
    regions: Option<&IntervalIndex>, variants: &mut VariantSet
) -> usize {
    if let Some(index) = regions.filter(|r| !r.is_empty()) {
        if !index.contains(chrom, position) {
            trace!("Skipping {chrom}:{position}, outside of regions");
            return 0;
        }
    }

    let reference = reference.to_ascii_uppercase();
    let mut added = 0;
    for &alternate in alternates.iter() {
        let allele_type = AlleleType::classify(&reference, alternate);
        if !allele_type.is_comparable() {
            trace!("Skipping {} allele {chrom}:{position}:{reference}>{alternate}", allele_type.as_ref());
            continue;
        }

        if variants.insert(VariantKey::new(chrom, position, &reference, alternate)) {
            added += 1;
        }
    }
    added
}
