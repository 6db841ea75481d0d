
/// Classification of ALT alleles (SNV, INDEL, symbolic, ...)
pub mod allele_type;
/// Contains the TP, FP, FN tracker, derived scores, and the set comparisons that produce them
pub mod metrics;
/// Contains the canonical variant identity and the set type built from it
pub mod variant_key;
