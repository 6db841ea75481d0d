/*!
# Parsing module
Contains the logic for parsing input files into meaningful structs / data.
*/
/// Converts VCF records into sets of canonical variants
pub mod canonicalizer;
/// Region file loading and point lookups
pub mod interval_index;
/// Repairs known header problems so VCF files parse cleanly
pub mod sanitizer;
