
use rustc_hash::FxHashSet;

/// A set of canonical variants loaded from one VCF file.
pub type VariantSet = FxHashSet<VariantKey>;

/// The identity of a single called allele.
/// Two calls are the same variant if and only if all four fields match exactly.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VariantKey {
    /// Chromosome name, exactly as written in the VCF
    chrom: String,
    /// The POS column, 1-based
    position: u64,
    /// Upper-case REF allele
    reference: String,
    /// Upper-case ALT allele
    alternate: String
}

impl VariantKey {
    /// Constructor, alleles are converted to upper-case so the key is always canonical.
    /// # Arguments
    /// * `chrom` - the chromosome name
    /// * `position` - the 1-based position from the VCF
    /// * `reference` - the REF allele
    /// * `alternate` - a single ALT allele
    pub fn new(chrom: impl Into<String>, position: u64, reference: &str, alternate: &str) -> Self {
        Self {
            chrom: chrom.into(),
            position,
            reference: reference.to_ascii_uppercase(),
            alternate: alternate.to_ascii_uppercase()
        }
    }

    // getters
    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn alternate(&self) -> &str {
        &self.alternate
    }
}

impl std::fmt::Display for VariantKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}>{}", self.chrom, self.position, self.reference, self.alternate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercase_alleles() {
        let key = VariantKey::new("chr1", 100, "acgT", "t");
        assert_eq!(key.reference(), "ACGT");
        assert_eq!(key.alternate(), "T");
        assert_eq!(key, VariantKey::new("chr1", 100, "ACGT", "T"));

        // chromosome names are not normalized
        assert_ne!(key, VariantKey::new("CHR1", 100, "ACGT", "T"));
    }

    #[test]
    fn test_set_deduplication() {
        let mut set = VariantSet::default();
        assert!(set.insert(VariantKey::new("chr1", 100, "A", "T")));
        assert!(!set.insert(VariantKey::new("chr1", 100, "a", "t")));
        assert!(set.insert(VariantKey::new("chr1", 100, "A", "C")));
        assert!(set.insert(VariantKey::new("chr1", 101, "A", "T")));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_display() {
        let key = VariantKey::new("chr2", 5, "AC", "A");
        assert_eq!(key.to_string(), "chr2:5:AC>A");
    }
}
