
/// Classification of a single ALT entry relative to the REF allele
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, strum_macros::AsRefStr)]
pub enum AlleleType {
    /// REF and ALT are both length = 1
    #[strum(serialize = "SNV")]
    Snv=0,
    /// REF and ALT are the same length, and that length is > 1
    #[strum(serialize = "MNV")]
    Mnv,
    /// REF and ALT have different lengths
    #[strum(serialize = "INDEL")]
    Indel,
    /// ALT is a symbolic allele, e.g. `<DEL>`
    #[strum(serialize = "SYMBOLIC")]
    Symbolic,
    /// ALT is a breakend, e.g. `G]17:198982]` or `.A`
    #[strum(serialize = "BND")]
    Breakend,
    /// ALT is `*`, an allele removed by an upstream deletion
    #[strum(serialize = "SPANNING_DELETION")]
    SpanningDeletion
}

impl AlleleType {
    /// Classifies an ALT allele against its REF allele.
    /// # Arguments
    /// * `reference` - the REF allele
    /// * `alternate` - one entry from the ALT column
    pub fn classify(reference: &str, alternate: &str) -> Self {
        if alternate.contains('[') || alternate.contains(']') {
            AlleleType::Breakend
        } else if alternate.len() > 1 && (alternate.starts_with('.') || alternate.ends_with('.')) {
            // single breakends
            AlleleType::Breakend
        } else if alternate.starts_with('<') && alternate.ends_with('>') {
            AlleleType::Symbolic
        } else if alternate == "*" {
            AlleleType::SpanningDeletion
        } else if reference.len() == alternate.len() {
            if reference.len() == 1 {
                AlleleType::Snv
            } else {
                AlleleType::Mnv
            }
        } else {
            AlleleType::Indel
        }
    }

    /// Returns true if this allele type takes part in the comparison
    pub fn is_comparable(&self) -> bool {
        matches!(self, AlleleType::Snv | AlleleType::Indel)
    }
}
