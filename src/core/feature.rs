use serde::{Deserialize, Serialize};

/// Strand of a predicted feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// The `+`/`-` symbol tools print for this strand
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Forward => '+',
            Self::Reverse => '-',
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// What kind of feature a tool predicted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Protein-coding gene
    CodingGene,
    /// Structural RNA gene; `rna_type` holds the gene class plus anticodon
    /// (e.g. `tRNA-Ala(cgc)`), used for the product/note qualifiers on export
    StructuralRna { rna_type: String },
}

impl FeatureKind {
    #[must_use]
    pub fn is_rna(&self) -> bool {
        matches!(self, Self::StructuralRna { .. })
    }
}

/// One predicted feature on a DNA sequence, as reported by a single tool.
///
/// Coordinates are 1-based inclusive, exactly as the tool emitted them;
/// no reordering is applied, so for reverse-strand calls (and for calls that
/// wrap the origin of a circular sequence) `start` may be numerically greater
/// than `stop`. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// 1-based start coordinate as reported
    pub start: u64,

    /// 1-based stop coordinate as reported
    pub stop: u64,

    pub strand: Strand,

    /// Span length in bases, accounting for origin wraparound
    pub length: u64,

    /// Identity of the tool that produced this call; may be empty
    #[serde(default)]
    pub source: String,

    pub kind: FeatureKind,
}

impl FeatureRecord {
    /// Build a record from reported coordinates.
    ///
    /// `total_length` is the full sequence length; it only participates when
    /// `stop < start`, where the span is taken to wrap past the sequence end:
    /// `length = total_length + stop - start + 1`.
    #[must_use]
    pub fn new(
        start: u64,
        stop: u64,
        strand: Strand,
        kind: FeatureKind,
        source: impl Into<String>,
        total_length: u64,
    ) -> Self {
        let length = if stop >= start {
            stop - start + 1
        } else {
            (total_length + stop + 1).saturating_sub(start)
        };

        Self {
            start,
            stop,
            strand,
            length,
            source: source.into(),
            kind,
        }
    }

    /// The boundary coordinate tools are expected to agree on: the shared
    /// stop codon for forward-strand calls, the shared start for reverse.
    #[must_use]
    pub fn comparison_coordinate(&self) -> u64 {
        match self.strand {
            Strand::Forward => self.stop,
            Strand::Reverse => self.start,
        }
    }

    /// Whether two records can represent the same biological feature.
    ///
    /// True iff the strands match and the comparison coordinate is equal;
    /// the other boundary is allowed to differ (tools disagree on starts far
    /// more often than on stops). Kind is deliberately not considered.
    #[must_use]
    pub fn same_feature(&self, other: &Self) -> bool {
        self.strand == other.strand
            && self.comparison_coordinate() == other.comparison_coordinate()
    }

    /// Compact `(strand, start, stop)` key identifying a distinct call value
    /// within a group of same-feature records.
    #[must_use]
    pub fn boundary_key(&self) -> (Strand, u64, u64) {
        (self.strand, self.start, self.stop)
    }
}

impl std::fmt::Display for FeatureRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.strand.symbol(),
            self.start,
            self.stop
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gene(start: u64, stop: u64, strand: Strand) -> FeatureRecord {
        FeatureRecord::new(start, stop, strand, FeatureKind::CodingGene, "", 10_000)
    }

    #[test]
    fn test_length_simple_span() {
        assert_eq!(gene(100, 450, Strand::Forward).length, 351);
        assert_eq!(gene(1, 1, Strand::Forward).length, 1);
        assert_eq!(gene(980, 1020, Strand::Reverse).length, 41);
    }

    #[test]
    fn test_length_wraps_origin() {
        // spans 9995..10000 plus 1..12 on a 10 kb sequence
        let g = gene(9995, 12, Strand::Forward);
        assert_eq!(g.length, 18);
    }

    #[test]
    fn test_same_feature_forward_shares_stop() {
        let a = gene(100, 450, Strand::Forward);
        let b = gene(97, 450, Strand::Forward);
        assert!(a.same_feature(&b));
        assert!(b.same_feature(&a));

        let c = gene(100, 453, Strand::Forward);
        assert!(!a.same_feature(&c));
    }

    #[test]
    fn test_same_feature_reverse_shares_start() {
        let a = gene(200, 900, Strand::Reverse);
        let b = gene(200, 860, Strand::Reverse);
        assert!(a.same_feature(&b));

        let c = gene(210, 900, Strand::Reverse);
        assert!(!a.same_feature(&c));
    }

    #[test]
    fn test_same_feature_strand_mismatch() {
        let a = gene(100, 450, Strand::Forward);
        let b = gene(450, 900, Strand::Reverse);
        assert!(!a.same_feature(&b));
    }

    #[test]
    fn test_same_feature_ignores_kind() {
        let g = gene(100, 450, Strand::Forward);
        let t = FeatureRecord::new(
            97,
            450,
            Strand::Forward,
            FeatureKind::StructuralRna {
                rna_type: "tRNA-Ala(cgc)".to_string(),
            },
            "aragorn",
            10_000,
        );
        assert!(g.same_feature(&t));
    }

    #[test]
    fn test_comparison_coordinate() {
        assert_eq!(gene(100, 450, Strand::Forward).comparison_coordinate(), 450);
        assert_eq!(gene(100, 450, Strand::Reverse).comparison_coordinate(), 100);
    }
}
