use serde::{Deserialize, Serialize};

/// The closed set of supported gene-prediction tools.
///
/// Each variant corresponds to one output format with its own parser in
/// [`crate::parsing`]; the dispatch there is an exhaustive match, so adding
/// a variant without a parser fails to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    Glimmer,
    GeneMark,
    GeneMarkHmm,
    GeneMarkS,
    GeneMarkS2,
    GeneMarkHeuristic,
    Prodigal,
    Rast,
    Metagene,
    Aragorn,
}

impl Tool {
    /// All supported tools, in canonical order
    pub const ALL: [Tool; 10] = [
        Tool::Glimmer,
        Tool::GeneMark,
        Tool::GeneMarkHmm,
        Tool::GeneMarkS,
        Tool::GeneMarkS2,
        Tool::GeneMarkHeuristic,
        Tool::Prodigal,
        Tool::Rast,
        Tool::Metagene,
        Tool::Aragorn,
    ];

    /// Stable identifier used as the source tag on parsed records and on the
    /// command line
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Glimmer => "glimmer",
            Self::GeneMark => "genemark",
            Self::GeneMarkHmm => "genemark-hmm",
            Self::GeneMarkS => "genemark-s",
            Self::GeneMarkS2 => "genemark-s2",
            Self::GeneMarkHeuristic => "genemark-heuristic",
            Self::Prodigal => "prodigal",
            Self::Rast => "rast",
            Self::Metagene => "metagene",
            Self::Aragorn => "aragorn",
        }
    }

    /// Whether this tool predicts structural RNA rather than coding genes
    #[must_use]
    pub fn is_rna_tool(self) -> bool {
        matches!(self, Self::Aragorn)
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.id() == s.to_lowercase())
            .ok_or_else(|| format!("unknown tool '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(tool.id().parse::<Tool>(), Ok(tool));
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("phanotate".parse::<Tool>().is_err());
    }

    #[test]
    fn test_rna_tool() {
        assert!(Tool::Aragorn.is_rna_tool());
        assert!(!Tool::Prodigal.is_rna_tool());
    }
}
