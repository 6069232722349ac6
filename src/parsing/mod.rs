//! Parsers for the output formats of the supported gene-prediction tools.
//!
//! Every parser shares the same contract: it receives the raw text a tool
//! produced, the identity string to tag records with, and the total sequence
//! length (needed to compute spans that wrap a circular sequence's origin),
//! and returns the tool's calls in file order:
//!
//! ```rust
//! use gene_consensus::parsing::glimmer::parse_glimmer;
//!
//! let raw = ">seq1 putative genes\norf00001 100 450 +1 9.20\n";
//! let records = parse_glimmer(raw, "glimmer", 10_000).unwrap();
//! assert_eq!(records[0].stop, 450);
//! ```
//!
//! Parsers never reorder coordinates: reverse-strand calls and calls that
//! wrap the origin legitimately carry `start > stop`. Structural markers
//! specific to each format (banner lines, column headers, trailing comment
//! blocks) are required where the tool always emits them; when absent the
//! parser fails with [`ParseError::InvalidFormat`] naming itself, and
//! contributes nothing.
//!
//! Boundary tokens may carry open-ended range markers (`<100`, `>4311`, or
//! their HTML-escaped forms) indicating a truncated gene; markers are
//! stripped before numeric parsing.

pub mod aragorn;
pub mod fasta;
pub mod genemark;
pub mod gff;
pub mod glimmer;
pub mod metagene;
pub mod prodigal;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::{FeatureRecord, Tool};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{tool}: {reason}")]
    InvalidFormat { tool: &'static str, reason: String },

    #[error("{tool}: invalid coordinate token '{token}'")]
    InvalidCoordinate { tool: &'static str, token: String },

    #[error("too many records: {0} exceeds maximum allowed (100000)")]
    TooManyRecords(usize),
}

impl ParseError {
    pub(crate) fn invalid_format(tool: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            tool,
            reason: reason.into(),
        }
    }
}

/// Per-tool parse outcome, keyed by tool. Failures are kept as data so the
/// consensus step can proceed over whichever tools succeeded.
pub type ToolResults = BTreeMap<Tool, Result<Vec<FeatureRecord>, ParseError>>;

/// Parse one tool's raw output into its calls.
///
/// The match is exhaustive over [`Tool`]; a new variant cannot be added
/// without wiring up its parser here.
///
/// # Errors
///
/// Propagates the per-format error of the selected parser.
pub fn parse_tool_output(
    tool: Tool,
    raw: &str,
    total_length: u64,
) -> Result<Vec<FeatureRecord>, ParseError> {
    let id = tool.id();
    match tool {
        Tool::Glimmer => glimmer::parse_glimmer(raw, id, total_length),
        Tool::GeneMark => genemark::parse_genemark(raw, id, total_length),
        Tool::GeneMarkHmm => genemark::parse_genemark_hmm(raw, id, total_length),
        Tool::GeneMarkS => genemark::parse_genemark_s(raw, id, total_length),
        Tool::GeneMarkS2 => genemark::parse_genemark_s2(raw, id, total_length),
        Tool::GeneMarkHeuristic => genemark::parse_genemark_heuristic(raw, id, total_length),
        Tool::Prodigal => prodigal::parse_prodigal(raw, id, total_length),
        Tool::Rast => gff::parse_rast(raw, id, total_length),
        Tool::Metagene => metagene::parse_metagene(raw, id, total_length),
        Tool::Aragorn => aragorn::parse_aragorn(raw, id, total_length),
    }
}

/// Parse a start/stop token, stripping a leading truncation marker.
///
/// Accepts plain digits, `<`/`>`-prefixed digits, and the HTML-escaped
/// `&lt;`/`&gt;` forms some web-hosted tools emit.
pub(crate) fn parse_coordinate(tool: &'static str, token: &str) -> Result<u64, ParseError> {
    let digits = token
        .strip_prefix("&lt;")
        .or_else(|| token.strip_prefix("&gt;"))
        .or_else(|| token.strip_prefix('<'))
        .or_else(|| token.strip_prefix('>'))
        .unwrap_or(token);

    digits.parse().map_err(|_| ParseError::InvalidCoordinate {
        tool,
        token: token.to_string(),
    })
}

/// Like [`parse_coordinate`], but tolerates arbitrary non-digit characters
/// before the number: leading junk is discarded and the first maximal digit
/// run is parsed. Used where truncated-gene notation leaks odd prefixes into
/// the boundary column.
pub(crate) fn parse_scrubbed_coordinate(
    tool: &'static str,
    token: &str,
) -> Result<u64, ParseError> {
    let trimmed = token.trim_start_matches(|c: char| !c.is_ascii_digit());
    let run_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let digits = &trimmed[..run_end];

    digits.parse().map_err(|_| ParseError::InvalidCoordinate {
        tool,
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate_plain() {
        assert_eq!(parse_coordinate("t", "4311").unwrap(), 4311);
    }

    #[test]
    fn test_parse_coordinate_markers() {
        assert_eq!(parse_coordinate("t", "<3").unwrap(), 3);
        assert_eq!(parse_coordinate("t", ">4311").unwrap(), 4311);
        assert_eq!(parse_coordinate("t", "&lt;3").unwrap(), 3);
        assert_eq!(parse_coordinate("t", "&gt;4311").unwrap(), 4311);
    }

    #[test]
    fn test_parse_coordinate_rejects_garbage() {
        assert!(parse_coordinate("t", "abc").is_err());
        assert!(parse_coordinate("t", "").is_err());
    }

    #[test]
    fn test_parse_scrubbed_coordinate() {
        assert_eq!(parse_scrubbed_coordinate("t", "<2").unwrap(), 2);
        assert_eq!(parse_scrubbed_coordinate("t", "..17").unwrap(), 17);
        assert_eq!(parse_scrubbed_coordinate("t", "140").unwrap(), 140);
        assert_eq!(parse_scrubbed_coordinate("t", "<140>").unwrap(), 140);
        assert!(parse_scrubbed_coordinate("t", "<>").is_err());
    }
}
