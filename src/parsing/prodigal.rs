//! Parser for Prodigal's GenBank-style coordinate output.
//!
//! Only the `CDS` location lines are of interest:
//!
//! ```text
//!      CDS             337..2799
//!      CDS             complement(2..181)
//! ```
//!
//! A `complement(...)` wrapper marks the reverse strand. Truncated genes use
//! `<`/`>` boundary markers inside the range.

use crate::core::{FeatureKind, FeatureRecord, Strand};
use crate::parsing::{parse_coordinate, ParseError};
use crate::utils::validation::check_record_limit;

/// Parse Prodigal output.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` on a CDS line without an `a..b` range,
/// `ParseError::InvalidCoordinate` on malformed boundaries, or
/// `ParseError::TooManyRecords` past the cap.
pub fn parse_prodigal(
    raw: &str,
    source: &str,
    total_length: u64,
) -> Result<Vec<FeatureRecord>, ParseError> {
    const TOOL: &str = "prodigal";

    let mut records = Vec::new();
    for line in raw.lines().skip(2) {
        if !line.contains("CDS") {
            continue;
        }

        let location = line
            .rsplit("CDS")
            .next()
            .unwrap_or_default()
            .trim();

        let (strand, range) = match location.strip_prefix("complement(") {
            Some(inner) => (Strand::Reverse, inner.trim_end_matches(')')),
            None => (Strand::Forward, location),
        };

        let (start_token, stop_token) = range.split_once("..").ok_or_else(|| {
            ParseError::invalid_format(TOOL, format!("CDS location without range: {line}"))
        })?;

        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len()));
        }

        let start = parse_coordinate(TOOL, start_token)?;
        let stop = parse_coordinate(TOOL, stop_token)?;
        records.push(FeatureRecord::new(
            start,
            stop,
            strand,
            FeatureKind::CodingGene,
            source,
            total_length,
        ));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODIGAL_OUTPUT: &str = r#"DEFINITION  seqnum=1;seqlen=50000;seqhdr="seq1"
FEATURES             Location/Qualifiers
     CDS             337..2799
                     /note="ID=1_1;partial=00;start_type=ATG"
     CDS             complement(2800..3733)
                     /note="ID=1_2;partial=00;start_type=ATG"
     CDS             <3..98
                     /note="ID=1_3;partial=10;start_type=Edge"
"#;

    #[test]
    fn test_parse_prodigal() {
        let records = parse_prodigal(PRODIGAL_OUTPUT, "prodigal", 50_000).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].start, 337);
        assert_eq!(records[0].stop, 2799);
        assert_eq!(records[0].strand, Strand::Forward);

        assert_eq!(records[1].start, 2800);
        assert_eq!(records[1].stop, 3733);
        assert_eq!(records[1].strand, Strand::Reverse);

        // truncated boundary marker is stripped
        assert_eq!(records[2].start, 3);
        assert_eq!(records[2].source, "prodigal");
    }

    #[test]
    fn test_parse_prodigal_skips_banner_lines() {
        // 'CDS' within the first two lines must not be parsed
        let raw = "CDS 1..2\nCDS 3..4\n     CDS             10..90\n";
        let records = parse_prodigal(raw, "", 1_000).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].start, 10);
    }

    #[test]
    fn test_parse_prodigal_malformed_range() {
        let raw = "a\nb\n     CDS             no-range-here\n";
        assert!(parse_prodigal(raw, "", 1_000).is_err());
    }

    #[test]
    fn test_parse_prodigal_no_cds() {
        let records = parse_prodigal("a\nb\nc\n", "", 1_000).unwrap();
        assert!(records.is_empty());
    }
}
