//! Parser for Glimmer orf tables.
//!
//! ```text
//! >seq1 putative genes
//! orf00001      100      450  +1     9.20
//! orf00002     1864     1185  -3    11.03
//! ```
//!
//! The frame column carries the strand; for reverse-strand rows Glimmer
//! lists the start codon first, so the two coordinates are swapped to keep
//! `start` at the 5' end of the reported pair.

use crate::core::{FeatureKind, FeatureRecord, Strand};
use crate::parsing::{parse_coordinate, ParseError};
use crate::utils::validation::check_record_limit;

/// Parse Glimmer output.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the input is empty or a feature
/// line is missing its frame column, `ParseError::InvalidCoordinate` on a
/// malformed boundary token, or `ParseError::TooManyRecords` past the cap.
pub fn parse_glimmer(
    raw: &str,
    source: &str,
    total_length: u64,
) -> Result<Vec<FeatureRecord>, ParseError> {
    const TOOL: &str = "glimmer";

    let mut lines = raw.lines();
    if lines.next().is_none() {
        return Err(ParseError::invalid_format(TOOL, "empty input"));
    }

    let mut records = Vec::new();
    for line in lines {
        // web-hosted runs wrap the table in markup; skip those lines
        if line.contains("html") || line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(ParseError::invalid_format(
                TOOL,
                format!("expected 'orf start stop frame' columns, got: {line}"),
            ));
        }

        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len()));
        }

        let a = parse_coordinate(TOOL, fields[1])?;
        let b = parse_coordinate(TOOL, fields[2])?;
        let record = if fields[3].contains('+') {
            FeatureRecord::new(a, b, Strand::Forward, FeatureKind::CodingGene, source, total_length)
        } else {
            FeatureRecord::new(b, a, Strand::Reverse, FeatureKind::CodingGene, source, total_length)
        };
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_glimmer() {
        let raw = "\
>Ronan putative genes
orf00001      100      450  +1     9.20
orf00002     1864     1185  -3    11.03
orf00003     2000     2600  +2     4.50
";
        let records = parse_glimmer(raw, "glimmer", 50_000).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].start, 100);
        assert_eq!(records[0].stop, 450);
        assert_eq!(records[0].strand, Strand::Forward);
        assert_eq!(records[0].source, "glimmer");

        // reverse rows list the start codon first; coordinates are swapped
        assert_eq!(records[1].start, 1185);
        assert_eq!(records[1].stop, 1864);
        assert_eq!(records[1].strand, Strand::Reverse);
        assert_eq!(records[1].length, 680);
    }

    #[test]
    fn test_parse_glimmer_skips_markup() {
        let raw = ">seq\n<html>\norf00001  10  90  +1  1.0\n</html>\n";
        let records = parse_glimmer(raw, "", 1_000).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_glimmer_empty_input() {
        assert!(parse_glimmer("", "", 0).is_err());
    }

    #[test]
    fn test_parse_glimmer_short_line() {
        let raw = ">seq\norf00001 10 90\n";
        assert!(parse_glimmer(raw, "", 1_000).is_err());
    }
}
