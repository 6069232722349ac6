//! Parser for Aragorn tRNA tables.
//!
//! Aragorn's tab-delimited batch output (sometimes wrapped in an HTML `<pre>`
//! block by the hosted service) reports the hit count on the third line,
//! followed by one row per tRNA:
//!
//! ```text
//! >seq1
//! 1 sequence
//! 2 genes found
//! 1   tRNA-Ala   c[980,1020]	0	(cgc)
//! 2   tRNA-Met   [5000,5072]	0	(cat)
//! ```
//!
//! A `c` prefix on the coordinate pair marks the complement (reverse) strand.
//! The RNA type recorded on each call is the gene class concatenated with the
//! anticodon field, e.g. `tRNA-Ala(cgc)`.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::{FeatureKind, FeatureRecord, Strand};
use crate::parsing::{parse_coordinate, ParseError};
use crate::utils::validation::check_record_limit;

fn pre_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<pre[^>]*>(.*?)</pre>").expect("valid pre pattern"))
}

/// Parse Aragorn output.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the hit-count line or a row's
/// columns are missing, `ParseError::InvalidCoordinate` on malformed
/// boundaries, or `ParseError::TooManyRecords` past the cap.
pub fn parse_aragorn(
    raw: &str,
    source: &str,
    total_length: u64,
) -> Result<Vec<FeatureRecord>, ParseError> {
    const TOOL: &str = "aragorn";

    // hosted runs wrap the table in a <pre> block; local runs are bare text
    let table = match pre_re().captures(raw) {
        Some(captures) => captures.get(1).map_or("", |m| m.as_str()).to_string(),
        None => raw.to_string(),
    };

    let lines: Vec<&str> = table.lines().collect();
    let count_line = lines
        .get(2)
        .ok_or_else(|| ParseError::invalid_format(TOOL, "hit-count line not found"))?;
    let count: usize = count_line
        .split_whitespace()
        .next()
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| {
            ParseError::invalid_format(TOOL, format!("invalid hit-count line: {count_line}"))
        })?;

    if count == 0 {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    for line in &lines[3..] {
        if !line.contains("tRNA") {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 3 {
            return Err(ParseError::invalid_format(
                TOOL,
                format!("tRNA row with fewer than 3 columns: {line}"),
            ));
        }

        let head: Vec<&str> = fields[0].split_whitespace().collect();
        if head.len() < 3 {
            return Err(ParseError::invalid_format(
                TOOL,
                format!("tRNA row without 'n class coords' leader: {line}"),
            ));
        }
        let rna_type = format!("{}{}", head[1], fields[2].trim());

        let coords = head[2];
        let (strand, pair) = match coords.strip_prefix('c') {
            Some(rest) => (Strand::Reverse, rest),
            None => (Strand::Forward, coords),
        };
        let (start, stop) = parse_coordinate_pair(pair, line)?;

        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len()));
        }

        records.push(FeatureRecord::new(
            start,
            stop,
            strand,
            FeatureKind::StructuralRna { rna_type },
            source,
            total_length,
        ));
    }

    Ok(records)
}

/// Parse a `[start,stop]` coordinate pair
fn parse_coordinate_pair(pair: &str, line: &str) -> Result<(u64, u64), ParseError> {
    const TOOL: &str = "aragorn";

    let inner = pair
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| {
            ParseError::invalid_format(TOOL, format!("invalid coordinate pair in row: {line}"))
        })?;
    let (start_token, stop_token) = inner.split_once(',').ok_or_else(|| {
        ParseError::invalid_format(TOOL, format!("invalid coordinate pair in row: {line}"))
    })?;

    Ok((
        parse_coordinate(TOOL, start_token.trim())?,
        parse_coordinate(TOOL, stop_token.trim())?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARAGORN_OUTPUT: &str = "\
>seq1
1 sequence
2 genes found
1   tRNA-Ala   c[980,1020]\t0\t(cgc)
2   tRNA-Met   [5000,5072]\t0\t(cat)
";

    #[test]
    fn test_parse_aragorn() {
        let records = parse_aragorn(ARAGORN_OUTPUT, "aragorn", 50_000).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].start, 980);
        assert_eq!(records[0].stop, 1020);
        assert_eq!(records[0].strand, Strand::Reverse);
        assert_eq!(
            records[0].kind,
            FeatureKind::StructuralRna {
                rna_type: "tRNA-Ala(cgc)".to_string()
            }
        );

        assert_eq!(records[1].strand, Strand::Forward);
        assert_eq!(records[1].source, "aragorn");
    }

    #[test]
    fn test_parse_aragorn_pre_wrapped() {
        let wrapped = format!("<html><body><pre>{ARAGORN_OUTPUT}</pre></body></html>");
        let records = parse_aragorn(&wrapped, "aragorn", 50_000).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_aragorn_zero_hits() {
        let raw = ">seq1\n1 sequence\n0 genes found\n";
        let records = parse_aragorn(raw, "", 0).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_aragorn_missing_count_line() {
        assert!(parse_aragorn(">seq1\n", "", 0).is_err());
    }

    #[test]
    fn test_parse_aragorn_malformed_coords() {
        let raw = ">s\n1 sequence\n1 genes found\n1  tRNA-Ala  980,1020\t0\t(cgc)\n";
        assert!(parse_aragorn(raw, "", 0).is_err());
    }
}
