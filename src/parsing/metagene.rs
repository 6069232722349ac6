//! Parser for the Metagene HTML result table.
//!
//! The service returns an HTML page whose gene table rows look like:
//!
//! ```text
//! <tr><td>gene_1</td><td>337</td><td>2799</td><td>+</td><td>...</td></tr>
//! ```
//!
//! Cells 1-3 carry start, stop, and strand; truncated boundaries arrive
//! HTML-escaped (`&lt;1`).

use std::sync::OnceLock;

use regex::Regex;

use crate::core::{FeatureKind, FeatureRecord, Strand};
use crate::parsing::{parse_coordinate, ParseError};
use crate::utils::validation::check_record_limit;

fn row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").expect("valid row pattern"))
}

fn cell_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<td[^>]*>(.*?)</td>").expect("valid cell pattern"))
}

/// Parse Metagene output.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the input carries no table rows at
/// all or a row is missing cells, `ParseError::InvalidCoordinate` on
/// malformed boundaries, or `ParseError::TooManyRecords` past the cap.
pub fn parse_metagene(
    raw: &str,
    source: &str,
    total_length: u64,
) -> Result<Vec<FeatureRecord>, ParseError> {
    const TOOL: &str = "metagene";

    let mut saw_row = false;
    let mut records = Vec::new();
    for row in row_re().captures_iter(raw) {
        saw_row = true;
        let body = &row[1];

        let cells: Vec<String> = cell_re()
            .captures_iter(body)
            .map(|c| c[1].trim().to_string())
            .collect();

        // header rows use <th> cells and carry no <td>
        if cells.is_empty() {
            continue;
        }
        if cells.len() < 4 {
            return Err(ParseError::invalid_format(
                TOOL,
                format!("gene row with fewer than 4 cells: {body}"),
            ));
        }

        let strand = match cells[3].as_str() {
            "+" => Strand::Forward,
            "-" => Strand::Reverse,
            other => {
                return Err(ParseError::invalid_format(
                    TOOL,
                    format!("invalid strand '{other}'"),
                ))
            }
        };

        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len()));
        }

        let start = parse_coordinate(TOOL, &cells[1])?;
        let stop = parse_coordinate(TOOL, &cells[2])?;
        records.push(FeatureRecord::new(
            start,
            stop,
            strand,
            FeatureKind::CodingGene,
            source,
            total_length,
        ));
    }

    if !saw_row {
        return Err(ParseError::invalid_format(TOOL, "no table rows found"));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const METAGENE_OUTPUT: &str = "\
<html><body><table>
<tr><th>gene</th><th>start</th><th>stop</th><th>strand</th></tr>
<tr><td>gene_1</td><td>337</td><td>2799</td><td>+</td><td>0</td></tr>
<tr><td>gene_2</td><td>2800</td><td>3733</td><td>-</td><td>1</td></tr>
<tr><td>gene_3</td><td>&lt;3</td><td>98</td><td>+</td><td>2</td></tr>
</table></body></html>
";

    #[test]
    fn test_parse_metagene() {
        let records = parse_metagene(METAGENE_OUTPUT, "metagene", 50_000).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].start, 337);
        assert_eq!(records[0].stop, 2799);
        assert_eq!(records[0].strand, Strand::Forward);
        assert_eq!(records[1].strand, Strand::Reverse);

        // HTML-escaped truncation marker
        assert_eq!(records[2].start, 3);
        assert_eq!(records[2].source, "metagene");
    }

    #[test]
    fn test_parse_metagene_no_rows() {
        assert!(parse_metagene("<html><body>no genes</body></html>", "", 0).is_err());
    }

    #[test]
    fn test_parse_metagene_short_row() {
        let raw = "<tr><td>gene_1</td><td>337</td></tr>";
        assert!(parse_metagene(raw, "", 0).is_err());
    }
}
