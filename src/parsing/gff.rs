//! Parser for RAST GFF3 exports.
//!
//! Tab-separated rows; only `CDS` rows contribute calls. Columns 4/5/7 are
//! start, stop, and strand.

use crate::core::{FeatureKind, FeatureRecord, Strand};
use crate::parsing::{parse_coordinate, ParseError};
use crate::utils::validation::check_record_limit;

/// Parse RAST GFF3 output.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` on a truncated or strand-less CDS row,
/// `ParseError::InvalidCoordinate` on malformed boundaries, or
/// `ParseError::TooManyRecords` past the cap.
pub fn parse_rast(
    raw: &str,
    source: &str,
    total_length: u64,
) -> Result<Vec<FeatureRecord>, ParseError> {
    const TOOL: &str = "rast";

    let mut records = Vec::new();
    for line in raw.lines() {
        if !line.contains("CDS") {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 7 {
            return Err(ParseError::invalid_format(
                TOOL,
                format!("CDS row with fewer than 7 columns: {line}"),
            ));
        }

        let strand = match fields[6] {
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

        let start = parse_coordinate(TOOL, fields[3])?;
        let stop = parse_coordinate(TOOL, fields[4])?;
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
