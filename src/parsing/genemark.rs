//! Parsers for the GeneMark family of LST outputs.
//!
//! Four of the five variants (plain GeneMark, GeneMark.hmm, GeneMarkS, and
//! the heuristic model) share the LST table layout:
//!
//! ```text
//! GeneMark.hmm PROKARYOTIC (Version 3.25)
//! ...
//!    Gene    Strand    LeftEnd    RightEnd       Gene     Class
//!     #                                        Length
//!     1        +       <2          238          237        1
//!     2        -       317         1060         744        1
//! ```
//!
//! and differ only in banner requirements and how the table is terminated.
//! GeneMarkS-2 uses its own `SequenceID`-headed layout with a trailing `#`
//! comment block and is handled separately.
//!
//! LST coordinates are left/right ends, so `start <= stop` on both strands
//! as emitted; no reordering is done here.

use crate::core::{FeatureKind, FeatureRecord, Strand};
use crate::parsing::{parse_coordinate, parse_scrubbed_coordinate, ParseError};
use crate::utils::validation::check_record_limit;

const LST_HEADER: &str = "Gene    Strand    LeftEnd    RightEnd";
const BANNER: &str = "GeneMark.hmm";

/// How a specific LST variant deviates from the common table layout
struct LstFlavor {
    tool: &'static str,
    /// First line must contain the `GeneMark.hmm` banner
    requires_banner: bool,
    /// Table ends at the first blank line (vs. reading to EOF)
    stop_at_blank: bool,
    /// LeftEnd tokens may carry leading junk from truncated-gene notation
    scrub_left_end: bool,
}

/// Parse plain GeneMark LST output.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the column header is missing or a
/// data row is malformed.
pub fn parse_genemark(
    raw: &str,
    source: &str,
    total_length: u64,
) -> Result<Vec<FeatureRecord>, ParseError> {
    parse_lst(
        raw,
        source,
        total_length,
        &LstFlavor {
            tool: "genemark",
            requires_banner: false,
            stop_at_blank: true,
            scrub_left_end: false,
        },
    )
}

/// Parse GeneMark.hmm LST output.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the banner or column header is
/// missing or a data row is malformed.
pub fn parse_genemark_hmm(
    raw: &str,
    source: &str,
    total_length: u64,
) -> Result<Vec<FeatureRecord>, ParseError> {
    parse_lst(
        raw,
        source,
        total_length,
        &LstFlavor {
            tool: "genemark-hmm",
            requires_banner: true,
            stop_at_blank: false,
            scrub_left_end: true,
        },
    )
}

/// Parse GeneMarkS LST output.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the banner or column header is
/// missing or a data row is malformed.
pub fn parse_genemark_s(
    raw: &str,
    source: &str,
    total_length: u64,
) -> Result<Vec<FeatureRecord>, ParseError> {
    parse_lst(
        raw,
        source,
        total_length,
        &LstFlavor {
            tool: "genemark-s",
            requires_banner: true,
            stop_at_blank: false,
            scrub_left_end: false,
        },
    )
}

/// Parse GeneMark heuristic-model LST output.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the banner or column header is
/// missing or a data row is malformed.
pub fn parse_genemark_heuristic(
    raw: &str,
    source: &str,
    total_length: u64,
) -> Result<Vec<FeatureRecord>, ParseError> {
    parse_lst(
        raw,
        source,
        total_length,
        &LstFlavor {
            tool: "genemark-heuristic",
            requires_banner: true,
            stop_at_blank: false,
            scrub_left_end: false,
        },
    )
}

fn parse_lst(
    raw: &str,
    source: &str,
    total_length: u64,
    flavor: &LstFlavor,
) -> Result<Vec<FeatureRecord>, ParseError> {
    let lines: Vec<&str> = raw.lines().collect();

    if flavor.requires_banner && !lines.first().is_some_and(|l| l.contains(BANNER)) {
        return Err(ParseError::invalid_format(
            flavor.tool,
            format!("not a valid {BANNER} file: banner line missing"),
        ));
    }

    let header = lines
        .iter()
        .position(|line| line.contains(LST_HEADER))
        .ok_or_else(|| {
            ParseError::invalid_format(flavor.tool, "gene table column header not found")
        })?;

    // data begins two lines below the column header
    let mut records = Vec::new();
    for line in &lines[(header + 2).min(lines.len())..] {
        if line.trim().is_empty() {
            if flavor.stop_at_blank && !records.is_empty() {
                break;
            }
            continue;
        }

        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len()));
        }

        records.push(parse_lst_row(line, source, total_length, flavor)?);
    }

    Ok(records)
}

fn parse_lst_row(
    line: &str,
    source: &str,
    total_length: u64,
    flavor: &LstFlavor,
) -> Result<FeatureRecord, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(ParseError::invalid_format(
            flavor.tool,
            format!("expected 'gene strand left right' columns, got: {line}"),
        ));
    }

    let strand = parse_strand(flavor.tool, fields[1])?;
    let start = if flavor.scrub_left_end {
        parse_scrubbed_coordinate(flavor.tool, fields[2])?
    } else {
        parse_coordinate(flavor.tool, fields[2])?
    };
    let stop = parse_coordinate(flavor.tool, fields[3])?;

    Ok(FeatureRecord::new(
        start,
        stop,
        strand,
        FeatureKind::CodingGene,
        source,
        total_length,
    ))
}

/// Parse GeneMarkS-2 output.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the `SequenceID` header is missing
/// or a data row is malformed.
pub fn parse_genemark_s2(
    raw: &str,
    source: &str,
    total_length: u64,
) -> Result<Vec<FeatureRecord>, ParseError> {
    const TOOL: &str = "genemark-s2";

    let lines: Vec<&str> = raw.lines().collect();
    let header = lines
        .iter()
        .position(|line| line.contains("SequenceID"))
        .ok_or_else(|| ParseError::invalid_format(TOOL, "SequenceID header not found"))?;

    let mut records = Vec::new();
    for line in &lines[header + 1..] {
        // the table is followed by a '#'-prefixed comment block
        if line.contains('#') {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(ParseError::invalid_format(
                TOOL,
                format!("expected 'gene strand left right' columns, got: {line}"),
            ));
        }

        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len()));
        }

        let strand = parse_strand(TOOL, fields[1])?;
        let start = parse_coordinate(TOOL, fields[2])?;
        let stop = parse_coordinate(TOOL, fields[3])?;
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

fn parse_strand(tool: &'static str, token: &str) -> Result<Strand, ParseError> {
    match token {
        "+" => Ok(Strand::Forward),
        "-" => Ok(Strand::Reverse),
        other => Err(ParseError::invalid_format(
            tool,
            format!("invalid strand '{other}'"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HMM_OUTPUT: &str = "\
GeneMark.hmm PROKARYOTIC (Version 3.25)
Sequence: seq1
Model organism: Paenibacillus_larvae

   Gene    Strand    LeftEnd    RightEnd       Gene     Class
    #                                        Length

    1        +       <2          238          237        1
    2        -       317         1060         744        1
    3        +       1145        2087         943        2
";

    #[test]
    fn test_parse_genemark_hmm() {
        let records = parse_genemark_hmm(HMM_OUTPUT, "genemark-hmm", 50_000).unwrap();
        assert_eq!(records.len(), 3);

        // truncated-gene marker on the first LeftEnd
        assert_eq!(records[0].start, 2);
        assert_eq!(records[0].stop, 238);
        assert_eq!(records[0].strand, Strand::Forward);

        assert_eq!(records[1].start, 317);
        assert_eq!(records[1].stop, 1060);
        assert_eq!(records[1].strand, Strand::Reverse);
        assert_eq!(records[1].source, "genemark-hmm");
    }

    #[test]
    fn test_parse_genemark_hmm_requires_banner() {
        let raw = "something else\n   Gene    Strand    LeftEnd    RightEnd\n\n 1 + 2 10\n";
        assert!(parse_genemark_hmm(raw, "", 0).is_err());
    }

    #[test]
    fn test_parse_genemark_stops_at_blank() {
        let raw = "\
Sequence: seq1

   Gene    Strand    LeftEnd    RightEnd       Gene     Class

    1        +        100        450          351        1
    2        -        600        980          381        1

  trailing summary that must not be parsed
";
        let records = parse_genemark(raw, "genemark", 10_000).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].stop, 980);
    }

    #[test]
    fn test_parse_genemark_missing_header() {
        let result = parse_genemark("no table here\njust text\n", "", 0);
        assert!(matches!(result, Err(ParseError::InvalidFormat { .. })));
    }

    #[test]
    fn test_parse_genemark_s2() {
        let raw = "\
GeneMark.hmm-2 LST format
Model information: GeneMark.hmm-2 prokaryotic
SequenceID: seq1

 1  +  37    1488   1452  native
 2  -  1522  2070   549   native
# command line used: gms2.pl --seq test.fasta
";
        let records = parse_genemark_s2(raw, "genemark-s2", 60_000).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].start, 37);
        assert_eq!(records[0].stop, 1488);
        assert_eq!(records[1].strand, Strand::Reverse);
    }

    #[test]
    fn test_parse_genemark_s2_missing_header() {
        assert!(parse_genemark_s2("1 + 2 3\n", "", 0).is_err());
    }
}
