//! Reader for the input genome FASTA using noodles.
//!
//! The first record in the file is the sequence being annotated; its length
//! feeds the wraparound arithmetic everywhere else. Supports both
//! uncompressed and gzip/bgzip compressed files.

use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;

use crate::parsing::ParseError;

/// The DNA sequence a run annotates
#[derive(Debug, Clone)]
pub struct GenomeSequence {
    /// Record name from the FASTA header
    pub name: String,
    /// Uppercase residues
    pub residues: String,
}

impl GenomeSequence {
    #[must_use]
    pub fn len(&self) -> u64 {
        self.residues.len() as u64
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

/// Check if the path is a gzipped file
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Read the first sequence from a FASTA file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidFormat` if it holds no sequences or is not FASTA.
pub fn read_genome(path: &Path) -> Result<GenomeSequence, ParseError> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        read_genome_from(BufReader::new(GzDecoder::new(file)))
    } else {
        read_genome_from(BufReader::new(file))
    }
}

fn read_genome_from<R: BufRead>(reader: R) -> Result<GenomeSequence, ParseError> {
    let mut fasta_reader = fasta::io::Reader::new(reader);

    for result in fasta_reader.records() {
        let record = result.map_err(|e| {
            ParseError::invalid_format("fasta", format!("failed to parse FASTA record: {e}"))
        })?;

        let name = String::from_utf8_lossy(record.name()).to_string();
        let residues = record
            .sequence()
            .as_ref()
            .iter()
            .map(u8::to_ascii_uppercase)
            .map(char::from)
            .collect();

        return Ok(GenomeSequence { name, residues });
    }

    Err(ParseError::invalid_format(
        "fasta",
        "no sequences found in FASTA file",
    ))
}
