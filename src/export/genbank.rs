//! GenBank export of resolved consensus calls.
//!
//! The heavy lifting (feature-table layout, qualifier folding, ORIGIN block)
//! belongs to the `gb-io` crate; this module only computes locations and
//! qualifiers. Each consensus call becomes a `gene` feature plus a
//! kind-specific feature (`CDS` for coding genes, `tRNA` for structural
//! RNAs), numbered in output order through the `gene` qualifier.
//!
//! Calls whose reported stop lies numerically before their start span the
//! origin of a circular sequence and are written as a two-segment `join`
//! location. Reverse-strand calls are wrapped in `complement`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use std::borrow::Cow as GbFeatureKind;

use gb_io::seq::{Feature, Location, Seq, Topology};
use thiserror::Error;

use crate::core::{FeatureKind, FeatureRecord, Strand};
use crate::utils::validation::sanitize_locus_name;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write `features` plus the raw sequence to `destination` as GenBank.
///
/// The record name is the destination's base name with whitespace mapped to
/// underscores (the LOCUS field forbids spaces; the file name is left as
/// given).
///
/// # Errors
///
/// Returns `ExportError::Io` if the destination cannot be created or written.
pub fn write_genbank(
    sequence: &str,
    features: &[FeatureRecord],
    destination: &Path,
) -> Result<(), ExportError> {
    let locus_name = destination
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();

    let file = File::create(destination)?;
    write_genbank_to(file, sequence, features, &locus_name)
}

/// Like [`write_genbank`], but to any writer and with an explicit record name
///
/// # Errors
///
/// Returns `ExportError::Io` on write failure.
pub fn write_genbank_to<W: Write>(
    writer: W,
    sequence: &str,
    features: &[FeatureRecord],
    locus_name: &str,
) -> Result<(), ExportError> {
    let record = build_record(sequence, features, locus_name);
    gb_io::writer::write(writer, &record)?;
    Ok(())
}

fn build_record(sequence: &str, features: &[FeatureRecord], locus_name: &str) -> Seq {
    // annotation order is by reported start, not by comparison coordinate
    let mut ordered: Vec<&FeatureRecord> = features.iter().collect();
    ordered.sort_by_key(|record| record.start);

    let mut gb_features = Vec::with_capacity(ordered.len() * 2);
    for (index, record) in ordered.iter().enumerate() {
        let number = (index + 1).to_string();
        let location = feature_location(record, sequence.len() as u64);

        gb_features.push(Feature {
            kind: GbFeatureKind::from("gene"),
            location: location.clone(),
            qualifiers: vec![("gene".into(), Some(number.clone()))],
        });
        gb_features.push(typed_feature(record, location, &number));
    }

    Seq {
        name: Some(sanitize_locus_name(locus_name)),
        topology: Topology::Linear,
        date: None,
        len: Some(sequence.len()),
        molecule_type: Some("DNA".to_string()),
        division: String::new(),
        definition: None,
        accession: None,
        version: None,
        source: None,
        dblink: None,
        keywords: None,
        references: vec![],
        comments: vec![],
        seq: sequence.as_bytes().to_vec(),
        contig: None,
        features: gb_features,
    }
}

/// 1-based inclusive reported coordinates to a gb-io location, splitting
/// origin-wrapping spans into a two-segment join
fn feature_location(record: &FeatureRecord, sequence_length: u64) -> Location {
    let span = if record.start > record.stop {
        Location::Join(vec![
            Location::simple_range(record.start as i64 - 1, sequence_length as i64),
            Location::simple_range(0, record.stop as i64),
        ])
    } else {
        Location::simple_range(record.start as i64 - 1, record.stop as i64)
    };

    match record.strand {
        Strand::Forward => span,
        Strand::Reverse => Location::Complement(Box::new(span)),
    }
}

fn typed_feature(record: &FeatureRecord, location: Location, number: &str) -> Feature {
    match &record.kind {
        FeatureKind::CodingGene => Feature {
            kind: GbFeatureKind::from("CDS"),
            location,
            qualifiers: vec![("gene".into(), Some(number.to_string()))],
        },
        FeatureKind::StructuralRna { rna_type } => {
            let product = rna_type
                .split('(')
                .next()
                .unwrap_or(rna_type)
                .trim()
                .to_string();
            Feature {
                kind: GbFeatureKind::from("tRNA"),
                location,
                qualifiers: vec![
                    ("gene".into(), Some(number.to_string())),
                    ("product".into(), Some(product)),
                    ("note".into(), Some(rna_type.clone())),
                ],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(sequence: &str, features: &[FeatureRecord], locus: &str) -> String {
        let mut out = Vec::new();
        write_genbank_to(&mut out, sequence, features, locus).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_coding_gene_single_segment() {
        let sequence = "ACGT".repeat(300);
        let gene = FeatureRecord::new(
            100,
            450,
            Strand::Forward,
            FeatureKind::CodingGene,
            "glimmer",
            sequence.len() as u64,
        );

        let text = render(&sequence, &[gene], "phage_x");
        assert!(text.contains("LOCUS"));
        assert!(text.contains("phage_x"));
        assert!(text.contains("gene            100..450"));
        assert!(text.contains("CDS             100..450"));
        assert!(text.contains("/gene="));
    }

    #[test]
    fn test_trna_reverse_strand() {
        let sequence = "ACGT".repeat(300);
        let rna = FeatureRecord::new(
            980,
            1020,
            Strand::Reverse,
            FeatureKind::StructuralRna {
                rna_type: "Ala(cgc)".to_string(),
            },
            "aragorn",
            sequence.len() as u64,
        );

        let text = render(&sequence, &[rna], "phage_x");
        assert!(text.contains("tRNA            complement(980..1020)"));
        assert!(text.contains("/product=\"Ala\""));
        assert!(text.contains("/note=\"Ala(cgc)\""));
        // single segment, no join
        assert!(!text.contains("join"));
    }

    #[test]
    fn test_wraparound_compound_location() {
        let sequence = "ACGT".repeat(2500); // 10 kb
        let gene = FeatureRecord::new(
            9995,
            12,
            Strand::Forward,
            FeatureKind::CodingGene,
            "prodigal",
            sequence.len() as u64,
        );
        assert_eq!(gene.length, 18);

        let text = render(&sequence, &[gene], "phage_x");
        assert!(text.contains("join(9995..10000,1..12)"));
    }

    #[test]
    fn test_features_ordered_by_start() {
        let sequence = "ACGT".repeat(500);
        let late = FeatureRecord::new(
            900,
            1200,
            Strand::Forward,
            FeatureKind::CodingGene,
            "",
            sequence.len() as u64,
        );
        let early = FeatureRecord::new(
            100,
            450,
            Strand::Forward,
            FeatureKind::CodingGene,
            "",
            sequence.len() as u64,
        );

        let text = render(&sequence, &[late, early], "phage_x");
        let first = text.find("100..450").unwrap();
        let second = text.find("900..1200").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_locus_name_whitespace_replaced() {
        let sequence = "ACGTACGT";
        let text = render(sequence, &[], "my phage draft");
        assert!(text.contains("my_phage_draft"));
    }
}
