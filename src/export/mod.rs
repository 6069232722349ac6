//! Serialization of resolved consensus calls to annotation files.

pub mod genbank;

pub use genbank::{write_genbank, write_genbank_to, ExportError};
