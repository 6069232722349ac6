//! # gene-consensus
//!
//! A library for reconciling gene predictions from multiple tools into a
//! single consensus annotation.
//!
//! Gene-prediction tools rarely agree exactly. Run half a dozen of them over
//! the same phage or bacterial sequence and most features are called by
//! several tools with the same stop codon but different start codons, some
//! by only one tool, and a few not at all. `gene-consensus` parses each
//! tool's native output format into a common record type, groups the calls
//! that refer to the same feature, filters groups by how many tools agree,
//! resolves each group to one representative call under a selectable policy,
//! and writes the result as a GenBank feature file.
//!
//! ## Features
//!
//! - **Ten input formats**: Glimmer, the GeneMark family (plain, .hmm, S,
//!   S-2, heuristic), Prodigal, RAST GFF3, Metagene, and Aragorn tRNA tables
//! - **Positional grouping**: calls sharing a strand and stop (forward) or
//!   start (reverse) are one feature, however much the other boundary varies
//! - **Selectable filters**: exactly/at-least/at-most *n* tools, all tools,
//!   or no filtering, with tRNA inclusion switched independently
//! - **Selectable resolution**: majority vote, longest call, or a preferred
//!   tool with majority fallback
//! - **Circular sequences**: calls spanning the origin get compound
//!   (`join`) GenBank locations
//! - **Fault isolation**: a tool whose output fails to parse is dropped from
//!   the run; the others still reach the consensus
//!
//! ## Example
//!
//! ```rust,no_run
//! use gene_consensus::consensus::{
//!     reconcile_tool_results, ConsensusOptions, CountFilter, ResolutionPolicy, RnaInclusion,
//! };
//! use gene_consensus::core::Tool;
//! use gene_consensus::parsing::{parse_tool_output, ToolResults};
//!
//! let sequence_length = 50_000;
//! let mut results = ToolResults::new();
//! for (tool, raw) in [
//!     (Tool::Glimmer, std::fs::read_to_string("phage.glimmer").unwrap()),
//!     (Tool::Prodigal, std::fs::read_to_string("phage.prodigal").unwrap()),
//! ] {
//!     results.insert(tool, parse_tool_output(tool, &raw, sequence_length));
//! }
//!
//! let options = ConsensusOptions {
//!     filter: CountFilter::AtLeast(2),
//!     rna: RnaInclusion::Include,
//!     policy: ResolutionPolicy::MajorityVote,
//!     enabled_tools: 2,
//! };
//! let consensus = reconcile_tool_results(&results, &options).unwrap();
//! for call in &consensus {
//!     println!("{} {}..{}", call.strand, call.start, call.stop);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Feature records, strands, kinds, and the tool roster
//! - [`parsing`]: One parser per tool output format, plus the genome FASTA
//!   reader
//! - [`consensus`]: The sort → group → filter → resolve pipeline
//! - [`export`]: GenBank serialization of the resolved calls
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod consensus;
pub mod core;
pub mod export;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::consensus::{
    ConsensusError, ConsensusOptions, CountFilter, ResolutionPolicy, RnaInclusion,
};
pub use crate::core::{FeatureKind, FeatureRecord, Strand, Tool};
pub use crate::export::ExportError;
pub use crate::parsing::{parse_tool_output, ParseError, ToolResults};
