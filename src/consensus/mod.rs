//! Consensus engine: reduce the merged call stream to one representative
//! record per distinct feature.
//!
//! The pipeline is a pure function of its inputs, with no persistent state:
//!
//! 1. **Sort** all records by the comparison coordinate (stop for forward
//!    strand, start for reverse), ascending.
//! 2. **Group** the sorted stream by walking adjacency: a record that is the
//!    same feature as its predecessor joins the open group, anything else
//!    opens a new one.
//! 3. **Filter** each group on its size against a [`CountFilter`], with
//!    structural-RNA groups toggled independently by [`RnaInclusion`].
//! 4. **Resolve** each surviving group to a single call via a
//!    [`ResolutionPolicy`].
//!
//! ## Example
//!
//! ```rust
//! use gene_consensus::consensus::{
//!     reconcile, ConsensusOptions, CountFilter, ResolutionPolicy, RnaInclusion,
//! };
//! use gene_consensus::core::{FeatureKind, FeatureRecord, Strand};
//!
//! let calls = vec![
//!     FeatureRecord::new(100, 450, Strand::Forward, FeatureKind::CodingGene, "glimmer", 50_000),
//!     FeatureRecord::new(97, 450, Strand::Forward, FeatureKind::CodingGene, "prodigal", 50_000),
//!     FeatureRecord::new(100, 450, Strand::Forward, FeatureKind::CodingGene, "rast", 50_000),
//! ];
//!
//! let options = ConsensusOptions {
//!     filter: CountFilter::AtLeast(2),
//!     rna: RnaInclusion::Include,
//!     policy: ResolutionPolicy::MajorityVote,
//!     enabled_tools: 3,
//! };
//! let consensus = reconcile(calls, &options).unwrap();
//! assert_eq!(consensus.len(), 1);
//! assert_eq!(consensus[0].start, 100);
//! ```

pub mod engine;
pub mod policy;

pub use engine::{
    filter_groups, group_records, reconcile, reconcile_tool_results, resolve_group, sort_records,
    ConsensusError, ConsensusOptions, FeatureGroup,
};
pub use policy::{CountFilter, ResolutionPolicy, RnaInclusion};
