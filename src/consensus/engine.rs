use thiserror::Error;

use crate::consensus::policy::{CountFilter, ResolutionPolicy, RnaInclusion};
use crate::core::{FeatureRecord, Tool};
use crate::parsing::ToolResults;

/// Records that are pairwise calls of the same feature, in sorted order.
/// Transient: produced by grouping, consumed by filtering and resolution.
pub type FeatureGroup = Vec<FeatureRecord>;

#[derive(Error, Debug)]
pub enum ConsensusError {
    #[error("cannot resolve an empty feature group")]
    EmptyGroup,

    /// Grouping produced a group whose members are not mutually calls of the
    /// same feature. Indicates a bug in the grouping step; never expected in
    /// a real run, but checked before every resolution.
    #[error("mismatched features in group: {first} does not match {second}")]
    MismatchedFeatures { first: String, second: String },
}

/// Knobs for one consensus run
#[derive(Debug, Clone)]
pub struct ConsensusOptions {
    pub filter: CountFilter,
    pub rna: RnaInclusion,
    pub policy: ResolutionPolicy,
    /// Number of tools enabled for the run; the bound for [`CountFilter::All`]
    pub enabled_tools: usize,
}

/// Sort records by their comparison coordinate, ascending.
///
/// The sort is stable, so within a coordinate the per-tool input order is
/// preserved, and grouping and majority tallies see a deterministic order.
#[must_use]
pub fn sort_records(mut records: Vec<FeatureRecord>) -> Vec<FeatureRecord> {
    records.sort_by_key(FeatureRecord::comparison_coordinate);
    records
}

/// Group consecutive same-feature records of a sorted stream.
///
/// Walks adjacency rather than hashing on the coordinate, so duplicates that
/// were never brought together by sorting cannot be silently merged.
#[must_use]
pub fn group_records(sorted: Vec<FeatureRecord>) -> Vec<FeatureGroup> {
    let mut groups: Vec<FeatureGroup> = Vec::new();

    for record in sorted {
        match groups.last_mut() {
            Some(group) if group.last().is_some_and(|prev| prev.same_feature(&record)) => {
                group.push(record);
            }
            _ => groups.push(vec![record]),
        }
    }

    groups
}

/// Apply the count filter and the RNA inclusion switch to each group.
///
/// A group made up entirely of structural-RNA calls bypasses the numeric
/// filter when RNA is included and is dropped outright when it is excluded;
/// every other group stands or falls on the count filter alone.
#[must_use]
pub fn filter_groups(
    groups: Vec<FeatureGroup>,
    filter: CountFilter,
    rna: RnaInclusion,
    enabled_tools: usize,
) -> Vec<FeatureGroup> {
    groups
        .into_iter()
        .filter(|group| {
            if group.iter().all(|record| record.kind.is_rna()) && !group.is_empty() {
                return rna == RnaInclusion::Include;
            }
            filter.keeps(group.len(), enabled_tools)
        })
        .collect()
}

/// Pick the representative call for one group according to `policy`.
///
/// # Errors
///
/// Returns [`ConsensusError::EmptyGroup`] on an empty group and
/// [`ConsensusError::MismatchedFeatures`] if the group's members are not
/// mutually calls of the same feature.
pub fn resolve_group(
    group: &[FeatureRecord],
    policy: ResolutionPolicy,
) -> Result<FeatureRecord, ConsensusError> {
    check_group(group)?;

    match policy {
        ResolutionPolicy::MajorityVote => resolve_majority(group),
        ResolutionPolicy::Longest => resolve_longest(group),
        ResolutionPolicy::PreferredTool(tool) => resolve_preferred(group, tool),
    }
}

/// Full pipeline over an already-merged record stream:
/// sort, group, filter, resolve.
///
/// # Errors
///
/// Propagates resolution errors; see [`resolve_group`].
pub fn reconcile(
    records: Vec<FeatureRecord>,
    options: &ConsensusOptions,
) -> Result<Vec<FeatureRecord>, ConsensusError> {
    let groups = filter_groups(
        group_records(sort_records(records)),
        options.filter,
        options.rna,
        options.enabled_tools,
    );

    groups
        .iter()
        .map(|group| resolve_group(group, options.policy))
        .collect()
}

/// Merge every successful tool's records and reconcile them.
///
/// Failed tools contribute nothing; isolating their errors is the caller's
/// concern (they arrive here as data, not as propagated failures).
///
/// # Errors
///
/// Propagates resolution errors; see [`resolve_group`].
pub fn reconcile_tool_results(
    results: &ToolResults,
    options: &ConsensusOptions,
) -> Result<Vec<FeatureRecord>, ConsensusError> {
    let merged: Vec<FeatureRecord> = results
        .values()
        .filter_map(|outcome| outcome.as_ref().ok())
        .flatten()
        .cloned()
        .collect();

    reconcile(merged, options)
}

/// Defensive mutual-identity check over a group
fn check_group(group: &[FeatureRecord]) -> Result<(), ConsensusError> {
    let first = group.first().ok_or(ConsensusError::EmptyGroup)?;

    for record in &group[1..] {
        if !first.same_feature(record) {
            return Err(ConsensusError::MismatchedFeatures {
                first: first.to_string(),
                second: record.to_string(),
            });
        }
    }

    Ok(())
}

fn resolve_majority(group: &[FeatureRecord]) -> Result<FeatureRecord, ConsensusError> {
    // tally distinct boundary pairs in first-encounter order
    let mut tallies: Vec<(&FeatureRecord, usize)> = Vec::new();
    for record in group {
        match tallies
            .iter_mut()
            .find(|(seen, _)| seen.boundary_key() == record.boundary_key())
        {
            Some((_, count)) => *count += 1,
            None => tallies.push((record, 1)),
        }
    }

    let (mut best, mut best_count) = tallies[0];
    for &(record, count) in &tallies[1..] {
        if count > best_count || (count == best_count && record.length > best.length) {
            best = record;
            best_count = count;
        }
    }

    Ok(best.clone())
}

fn resolve_longest(group: &[FeatureRecord]) -> Result<FeatureRecord, ConsensusError> {
    let mut longest = &group[0];
    for record in &group[1..] {
        if record.length > longest.length {
            longest = record;
        }
    }
    Ok(longest.clone())
}

fn resolve_preferred(
    group: &[FeatureRecord],
    tool: Tool,
) -> Result<FeatureRecord, ConsensusError> {
    match group.iter().find(|record| record.source == tool.id()) {
        Some(record) => Ok(record.clone()),
        None => resolve_majority(group),
    }
}
