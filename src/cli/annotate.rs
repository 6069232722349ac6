use std::path::PathBuf;

use clap::Args;

use crate::cli::{OutputFormat, ToolInputs};
use crate::consensus::{
    reconcile_tool_results, ConsensusOptions, CountFilter, ResolutionPolicy, RnaInclusion,
};
use crate::core::{FeatureRecord, Tool};
use crate::export;
use crate::parsing::fasta::read_genome;

#[derive(Args)]
pub struct AnnotateArgs {
    /// Genome FASTA file (first record is annotated)
    #[arg(required = true)]
    pub genome: PathBuf,

    #[command(flatten)]
    pub tools: ToolInputs,

    /// How to filter feature groups by the number of agreeing tools
    #[arg(long, value_enum, default_value = "any")]
    pub filter: FilterKind,

    /// Bound for the exactly/at-least/at-most filters
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// How to resolve each group to one representative call
    #[arg(long, value_enum, default_value = "majority")]
    pub policy: PolicyKind,

    /// Tool whose calls win outright (requires --policy tool)
    #[arg(long)]
    pub prefer_tool: Option<Tool>,

    /// Drop tRNA calls instead of exporting them unconditionally
    #[arg(long)]
    pub exclude_trna: bool,

    /// Destination GenBank file
    #[arg(short, long, required = true)]
    pub output: PathBuf,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FilterKind {
    /// Keep features called by at least one tool
    Any,
    /// Keep only features called by every enabled tool
    All,
    /// Keep features called by exactly --count tools
    Exactly,
    /// Keep features called by at least --count tools
    AtLeast,
    /// Keep features called by at most --count tools
    AtMost,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum PolicyKind {
    /// Boundary pair most tools agree on; ties go to the longest call
    Majority,
    /// Longest call in each group
    Longest,
    /// Calls from --prefer-tool where available, majority elsewhere
    Tool,
}

/// Execute annotate subcommand
///
/// # Errors
///
/// Returns an error if the genome cannot be read, every tool output fails to
/// parse, option combinations are invalid, resolution detects an inconsistent
/// group, or the destination cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AnnotateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let genome = read_genome(&args.genome)?;
    if verbose {
        eprintln!(
            "Read sequence '{}' ({} bp) from {}",
            genome.name,
            genome.len(),
            args.genome.display()
        );
    }

    let enabled = args.tools.provided();
    if enabled.is_empty() {
        anyhow::bail!("no tool outputs provided; pass at least one --<tool> <file> option");
    }

    let results = args.tools.load(genome.len());
    let succeeded = results.values().filter(|outcome| outcome.is_ok()).count();
    if succeeded == 0 {
        anyhow::bail!("all {} tool outputs failed to parse", enabled.len());
    }
    if verbose {
        for (tool, outcome) in &results {
            match outcome {
                Ok(records) => eprintln!("  {tool}: {} calls", records.len()),
                Err(error) => eprintln!("  {tool}: FAILED ({error})"),
            }
        }
    }

    let options = ConsensusOptions {
        filter: build_filter(args.filter, args.count)?,
        rna: if args.exclude_trna {
            RnaInclusion::Exclude
        } else {
            RnaInclusion::Include
        },
        policy: build_policy(args.policy, args.prefer_tool)?,
        enabled_tools: enabled.len(),
    };

    let consensus = reconcile_tool_results(&results, &options)
        .map_err(|error| anyhow::anyhow!("consensus resolution failed: {error}"))?;

    export::write_genbank(&genome.residues, &consensus, &args.output).map_err(|error| {
        anyhow::anyhow!("writing {} failed: {error}", args.output.display())
    })?;

    match format {
        OutputFormat::Text => {
            println!(
                "Wrote {} consensus calls ({} tools succeeded, filter: {}) to {}",
                consensus.len(),
                succeeded,
                options.filter,
                args.output.display()
            );
        }
        OutputFormat::Json => print_json_features(&consensus)?,
        OutputFormat::Tsv => print_tsv_features(&consensus),
    }

    Ok(())
}

pub(crate) fn build_filter(kind: FilterKind, count: Option<usize>) -> anyhow::Result<CountFilter> {
    let bound = |kind: &str| {
        count.ok_or_else(|| anyhow::anyhow!("--count is required with --filter {kind}"))
    };

    Ok(match kind {
        FilterKind::Any => CountFilter::Any,
        FilterKind::All => CountFilter::All,
        FilterKind::Exactly => CountFilter::Exactly(bound("exactly")?),
        FilterKind::AtLeast => CountFilter::AtLeast(bound("at-least")?),
        FilterKind::AtMost => CountFilter::AtMost(bound("at-most")?),
    })
}

pub(crate) fn build_policy(
    kind: PolicyKind,
    prefer: Option<Tool>,
) -> anyhow::Result<ResolutionPolicy> {
    Ok(match kind {
        PolicyKind::Majority => ResolutionPolicy::MajorityVote,
        PolicyKind::Longest => ResolutionPolicy::Longest,
        PolicyKind::Tool => {
            let tool = prefer
                .ok_or_else(|| anyhow::anyhow!("--prefer-tool is required with --policy tool"))?;
            ResolutionPolicy::PreferredTool(tool)
        }
    })
}

fn print_json_features(features: &[FeatureRecord]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(features)?);
    Ok(())
}

fn print_tsv_features(features: &[FeatureRecord]) {
    println!("strand\tstart\tstop\tlength\tsource");
    for feature in features {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            feature.strand, feature.start, feature.stop, feature.length, feature.source
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_requires_bound() {
        assert!(build_filter(FilterKind::Exactly, None).is_err());
        assert!(build_filter(FilterKind::AtLeast, None).is_err());
        assert_eq!(
            build_filter(FilterKind::AtLeast, Some(3)).unwrap(),
            CountFilter::AtLeast(3)
        );
        assert_eq!(build_filter(FilterKind::Any, None).unwrap(), CountFilter::Any);
    }

    #[test]
    fn test_build_policy_requires_tool() {
        assert!(build_policy(PolicyKind::Tool, None).is_err());
        assert_eq!(
            build_policy(PolicyKind::Tool, Some(Tool::Rast)).unwrap(),
            ResolutionPolicy::PreferredTool(Tool::Rast)
        );
        assert_eq!(
            build_policy(PolicyKind::Majority, None).unwrap(),
            ResolutionPolicy::MajorityVote
        );
    }
}
