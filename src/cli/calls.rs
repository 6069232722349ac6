use std::path::PathBuf;

use clap::Args;

use crate::cli::{OutputFormat, ToolInputs};
use crate::consensus::{group_records, sort_records, FeatureGroup};
use crate::core::FeatureRecord;
use crate::parsing::fasta::read_genome;

#[derive(Args)]
pub struct CallsArgs {
    /// Genome FASTA file (first record is annotated)
    #[arg(required = true)]
    pub genome: PathBuf,

    #[command(flatten)]
    pub tools: ToolInputs,
}

/// Execute calls subcommand
///
/// # Errors
///
/// Returns an error if the genome cannot be read or every tool output fails
/// to parse.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CallsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let genome = read_genome(&args.genome)?;

    let enabled = args.tools.provided();
    if enabled.is_empty() {
        anyhow::bail!("no tool outputs provided; pass at least one --<tool> <file> option");
    }

    let results = args.tools.load(genome.len());
    if results.values().all(|outcome| outcome.is_err()) {
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

    let merged: Vec<FeatureRecord> = results
        .values()
        .filter_map(|outcome| outcome.as_ref().ok())
        .flatten()
        .cloned()
        .collect();
    let groups = group_records(sort_records(merged));

    match format {
        OutputFormat::Text => print_text_groups(&groups),
        OutputFormat::Json => print_json_groups(&groups)?,
        OutputFormat::Tsv => print_tsv_groups(&groups),
    }

    Ok(())
}

fn print_text_groups(groups: &[FeatureGroup]) {
    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            println!();
        }
        println!(
            "#{} {} strand, coordinate {} ({} tools)",
            index + 1,
            group[0].strand,
            group[0].comparison_coordinate(),
            group.len()
        );
        for record in group {
            println!(
                "   {:<20} {}..{} ({} bp)",
                record.source, record.start, record.stop, record.length
            );
        }
    }
    println!("\n{} distinct features", groups.len());
}

fn print_json_groups(groups: &[FeatureGroup]) -> anyhow::Result<()> {
    let output: Vec<serde_json::Value> = groups
        .iter()
        .map(|group| {
            serde_json::json!({
                "strand": group[0].strand,
                "coordinate": group[0].comparison_coordinate(),
                "agreement": group.len(),
                "calls": group,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_groups(groups: &[FeatureGroup]) {
    println!("group\tagreement\tsource\tstrand\tstart\tstop\tlength");
    for (index, group) in groups.iter().enumerate() {
        for record in group {
            println!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                index + 1,
                group.len(),
                record.source,
                record.strand,
                record.start,
                record.stop,
                record.length
            );
        }
    }
}
