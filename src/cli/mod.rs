//! Command-line interface for gene-consensus.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **annotate**: Run the full pipeline: parse every provided tool output,
//!   reconcile the calls, and write a consensus GenBank file
//! - **calls**: Parse the provided tool outputs and print the merged,
//!   grouped call table with per-group agreement counts
//!
//! ## Usage
//!
//! ```text
//! # Consensus over three tools, keeping features called by at least two
//! gene-consensus annotate phage.fasta \
//!     --glimmer runs/phage.glimmer \
//!     --prodigal runs/phage.prodigal \
//!     --genemark-hmm runs/phage.hmm \
//!     --filter at-least --count 2 \
//!     --output phage.gb
//!
//! # Prefer RAST's boundaries wherever RAST made a call
//! gene-consensus annotate phage.fasta --rast runs/phage.gff \
//!     --prodigal runs/phage.prodigal \
//!     --policy tool --prefer-tool rast --output phage.gb
//!
//! # Inspect agreement before exporting
//! gene-consensus calls phage.fasta --glimmer runs/phage.glimmer \
//!     --prodigal runs/phage.prodigal --format tsv
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::core::Tool;
use crate::parsing::{self, ToolResults};

pub mod annotate;
pub mod calls;

#[derive(Parser)]
#[command(name = "gene-consensus")]
#[command(version)]
#[command(about = "Reconcile gene predictions from multiple tools into consensus annotations")]
#[command(
    long_about = "gene-consensus aggregates the saved output files of gene-prediction tools run \
against one DNA sequence, groups calls that refer to the same feature despite differing \
boundary predictions, filters the groups by how many tools agree, resolves each group to a \
single representative call, and exports the result as a GenBank feature file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile tool outputs and write a consensus GenBank file
    Annotate(annotate::AnnotateArgs),

    /// Print the merged, grouped call table without exporting
    Calls(calls::CallsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// One optional saved-output file per supported tool.
///
/// Whichever files are provided define the enabled-tool set for the run;
/// everything else stays out of the consensus entirely.
#[derive(clap::Args)]
pub struct ToolInputs {
    /// Glimmer output file
    #[arg(long, value_name = "FILE")]
    pub glimmer: Option<PathBuf>,

    /// GeneMark output file
    #[arg(long, value_name = "FILE")]
    pub genemark: Option<PathBuf>,

    /// GeneMark.hmm output file
    #[arg(long, value_name = "FILE")]
    pub genemark_hmm: Option<PathBuf>,

    /// GeneMarkS output file
    #[arg(long, value_name = "FILE")]
    pub genemark_s: Option<PathBuf>,

    /// GeneMarkS-2 output file
    #[arg(long, value_name = "FILE")]
    pub genemark_s2: Option<PathBuf>,

    /// GeneMark heuristic-model output file
    #[arg(long, value_name = "FILE")]
    pub genemark_heuristic: Option<PathBuf>,

    /// Prodigal output file
    #[arg(long, value_name = "FILE")]
    pub prodigal: Option<PathBuf>,

    /// RAST GFF3 export file
    #[arg(long, value_name = "FILE")]
    pub rast: Option<PathBuf>,

    /// Metagene output file
    #[arg(long, value_name = "FILE")]
    pub metagene: Option<PathBuf>,

    /// Aragorn tRNA output file
    #[arg(long, value_name = "FILE")]
    pub aragorn: Option<PathBuf>,
}

impl ToolInputs {
    /// The tools a file was provided for, in canonical order
    #[must_use]
    pub fn provided(&self) -> Vec<(Tool, &Path)> {
        let paths: [(Tool, &Option<PathBuf>); 10] = [
            (Tool::Glimmer, &self.glimmer),
            (Tool::GeneMark, &self.genemark),
            (Tool::GeneMarkHmm, &self.genemark_hmm),
            (Tool::GeneMarkS, &self.genemark_s),
            (Tool::GeneMarkS2, &self.genemark_s2),
            (Tool::GeneMarkHeuristic, &self.genemark_heuristic),
            (Tool::Prodigal, &self.prodigal),
            (Tool::Rast, &self.rast),
            (Tool::Metagene, &self.metagene),
            (Tool::Aragorn, &self.aragorn),
        ];

        paths
            .into_iter()
            .filter_map(|(tool, path)| path.as_deref().map(|p| (tool, p)))
            .collect()
    }

    /// Read and parse every provided file.
    ///
    /// Failures (unreadable file or unparseable content) are isolated to
    /// the owning tool: they land as that tool's error entry and are logged,
    /// never propagated, so the remaining tools still reach the consensus.
    #[must_use]
    pub fn load(&self, total_length: u64) -> ToolResults {
        let mut results = ToolResults::new();

        for (tool, path) in self.provided() {
            let outcome = std::fs::read_to_string(path)
                .map_err(parsing::ParseError::from)
                .and_then(|raw| parsing::parse_tool_output(tool, &raw, total_length));

            if let Err(error) = &outcome {
                warn!(tool = %tool, path = %path.display(), %error, "tool output skipped");
            }
            results.insert(tool, outcome);
        }

        results
    }
}
