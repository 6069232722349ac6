use clap::Parser;
use tracing_subscriber::EnvFilter;

use gene_consensus::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("gene_consensus=debug,info")
    } else {
        EnvFilter::new("gene_consensus=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Annotate(args) => {
            cli::annotate::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Calls(args) => {
            cli::calls::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
