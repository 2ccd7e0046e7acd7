use clap::Parser;
use page_equivalence::cli::commands::{cmd_analyze, cmd_cluster, cmd_fingerprint};
use page_equivalence::cli::config::{load_config, Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Analyze {
            graph,
            threshold,
            format,
            output,
        } => {
            cmd_analyze(
                &graph,
                threshold,
                &format,
                output.as_deref(),
                &config,
                cli.verbose,
            )?;
        }
        Commands::Cluster {
            graph,
            threshold,
            max_pages,
        } => {
            cmd_cluster(&graph, threshold, max_pages, &config, cli.verbose)?;
        }
        Commands::Fingerprint { graph, output } => {
            cmd_fingerprint(&graph, output.as_deref(), &config, cli.verbose)?;
        }
    }

    Ok(())
}
