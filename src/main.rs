use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use melgraph::export::{self, ExportFormat};
use melgraph::filter::{filter_graph, FilterRequest};
use melgraph::loader;

#[derive(Parser)]
#[command(name = "melgraph")]
#[command(version = "0.1.0")]
#[command(about = "Dependency graph model and filter engine for Emacs package archives", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Path to the package archive document
    #[arg(long, default_value = "archive.json")]
    archive: PathBuf,

    /// Path to the download-count document
    #[arg(long, default_value = "download_counts.json")]
    downloads: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Print summary statistics for the dependency graph
    Stats {
        #[command(flatten)]
        sources: SourceArgs,
    },
    /// Filter the graph and export the matching subgraph
    Filter {
        #[command(flatten)]
        sources: SourceArgs,

        /// Focus package name; empty selects the whole graph
        #[arg(short, long, default_value = "")]
        search: String,

        /// Minimum download count a package must have to stay visible
        #[arg(long, default_value_t = 0)]
        min_downloads: u64,

        /// Drop packages without download data
        #[arg(long)]
        known_downloads_only: bool,

        /// Do not follow dependency (parent) edges from the focus
        #[arg(long)]
        no_ancestors: bool,

        /// Do not follow dependent (child) edges from the focus
        #[arg(long)]
        no_descendants: bool,

        /// Output format: json or dot
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { sources } => {
            let graph = loader::load_graph(&sources.archive, &sources.downloads)
                .await
                .context("failed to initialize the dependency model")?;

            let synthesized = graph.nodes().filter(|n| n.synthesized).count();
            let with_downloads = graph.nodes().filter(|n| n.has_downloads()).count();

            println!("packages:         {}", graph.node_count());
            println!("  synthesized:    {}", synthesized);
            println!("  with downloads: {}", with_downloads);
            println!("dependency edges: {}", graph.edge_count());
            println!("cyclic packages:  {}", graph.nodes_in_cycles().len());
        }
        Commands::Filter {
            sources,
            search,
            min_downloads,
            known_downloads_only,
            no_ancestors,
            no_descendants,
            format,
            output,
        } => {
            let format: ExportFormat = format
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;

            let graph = loader::load_graph(&sources.archive, &sources.downloads)
                .await
                .context("failed to initialize the dependency model")?;

            let request = FilterRequest {
                search,
                min_downloads,
                exclude_unknown_downloads: known_downloads_only,
                include_ancestors: !no_ancestors,
                include_descendants: !no_descendants,
            };
            let response = filter_graph(&graph, &request);

            if response.is_empty() && !response.search.is_empty() {
                eprintln!("No packages matched the query.");
            }

            match output {
                Some(path) => {
                    let mut file = File::create(&path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    export::export(format, &response, &mut file)?;
                }
                None => {
                    let stdout = io::stdout();
                    let mut handle = stdout.lock();
                    export::export(format, &response, &mut handle)?;
                    handle.flush()?;
                }
            }
        }
    }

    Ok(())
}
