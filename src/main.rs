use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::{info, warn};
use std::path::{Path, PathBuf};

mod config;
mod corpus;
mod glyph;
mod layout;
mod model;
mod render;
mod topology;

use anyhow::Context;
use crate::layout::Layout;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "config-topology")]
#[command(about = "Network topology diagrams from device configuration dumps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Directory holding one configuration dump per device.
    #[arg(long)]
    config_dir: PathBuf,

    /// File suffix marking a dump; stripped from the file name to get the device name.
    #[arg(long, default_value = ".dump")]
    suffix: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the topology diagram (SVG, or an HTML report if OUT ends in .html).
    Render {
        #[command(flatten)]
        corpus: CorpusArgs,

        #[arg(short = 'o', long, default_value = "topology.svg")]
        out: PathBuf,

        #[arg(long, default_value = "Auto-Generated Network Topology")]
        title: String,

        /// Layout RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Layout iterations.
        #[arg(long, default_value_t = 50)]
        iterations: usize,

        #[arg(long, default_value_t = 1000)]
        width: u32,

        #[arg(long, default_value_t = 800)]
        height: u32,
    },

    /// Print the deduplicated link list without rendering.
    Links {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Render {
            corpus,
            out,
            title,
            seed,
            iterations,
            width,
            height,
        } => {
            // 1) Extract + assemble.
            let graph = build_graph(&corpus)?;
            if graph.is_empty() {
                warn!(
                    "No links found in {}; nothing to render",
                    corpus.config_dir.display()
                );
                return Ok(());
            }

            // 2) Layout.
            let positions = layout::SpringLayout { iterations, seed }.positions(&graph);

            // 3) View model.
            let view =
                model::build_view(&graph, &positions, &glyph::NamePrefixClassifier, &title)?;

            // 4) Render.
            let opts = render::RenderOptions { width, height };
            let doc = if is_html(&out) {
                render::render_html_report(&view, &opts)?
            } else {
                render::render_svg(&view, &opts)?
            };
            std::fs::write(&out, doc).with_context(|| format!("write {}", out.display()))?;
            println!("Wrote {}", out.display());
        }
        Commands::Links { corpus } => {
            let graph = build_graph(&corpus)?;
            for edge in graph.edges() {
                let (a, b) = edge.key.endpoints();
                println!("{} <-> {}\t{}", a, b, edge.label.replace('\n', " | "));
            }
        }
    }

    Ok(())
}

fn build_graph(args: &CorpusArgs) -> Result<topology::TopologyGraph> {
    let entries = corpus::load_corpus(&args.config_dir, &args.suffix)?;
    info!(
        "Loaded {} device configs from {}",
        entries.len(),
        args.config_dir.display()
    );

    let extractor = config::LinkExtractor::new()?;
    let graph = topology::assemble(
        entries
            .iter()
            .map(|e| (e.device.as_str(), extractor.extract(&e.device, &e.text))),
    );
    info!(
        "Topology: {} devices, {} links",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}
