//! annolink CLI — build token-link graphs from annotation documents.
//!
//! Usage:
//!   annolink parse <file|-> [--hide MENTION_ID]... [--config path] [--pretty]
//!   annolink summary <file|-> [--config path]

use annolink::{AnnotationGraph, BuilderConfig, GraphBuilder, MentionId};
use clap::{ArgAction, Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "annolink",
    version,
    about = "Token-link graph builder for annotated documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Path to a YAML builder configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and print the graph as JSON
    Parse {
        /// Document JSON file, or `-` for stdin
        input: PathBuf,
        /// Mention id to suppress (repeatable)
        #[arg(long = "hide", value_name = "MENTION_ID")]
        hide: Vec<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Parse a document and print element counts
    Summary {
        /// Document JSON file, or `-` for stdin
        input: PathBuf,
    },
}

/// Get the default config path (~/.config/annolink/config.yaml)
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("annolink").join("config.yaml"))
}

fn load_config(explicit: Option<PathBuf>) -> Result<BuilderConfig, String> {
    let path = match explicit.or_else(|| default_config_path().filter(|p| p.is_file())) {
        Some(path) => path,
        None => return Ok(BuilderConfig::default()),
    };
    tracing::info!(path = %path.display(), "loading config");
    BuilderConfig::load(&path)
        .map_err(|e| format!("Failed to load config '{}': {}", path.display(), e))
}

fn read_input(path: &Path) -> Result<String, String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        return Ok(text);
    }
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read '{}': {}", path.display(), e))
}

fn build_graph(
    config: BuilderConfig,
    input: &Path,
    hidden: &[MentionId],
) -> Result<AnnotationGraph, String> {
    let text = read_input(input)?;
    GraphBuilder::with_config(config)
        .parse_json(&text, hidden)
        .map_err(|e| format!("Failed to parse '{}': {}", input.display(), e))
}

fn cmd_parse(config: BuilderConfig, input: &Path, hide: Vec<String>, pretty: bool) -> i32 {
    let hidden: Vec<MentionId> = hide.into_iter().map(MentionId::from).collect();
    let graph = match build_graph(config, input, &hidden) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let rendered = if pretty {
        serde_json::to_string_pretty(&graph)
    } else {
        serde_json::to_string(&graph)
    };
    match rendered {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_summary(config: BuilderConfig, input: &Path) -> i32 {
    let graph = match build_graph(config, input, &[]) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    println!("{:<20}  {:>7}", "ELEMENT", "COUNT");
    println!("{}", "-".repeat(29));
    println!("{:<20}  {:>7}", "tokens", graph.token_count());
    println!("{:<20}  {:>7}", "dependency links", graph.dependency_links().count());
    println!("{:<20}  {:>7}", "mention links", graph.mention_links().count());
    println!("{:<20}  {:>7}", "clusters", graph.cluster_count());
    println!("{:<20}  {:>7}", "mentions", graph.available_mentions.len());
    0
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Parse { input, hide, pretty } => cmd_parse(config, &input, hide, pretty),
        Commands::Summary { input } => cmd_summary(config, &input),
    };
    std::process::exit(code);
}
