mod cmd;
mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cmd::{
    build::BuildArgs, config::ConfigSubcommand, expand::ExpandArgs, parse::ParseArgs,
    scaffold::ScaffoldArgs, tree::TreeArgs,
};
use std::path::PathBuf;
use twig_core::config::TwigConfig;

#[derive(Parser)]
#[command(
    name = "twig",
    about = "Expand brace patterns and scaffold directory trees",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: .twig.yaml here or in a parent, then ~/.twig.yaml)
    #[arg(long, global = true, env = "TWIG_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log every created or skipped entry to stderr
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every path a brace pattern expands to
    Expand(ExpandArgs),

    /// Expand brace patterns and create the resulting paths
    Scaffold(ScaffoldArgs),

    /// Parse tree text and print the structure it describes
    Parse(ParseArgs),

    /// Create the structure described by tree text
    Build(BuildArgs),

    /// Draw the tree of an existing directory
    Tree(TreeArgs),

    /// Inspect the effective configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = run(cli);

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to read working directory")?;
    let (config, source) =
        TwigConfig::resolve(cli.config.as_deref(), &cwd).context("failed to load config")?;

    match cli.command {
        Commands::Expand(args) => cmd::expand::run(&config, args, cli.json),
        Commands::Scaffold(args) => cmd::scaffold::run(&config, args, cli.json),
        Commands::Parse(args) => cmd::parse::run(&config, args, cli.json),
        Commands::Build(args) => cmd::build::run(&config, args, cli.json),
        Commands::Tree(args) => cmd::tree::run(&config, args, cli.json),
        Commands::Config { subcommand } => {
            cmd::config::run(&config, source.as_deref(), subcommand, cli.json)
        }
    }
}
