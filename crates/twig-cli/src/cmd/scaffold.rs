use crate::cmd::{BuildFlags, LimitArgs};
use crate::output::finish_build;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use twig_core::builder::Builder;
use twig_core::config::TwigConfig;
use twig_core::expander::Expander;
use twig_core::node::{LeafKind, Node};

#[derive(Args, Debug)]
pub struct ScaffoldArgs {
    /// Brace patterns; a trailing '/' makes the path a directory
    #[arg(required = true)]
    pub patterns: Vec<String>,

    /// Directory to create the paths in
    #[arg(long, value_name = "DIR")]
    pub into: PathBuf,

    /// Create every expanded path as a directory
    #[arg(long)]
    pub dirs: bool,

    #[command(flatten)]
    pub limits: LimitArgs,

    #[command(flatten)]
    pub build: BuildFlags,
}

pub fn run(config: &TwigConfig, args: ScaffoldArgs, json: bool) -> anyhow::Result<()> {
    let expander = Expander::new(args.limits.apply(config.expand));
    let paths = expander
        .expand_all(&args.patterns)
        .context("failed to expand pattern")?;

    let leaf = if args.dirs { LeafKind::Dir } else { LeafKind::File };
    let root_name = args.into.display().to_string();
    let root = Node::from_paths(&root_name, &paths, leaf)?;

    let builder = Builder::new(args.build.apply(config.build));
    let report = builder
        .build(&root, &args.into)
        .with_context(|| format!("failed to scaffold into {}", args.into.display()))?;

    finish_build(&report, json)
}
