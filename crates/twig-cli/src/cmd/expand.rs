use crate::cmd::LimitArgs;
use crate::output::print_json;
use anyhow::Context;
use clap::Args;
use twig_core::config::TwigConfig;
use twig_core::expander::Expander;
use twig_core::formatter::format_tree;
use twig_core::node::{LeafKind, Node};

#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// Brace patterns, e.g. 'src/{cmd,pkg}/{main,util}.rs'
    #[arg(required = true)]
    pub patterns: Vec<String>,

    /// Sort the expanded paths
    #[arg(long)]
    pub sort: bool,

    /// Render the expanded paths as a tree
    #[arg(long)]
    pub tree: bool,

    #[command(flatten)]
    pub limits: LimitArgs,
}

pub fn run(config: &TwigConfig, args: ExpandArgs, json: bool) -> anyhow::Result<()> {
    let expander = Expander::new(args.limits.apply(config.expand));
    let mut paths = expander
        .expand_all(&args.patterns)
        .context("failed to expand pattern")?;

    if args.sort {
        paths.sort();
    }

    if json {
        return print_json(&paths);
    }

    if args.tree {
        let root = Node::from_paths(".", &paths, LeafKind::File)?;
        print!("{}", format_tree(&root, &config.format));
        return Ok(());
    }

    for path in &paths {
        println!("{path}");
    }
    Ok(())
}
