use crate::cmd::read_input;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use twig_core::config::TwigConfig;
use twig_core::formatter::{format_json, format_paths, format_tree};
use twig_core::parser::parse_str;

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Tree text file (default: stdin)
    pub file: Option<PathBuf>,

    /// Print one path per line instead of redrawing the tree
    #[arg(long)]
    pub paths: bool,

    /// Finish with a directory/file count
    #[arg(long)]
    pub stats: bool,
}

pub fn run(config: &TwigConfig, args: ParseArgs, json: bool) -> anyhow::Result<()> {
    let text = read_input(args.file.as_deref())?;
    let root = parse_str(&text).context("failed to parse tree")?;

    if json {
        println!("{}", format_json(&root)?);
    } else if args.paths {
        print!("{}", format_paths(&root));
    } else {
        let mut options = config.format;
        options.show_stats |= args.stats;
        print!("{}", format_tree(&root, &options));
    }
    Ok(())
}
