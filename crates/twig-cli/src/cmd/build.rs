use crate::cmd::{read_input, BuildFlags};
use crate::output::finish_build;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use twig_core::builder::{default_target, Builder};
use twig_core::config::TwigConfig;
use twig_core::parser::parse_str;

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Tree text file (default: stdin)
    pub file: Option<PathBuf>,

    /// Directory to build in (default: ./<root name>)
    #[arg(long, value_name = "DIR")]
    pub into: Option<PathBuf>,

    #[command(flatten)]
    pub build: BuildFlags,
}

pub fn run(config: &TwigConfig, args: BuildArgs, json: bool) -> anyhow::Result<()> {
    let text = read_input(args.file.as_deref())?;
    let root = parse_str(&text).context("failed to parse tree")?;

    let target = match args.into {
        Some(dir) => dir,
        None => default_target(&root).context("cannot build under the tree's root name")?,
    };
    let builder = Builder::new(args.build.apply(config.build));
    let report = builder
        .build(&root, &target)
        .with_context(|| format!("failed to build into {}", target.display()))?;

    finish_build(&report, json)
}
