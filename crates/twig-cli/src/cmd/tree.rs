use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use twig_core::config::TwigConfig;
use twig_core::formatter::{format_json, format_tree};
use twig_core::scanner::{ScanOptions, Scanner};

#[derive(Args, Debug, Default)]
pub struct TreeArgs {
    /// Directory to list (default: current directory)
    pub path: Option<PathBuf>,

    /// Include entries whose names start with `.`
    #[arg(long, short = 'a')]
    pub all: bool,

    /// List directories only
    #[arg(long)]
    pub dirs_only: bool,

    /// Descend at most N levels
    #[arg(long, short = 'L', value_name = "N")]
    pub level: Option<usize>,

    /// Extra glob patterns to leave out, comma-separated
    #[arg(long, short = 'i', value_delimiter = ',', value_name = "PATTERNS")]
    pub ignore: Vec<String>,

    /// Drop the configured ignore patterns
    #[arg(long)]
    pub no_ignore: bool,

    /// Stop after N entries (0 = unlimited)
    #[arg(long, value_name = "N")]
    pub max_files: Option<usize>,

    /// Print directory names without a trailing `/`
    #[arg(long)]
    pub no_dir_slash: bool,

    /// Finish with a directory/file count
    #[arg(long, short = 's')]
    pub stats: bool,
}

impl TreeArgs {
    fn scan_options(&self, base: &ScanOptions) -> ScanOptions {
        let mut options = base.clone();
        if self.no_ignore {
            options.ignore.clear();
        }
        options.ignore.extend(self.ignore.iter().cloned());
        options.show_hidden |= self.all;
        options.dirs_only |= self.dirs_only;
        if let Some(level) = self.level {
            options.max_depth = Some(level);
        }
        if let Some(max) = self.max_files {
            options.max_entries = max;
        }
        options
    }
}

pub fn run(config: &TwigConfig, args: TreeArgs, json: bool) -> anyhow::Result<()> {
    let path = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
    let scanner = Scanner::new(args.scan_options(&config.scan))?;
    let outcome = scanner
        .scan(&path)
        .with_context(|| format!("failed to scan {}", path.display()))?;

    if json {
        println!("{}", format_json(&outcome.root)?);
    } else {
        let mut options = config.format;
        options.dir_slash &= !args.no_dir_slash;
        options.show_stats |= args.stats;
        print!("{}", format_tree(&outcome.root, &options));
    }
    Ok(())
}
