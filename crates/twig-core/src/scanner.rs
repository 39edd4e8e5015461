//! Builds a [`Node`] tree from a directory on disk, listing it the way
//! `tree` does: entries sorted by name, hidden and ignored names left out.
//!
//! Symlinks are listed as files and never followed.

use crate::error::{Result, TwigError};
use crate::node::Node;
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Names skipped unless the ignore list is replaced.
pub const DEFAULT_IGNORES: &[&str] = &[
    ".git",
    "node_modules",
    ".DS_Store",
    "__pycache__",
    "*.pyc",
    ".idea",
    ".vscode",
];

fn default_ignore() -> Vec<String> {
    DEFAULT_IGNORES.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Levels below the root to list; `None` lists everything.
    #[serde(default)]
    pub max_depth: Option<usize>,
    #[serde(default)]
    pub show_hidden: bool,
    /// Glob patterns matched against entry names.
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
    #[serde(default)]
    pub dirs_only: bool,
    /// Stop after this many entries (0 = unlimited).
    #[serde(default)]
    pub max_entries: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            show_hidden: false,
            ignore: default_ignore(),
            dirs_only: false,
            max_entries: 0,
        }
    }
}

#[derive(Debug)]
pub struct ScanOutcome {
    pub root: Node,
    /// `max_entries` was reached; `root` holds what was listed before that.
    pub truncated: bool,
    pub entries: usize,
}

#[derive(Debug, Clone)]
pub struct Scanner {
    options: ScanOptions,
    ignore: Vec<Pattern>,
}

impl Scanner {
    /// Fails if an ignore pattern is not a valid glob.
    pub fn new(options: ScanOptions) -> Result<Self> {
        let ignore = options
            .ignore
            .iter()
            .map(|p| compile_ignore(p))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { options, ignore })
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub fn scan(&self, path: &Path) -> Result<ScanOutcome> {
        let meta = match std::fs::metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TwigError::PathNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut root = Node::new(root_name(path), meta.is_dir());
        let mut entries = 0usize;
        let truncated = meta.is_dir() && self.scan_dir(path, &mut root, 0, &mut entries);
        root.assign_paths("");

        if truncated {
            tracing::warn!(limit = self.options.max_entries, "scan stopped at entry limit");
        }
        tracing::debug!(path = %path.display(), entries, "scanned directory");
        Ok(ScanOutcome {
            root,
            truncated,
            entries,
        })
    }

    /// Returns `true` once the entry limit is hit.
    fn scan_dir(&self, dir: &Path, parent: &mut Node, depth: usize, count: &mut usize) -> bool {
        if self.options.max_depth.is_some_and(|max| depth >= max) {
            return false;
        }

        let mut listing: Vec<_> = match std::fs::read_dir(dir) {
            Ok(rd) => rd.filter_map(|e| e.ok()).collect(),
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "skipping unreadable directory");
                return false;
            }
        };
        listing.sort_by_key(|e| e.file_name());

        for entry in listing {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !self.options.show_hidden && name.starts_with('.') {
                continue;
            }
            if self.is_ignored(&name) {
                continue;
            }
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            let is_dir = file_type.is_dir();
            if self.options.dirs_only && !is_dir {
                continue;
            }

            if self.options.max_entries > 0 && *count >= self.options.max_entries {
                return true;
            }
            *count += 1;

            let child = parent.add_child(Node::new(name, is_dir));
            if is_dir && self.scan_dir(&entry.path(), child, depth + 1, count) {
                return true;
            }
        }
        false
    }

    fn is_ignored(&self, name: &str) -> bool {
        self.ignore.iter().any(|p| p.matches(name))
    }
}

pub(crate) fn compile_ignore(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|source| TwigError::InvalidIgnorePattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Final component of the resolved path, so `.` lists under the directory's
/// real name.
fn root_name(path: &Path) -> String {
    let resolved = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| resolved.display().to_string())
}
