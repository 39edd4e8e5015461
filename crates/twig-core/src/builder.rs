use crate::error::{Result, TwigError};
use crate::io;
use crate::node::Node;
use serde::{Deserialize, Serialize, Serializer};
use std::path::{Component, Path, PathBuf};

const INVALID_NAME_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

// ---------------------------------------------------------------------------
// BuildOptions / BuildReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Report what would be created without touching the filesystem.
    #[serde(default)]
    pub dry_run: bool,
    /// Replace existing files.
    #[serde(default)]
    pub overwrite: bool,
    /// Never modify existing entries; takes precedence over `overwrite`.
    #[serde(default)]
    pub skip_existing: bool,
    /// Fail before writing anything if any entry already exists.
    #[serde(default)]
    pub abort_on_conflict: bool,
}

#[derive(Debug, Default, Serialize)]
pub struct BuildReport {
    pub created: Vec<PathBuf>,
    pub overwritten: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    /// Per-entry failures; the build carries on past these.
    #[serde(serialize_with = "error_messages")]
    pub errors: Vec<TwigError>,
    pub dry_run: bool,
}

fn error_messages<S: Serializer>(errors: &[TwigError], s: S) -> std::result::Result<S::Ok, S::Error> {
    s.collect_seq(errors.iter().map(|e| e.to_string()))
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Creates the directories and files of a [`Node`] tree under a target
/// directory. The root node stands for the target itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Builder {
    options: BuildOptions,
}

impl Builder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    pub fn build(&self, root: &Node, target: &Path) -> Result<BuildReport> {
        let mut report = BuildReport {
            dry_run: self.options.dry_run,
            ..BuildReport::default()
        };

        if target.exists() && !target.is_dir() {
            return Err(TwigError::TargetExists(target.to_path_buf()));
        }
        if self.options.abort_on_conflict {
            if let Some(path) = first_conflict(root, target) {
                return Err(TwigError::ItemExists(path));
            }
        }
        if !self.options.dry_run {
            io::ensure_dir(target)?;
        }

        self.build_children(root, target, &mut report)?;

        tracing::info!(
            dir = %target.display(),
            created = report.created.len(),
            skipped = report.skipped.len(),
            errors = report.errors.len(),
            dry_run = self.options.dry_run,
            "build finished"
        );
        Ok(report)
    }

    fn build_children(&self, node: &Node, dir: &Path, report: &mut BuildReport) -> Result<()> {
        for child in &node.children {
            if let Err(e) = validate_name(&child.name) {
                report.errors.push(e);
                continue;
            }

            let path = dir.join(&child.name);
            // Links are never followed: a link to a directory could lead
            // outside the target.
            let existing = std::fs::symlink_metadata(&path).ok();

            if let Some(meta) = &existing {
                let is_link = meta.file_type().is_symlink();
                if is_link || meta.is_dir() != child.is_dir {
                    report.errors.push(TwigError::TypeMismatch {
                        path,
                        expected: kind(child.is_dir),
                        found: if is_link { "symlink" } else { kind(meta.is_dir()) },
                    });
                    continue;
                }
            }

            if child.is_dir {
                self.build_dir(child, path, existing.is_some(), report)?;
            } else {
                self.build_file(child, path, existing.is_some(), report);
            }
        }
        Ok(())
    }

    fn build_dir(&self, node: &Node, path: PathBuf, exists: bool, report: &mut BuildReport) -> Result<()> {
        if exists {
            if self.options.skip_existing {
                tracing::debug!(path = %path.display(), "skipped existing directory");
                report.skipped.push(path.clone());
            }
        } else {
            if !self.options.dry_run {
                if let Err(e) = io::ensure_dir(&path) {
                    report.errors.push(e);
                    return Ok(());
                }
            }
            tracing::info!(path = %path.display(), dry_run = self.options.dry_run, "created directory");
            report.created.push(path.clone());
        }
        self.build_children(node, &path, report)
    }

    fn build_file(&self, node: &Node, path: PathBuf, exists: bool, report: &mut BuildReport) {
        if exists && (self.options.skip_existing || !self.options.overwrite) {
            tracing::debug!(path = %path.display(), "skipped existing file");
            report.skipped.push(path);
            return;
        }

        if !self.options.dry_run {
            let seed = io::file_seed(node.comment.as_deref());
            if let Err(e) = io::atomic_write(&path, &seed) {
                report.errors.push(e);
                return;
            }
        }

        if exists {
            tracing::info!(path = %path.display(), dry_run = self.options.dry_run, "overwrote file");
            report.overwritten.push(path);
        } else {
            tracing::info!(path = %path.display(), dry_run = self.options.dry_run, "created file");
            report.created.push(path);
        }
    }
}

/// Directory named after the tree's root, relative to the working
/// directory. The root name comes from user input, so it gets the same
/// checks as every other entry.
pub fn default_target(root: &Node) -> Result<PathBuf> {
    validate_name(&root.name)?;
    Ok(PathBuf::from(&root.name))
}

/// First entry of the tree that already exists on disk, depth first.
fn first_conflict(node: &Node, dir: &Path) -> Option<PathBuf> {
    for child in &node.children {
        let path = dir.join(&child.name);
        if std::fs::symlink_metadata(&path).is_ok() {
            return Some(path);
        }
        if let Some(found) = first_conflict(child, &path) {
            return Some(found);
        }
    }
    None
}

fn kind(is_dir: bool) -> &'static str {
    if is_dir {
        "directory"
    } else {
        "file"
    }
}

/// Reject names that would leave their parent directory or that contain
/// characters unusable on common filesystems.
fn validate_name(name: &str) -> Result<()> {
    let escapes = Path::new(name).components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes || name.starts_with('\\') {
        return Err(TwigError::PathTraversal(name.to_string()));
    }
    if name.contains(INVALID_NAME_CHARS) {
        return Err(TwigError::InvalidCharacters(name.to_string()));
    }
    Ok(())
}
