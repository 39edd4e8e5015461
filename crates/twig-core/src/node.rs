use crate::error::{Result, TwigError};
use serde::{Deserialize, Serialize};

/// One entry of a directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    /// Slash-joined path from the root, root name included.
    pub path: String,
    pub is_dir: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

/// How a path without a trailing `/` is materialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeafKind {
    #[default]
    File,
    Dir,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TreeStats {
    pub dirs: usize,
    pub files: usize,
}

impl Node {
    pub fn new(name: impl Into<String>, is_dir: bool) -> Self {
        let name = name.into();
        Self {
            path: name.clone(),
            name,
            is_dir,
            comment: None,
            children: Vec::new(),
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Append `child` and return a handle to it.
    pub fn add_child(&mut self, child: Node) -> &mut Node {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Recompute `path` for this node and all descendants.
    pub fn assign_paths(&mut self, parent: &str) {
        self.path = if parent.is_empty() {
            self.name.clone()
        } else {
            format!("{parent}/{}", self.name)
        };
        let path = self.path.clone();
        for child in &mut self.children {
            child.assign_paths(&path);
        }
    }

    /// All nodes, depth first, starting with `self`.
    pub fn walk(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Count of descendants, `self` excluded.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        for node in self.walk().into_iter().skip(1) {
            if node.is_dir {
                stats.dirs += 1;
            } else {
                stats.files += 1;
            }
        }
        stats
    }

    /// Build a tree under a directory named `root_name` from slash-separated
    /// paths, merging shared prefixes.
    ///
    /// A path ending in `/` is a directory; otherwise its last segment is a
    /// file unless `leaf` is [`LeafKind::Dir`]. An entry used both as a file
    /// and as a parent becomes a directory. Absolute paths are rejected.
    pub fn from_paths<S: AsRef<str>>(root_name: &str, paths: &[S], leaf: LeafKind) -> Result<Node> {
        let mut root = Node::dir(root_name);

        for raw in paths {
            let raw: &str = raw.as_ref();
            if raw.starts_with('/') || raw.starts_with('\\') {
                return Err(TwigError::PathTraversal(raw.to_string()));
            }
            let trailing_dir = raw.ends_with('/');
            let segments: Vec<&str> = raw
                .split('/')
                .filter(|s| !s.is_empty() && *s != ".")
                .collect();

            let mut cursor = &mut root;
            for (i, segment) in segments.iter().enumerate() {
                let is_last = i + 1 == segments.len();
                let is_dir = !is_last || trailing_dir || leaf == LeafKind::Dir;

                let pos = cursor.children.iter().position(|c| c.name == *segment);
                cursor = match pos {
                    Some(pos) => {
                        let existing = &mut cursor.children[pos];
                        existing.is_dir |= is_dir;
                        existing
                    }
                    None => cursor.add_child(Node::new(*segment, is_dir)),
                };
            }
        }

        root.assign_paths("");
        Ok(root)
    }
}
