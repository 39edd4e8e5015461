use crate::error::Result;
use crate::node::Node;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Append `/` to directory names.
    #[serde(default = "default_true")]
    pub dir_slash: bool,
    #[serde(default = "default_true")]
    pub show_comments: bool,
    /// Finish with a `N directories, M files` line.
    #[serde(default)]
    pub show_stats: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            dir_slash: true,
            show_comments: true,
            show_stats: false,
        }
    }
}

/// Render `root` as tree text. The output parses back with
/// [`crate::parser::parse_str`].
pub fn format_tree(root: &Node, options: &FormatOptions) -> String {
    let mut out = String::new();
    write_entry(&mut out, root, options);
    write_children(&mut out, &root.children, "", options);

    if options.show_stats {
        let stats = root.stats();
        out.push('\n');
        out.push_str(&format!(
            "{} {}, {} {}\n",
            stats.dirs,
            plural(stats.dirs, "directory", "directories"),
            stats.files,
            plural(stats.files, "file", "files"),
        ));
    }
    out
}

fn write_children(out: &mut String, nodes: &[Node], prefix: &str, options: &FormatOptions) {
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i + 1 == nodes.len();
        out.push_str(prefix);
        out.push_str(if is_last { "└── " } else { "├── " });
        write_entry(out, node, options);

        if !node.children.is_empty() {
            let next = format!("{prefix}{}", if is_last { "    " } else { "│   " });
            write_children(out, &node.children, &next, options);
        }
    }
}

fn write_entry(out: &mut String, node: &Node, options: &FormatOptions) {
    out.push_str(&node.name);
    if node.is_dir && options.dir_slash {
        out.push('/');
    }
    if options.show_comments {
        if let Some(comment) = &node.comment {
            out.push_str("  # ");
            out.push_str(comment);
        }
    }
    out.push('\n');
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

/// One line per node path, depth first, directories with a trailing `/`.
pub fn format_paths(root: &Node) -> String {
    let mut out = String::new();
    for node in root.walk() {
        out.push_str(&node.path);
        if node.is_dir {
            out.push('/');
        }
        out.push('\n');
    }
    out
}

pub fn format_json(root: &Node) -> Result<String> {
    Ok(serde_json::to_string_pretty(root)?)
}
