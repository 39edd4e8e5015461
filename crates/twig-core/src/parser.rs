//! Parser for tree text, the drawing produced by `tree` and by
//! [`crate::formatter::format_tree`]:
//!
//! ```text
//! project/
//! ├── src/
//! │   ├── main.rs  # entry point
//! │   └── lib.rs
//! └── README.md
//! ```
//!
//! The first non-blank line names the root. Each following line is indented
//! by `│   ` or four spaces per level and introduced by `├── ` or `└── `
//! (ASCII `|-- ` and `` `-- `` work too). Runs of fewer than four spaces
//! before a glyph are ignored. A trailing `/` marks a directory;
//! a node that turns out to have children is a directory regardless. Text
//! after `#` is kept as the node's comment.

use crate::error::{Result, TwigError};
use crate::node::Node;
use std::io::BufRead;

#[derive(Debug, PartialEq, Eq)]
struct ParsedLine {
    level: usize,
    name: String,
    comment: Option<String>,
    is_dir: bool,
}

/// Parse tree text from a reader.
pub fn parse<R: BufRead>(reader: R) -> Result<Node> {
    // stack[0] is the root; stack[n] is the most recent node at level n - 1.
    let mut stack: Vec<Node> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = idx + 1;

        if line.trim().is_empty() {
            continue;
        }

        if stack.is_empty() {
            let (name, comment) = split_comment(line.trim());
            let (name, is_dir) = strip_dir_slash(name);
            if name.is_empty() {
                return Err(TwigError::EmptyNodeName { line: line_num });
            }
            let mut root = Node::new(name, is_dir);
            root.comment = comment;
            stack.push(root);
            continue;
        }

        let parsed = parse_line(&line).ok_or(TwigError::EmptyNodeName { line: line_num })?;

        // The parent sits at stack[level]; anything deeper is finished.
        if parsed.level >= stack.len() {
            return Err(TwigError::InvalidStructure { line: line_num });
        }
        close_to(&mut stack, parsed.level + 1);

        let mut node = Node::new(parsed.name, parsed.is_dir);
        node.comment = parsed.comment;
        stack.push(node);
    }

    close_to(&mut stack, 1);
    let mut root = stack.pop().ok_or(TwigError::EmptyInput)?;
    root.assign_paths("");
    tracing::debug!(root = %root.name, nodes = root.walk().len(), "parsed tree");
    Ok(root)
}

/// Parse tree text held in memory.
pub fn parse_str(content: &str) -> Result<Node> {
    parse(content.as_bytes())
}

/// Pop finished nodes into their parents until `len` entries remain.
fn close_to(stack: &mut Vec<Node>, len: usize) {
    while stack.len() > len.max(1) {
        let Some(node) = stack.pop() else { break };
        if let Some(parent) = stack.last_mut() {
            parent.is_dir = true;
            parent.children.push(node);
        }
    }
}

fn parse_line(line: &str) -> Option<ParsedLine> {
    let mut rest = line;
    let mut level = 0usize;

    loop {
        if let Some(r) = rest.strip_prefix("    ") {
            level += 1;
            rest = r;
            continue;
        }
        // Shorter runs of spaces are padding, e.g. a drawing pasted with a
        // two-space indent.
        let padded = skip_spaces(rest, 3);
        if let Some(r) = padded.strip_prefix('│').or_else(|| padded.strip_prefix('|')) {
            if !r.starts_with("--") {
                level += 1;
                rest = skip_spaces(r, 3);
                continue;
            }
        }
        if let Some(r) = ["├──", "└──", "|--", "`--"]
            .iter()
            .find_map(|branch| padded.strip_prefix(branch))
        {
            rest = r;
        }
        break;
    }

    let (name, comment) = split_comment(rest.trim());
    let (name, is_dir) = strip_dir_slash(name);
    if name.is_empty() {
        return None;
    }
    Some(ParsedLine {
        level,
        name: name.to_string(),
        comment,
        is_dir,
    })
}

/// Skip up to `max` spaces (regular or non-breaking).
fn skip_spaces(s: &str, max: usize) -> &str {
    let mut rest = s;
    for _ in 0..max {
        match rest.strip_prefix(' ').or_else(|| rest.strip_prefix('\u{a0}')) {
            Some(r) => rest = r,
            None => break,
        }
    }
    rest
}

fn split_comment(s: &str) -> (&str, Option<String>) {
    match s.split_once('#') {
        Some((name, comment)) => {
            let comment = comment.trim();
            let comment = (!comment.is_empty()).then(|| comment.to_string());
            (name.trim(), comment)
        }
        None => (s.trim(), None),
    }
}

fn strip_dir_slash(name: &str) -> (&str, bool) {
    match name.strip_suffix('/') {
        Some(stripped) => (stripped, true),
        None => (name, false),
    }
}
