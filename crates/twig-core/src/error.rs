use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TwigError {
    #[error("empty pattern")]
    EmptyPattern,

    #[error("empty brace content at position {position}")]
    EmptyBraceContent { position: usize },

    #[error("unmatched opening brace at position {position}")]
    UnmatchedOpenBrace { position: usize },

    #[error("empty brace content")]
    EmptyContent,

    #[error("unbalanced braces in content")]
    UnbalancedBraces,

    #[error("brace nesting exceeds maximum depth of {limit}")]
    MaxDepthExceeded { limit: usize },

    #[error("expansion exceeds maximum of {limit} results")]
    TooManyResults { limit: usize },

    #[error("empty tree structure")]
    EmptyInput,

    #[error("line {line}: empty node name")]
    EmptyNodeName { line: usize },

    #[error("line {line}: invalid tree structure")]
    InvalidStructure { line: usize },

    #[error("target directory already exists: {}", .0.display())]
    TargetExists(PathBuf),

    #[error("item already exists: {}", .0.display())]
    ItemExists(PathBuf),

    #[error("type mismatch at {}: expected {expected}, found {found}", .path.display())]
    TypeMismatch {
        path: PathBuf,
        expected: &'static str,
        found: &'static str,
    },

    #[error("path traversal detected: {0}")]
    PathTraversal(String),

    #[error("invalid characters in path: {0}")]
    InvalidCharacters(String),

    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("invalid ignore pattern {pattern:?}")]
    InvalidIgnorePattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TwigError>;
