//! Brace expansion for path patterns.
//!
//! `docs/{guides,apis}` expands to `docs/guides` and `docs/apis`. Groups may
//! nest (`a/{b,c/{d,e}}`) and several groups multiply into their cartesian
//! product (`{a,b}/{c,d}` yields four paths).
//!
//! Only `{`, `}` and `,` are structural. An opening brace must always close;
//! a closing brace with no opener is kept as literal text.
//!
//! Results come out leftmost alternative first, depth first. Callers that
//! need a canonical order sort the output themselves.

use crate::error::{Result, TwigError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_DEPTH: usize = 64;
pub const DEFAULT_MAX_RESULTS: usize = 10_000;

// ---------------------------------------------------------------------------
// ExpandLimits
// ---------------------------------------------------------------------------

/// Resource guards for a single expansion call.
///
/// Expansion is combinatorial: every added sibling group multiplies the
/// output. Callers handling untrusted patterns should keep `max_results`
/// bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandLimits {
    /// Deepest brace nesting accepted.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Largest number of expanded strings, `0` for no limit.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

impl Default for ExpandLimits {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_results: default_max_results(),
        }
    }
}

impl ExpandLimits {
    pub fn unlimited_results(mut self) -> Self {
        self.max_results = 0;
        self
    }

    fn exceeds_results(&self, count: usize) -> bool {
        self.max_results != 0 && count > self.max_results
    }
}

// ---------------------------------------------------------------------------
// Brace locator / alternative splitter
// ---------------------------------------------------------------------------

/// Index of the `}` closing the `{` at `open`.
///
/// Returns `None` when `open` is out of range, does not point at `{`, or the
/// brace never closes.
pub fn find_matching_brace(pattern: &str, open: usize) -> Option<usize> {
    let bytes = pattern.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut depth = 1usize;
    for (idx, &b) in bytes.iter().enumerate().skip(open + 1) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split brace content into its top-level alternatives.
///
/// Commas inside nested groups do not split, and nested groups are returned
/// verbatim: `a,{b,c},d` gives `["a", "{b,c}", "d"]`.
pub fn split_alternatives(content: &str) -> Result<Vec<&str>> {
    if content.is_empty() {
        return Err(TwigError::EmptyContent);
    }

    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (idx, &b) in content.as_bytes().iter().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1).ok_or(TwigError::UnbalancedBraces)?;
            }
            b',' if depth == 0 => {
                parts.push(&content[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(TwigError::UnbalancedBraces);
    }
    parts.push(&content[start..]);
    Ok(parts)
}

/// Deepest `{` nesting in `pattern`. Stray `}` never drive the count negative.
fn nesting_depth(pattern: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    for b in pattern.bytes() {
        match b {
            b'{' => {
                depth += 1;
                max = max.max(depth);
            }
            b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

/// Check every group in `pattern` closes and is non-empty, reporting the
/// leftmost violation. `base` is the offset of `pattern` in the caller's
/// input. Recursion follows nesting, which is bounded by `max_depth`.
fn validate_groups(pattern: &str, base: usize) -> Result<()> {
    let mut cursor = 0usize;
    while let Some(rel) = pattern[cursor..].find('{') {
        let open = cursor + rel;
        let close = find_matching_brace(pattern, open).ok_or(TwigError::UnmatchedOpenBrace {
            position: base + open,
        })?;
        if close == open + 1 {
            return Err(TwigError::EmptyBraceContent {
                position: base + open,
            });
        }
        validate_groups(&pattern[open + 1..close], base + open + 1)?;
        cursor = close + 1;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Expander
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct Expander {
    limits: ExpandLimits,
}

impl Expander {
    pub fn new(limits: ExpandLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> ExpandLimits {
        self.limits
    }

    /// Expand every brace group in `pattern`.
    ///
    /// Fails without partial output on the first malformed group, or when
    /// either limit is exceeded.
    pub fn expand(&self, pattern: &str) -> Result<Vec<String>> {
        if pattern.is_empty() {
            return Err(TwigError::EmptyPattern);
        }
        if nesting_depth(pattern) > self.limits.max_depth {
            return Err(TwigError::MaxDepthExceeded {
                limit: self.limits.max_depth,
            });
        }
        validate_groups(pattern, 0)?;

        let mut results = Vec::new();
        // Work-list of partially expanded strings; the top is always the
        // leftmost unexpanded branch.
        let mut pending = vec![pattern.to_string()];

        while let Some(current) = pending.pop() {
            let Some(open) = current.find('{') else {
                results.push(current);
                if self.limits.exceeds_results(results.len()) {
                    return Err(TwigError::TooManyResults {
                        limit: self.limits.max_results,
                    });
                }
                continue;
            };

            // Substituted alternatives are balanced, so every group that
            // passed validate_groups still closes.
            let close = find_matching_brace(&current, open)
                .expect("brace groups are validated before expansion");
            let prefix = &current[..open];
            let suffix = &current[close + 1..];
            let alternatives = split_alternatives(&current[open + 1..close])?;

            // Every pending entry yields at least one result.
            if self
                .limits
                .exceeds_results(results.len() + pending.len() + alternatives.len())
            {
                return Err(TwigError::TooManyResults {
                    limit: self.limits.max_results,
                });
            }

            for alt in alternatives.iter().rev() {
                let mut combined = String::with_capacity(prefix.len() + alt.len() + suffix.len());
                combined.push_str(prefix);
                combined.push_str(alt);
                combined.push_str(suffix);
                pending.push(combined);
            }
        }

        tracing::debug!(pattern, count = results.len(), "expanded pattern");
        Ok(results)
    }

    /// Expand several patterns, concatenating results in input order.
    /// `max_results` applies to the combined output.
    pub fn expand_all<I, S>(&self, patterns: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut all = Vec::new();
        for pattern in patterns {
            let expanded = self.expand(pattern.as_ref())?;
            all.extend(expanded);
            if self.limits.exceeds_results(all.len()) {
                return Err(TwigError::TooManyResults {
                    limit: self.limits.max_results,
                });
            }
        }
        Ok(all)
    }
}

/// Expand `pattern` with the default limits.
pub fn expand(pattern: &str) -> Result<Vec<String>> {
    Expander::default().expand(pattern)
}
