//! Top-level literal-alternation specialization: every leaf alternative is a
//! plain literal run, no anchors. Flattened to a vector of literals and
//! matched with `aho-corasick` in one linear pass rather than a loop of
//! per-literal substring searches — multi-pattern search is the idiomatic
//! choice once a real crate for it is on hand.

use aho_corasick::AhoCorasick;

use crate::shape::{is_literal_with_escapes, split_top_level_alternation, strip_outer_group, unescape_literal};

pub(crate) struct LiteralAlternation {
    searcher: AhoCorasick,
}

impl std::fmt::Debug for LiteralAlternation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("LiteralAlternation").finish_non_exhaustive()
    }
}

impl LiteralAlternation {
    /// Recognize a top-level alternation (optionally grouped) whose every
    /// branch is a plain literal. Rejects anchors anywhere.
    pub fn try_build(pattern: &str) -> Option<LiteralAlternation> {
        let literals = collect_literals(pattern)?;
        if literals.len() < 2 {
            return None;
        }
        let searcher = AhoCorasick::new(literals).ok()?;
        Some(LiteralAlternation { searcher })
    }

    pub fn is_match(&self, text: &[u8]) -> bool {
        self.searcher.is_match(text)
    }
}

/// Flatten a pattern into its leaf literal branches, recursing one level
/// into parenthesized sub-alternations like `(a|b)`. Returns `None` if any
/// branch isn't a plain (possibly escaped) literal, or if the pattern
/// carries an anchor anywhere.
fn collect_literals(pattern: &str) -> Option<Vec<Vec<u8>>> {
    if pattern.contains('^') || pattern.contains('$') {
        return None;
    }
    let branches = split_top_level_alternation(pattern);
    let mut literals = Vec::with_capacity(branches.len());
    for b in &branches {
        let b = strip_outer_group(b);
        if b.contains('|') {
            literals.extend(collect_literals(b)?);
            continue;
        }
        if !is_literal_with_escapes(b) {
            return None;
        }
        literals.push(unescape_literal(b));
    }
    Some(literals)
}
