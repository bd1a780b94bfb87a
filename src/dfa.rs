//! Trie-backed DFA for pure-literal and anchored literal-alternation
//! patterns: no `. * + ? [ ( )`, `|` only at top level, optional
//! leading `^` and trailing `$`.
//!
//! Each trie node is a DFA state with a 256-entry next-state table; there
//! is no backtracking and no epsilon closure, so this is strictly cheaper
//! than the general automaton for the shapes it covers.

use crate::shape::{is_literal_with_escapes, split_top_level_alternation, unescape_literal};

#[derive(Clone, Debug)]
pub(crate) struct DfaState {
    pub next: Box<[u32; 256]>,
    pub accept: bool,
}

const NO_STATE: u32 = u32::MAX;

#[derive(Clone, Debug)]
pub(crate) struct Dfa {
    pub states: Vec<DfaState>,
    pub anchored_start: bool,
    pub anchored_end: bool,
}

impl Dfa {
    fn new_state() -> DfaState {
        DfaState { next: Box::new([NO_STATE; 256]), accept: false }
    }

    /// Try to recognize `pattern` as a DFA-shape pattern and build its trie.
    /// Returns `None` if the pattern doesn't qualify.
    ///
    /// `^`/`$` are ordinary atoms scoped to the branch they appear in, not to
    /// the whole alternation (`A|B$` means `(A)|(B$)`), so anchors are read
    /// per branch, after splitting, never off the raw pattern as a whole. A
    /// single trie only has one pair of anchor flags to apply to every
    /// branch, so this recognizer only accepts the pattern when every
    /// branch's own anchors agree with the first branch's; anything mixed
    /// falls through to a matcher that can track each branch independently.
    pub fn try_build(pattern: &str) -> Option<Dfa> {
        let raw_branches = split_top_level_alternation(pattern);
        let (anchored_start, first_core, anchored_end) = crate::shape::strip_anchors(raw_branches[0]);
        let mut literals = Vec::with_capacity(raw_branches.len());
        literals.push(Self::literal_from_branch(first_core)?);
        for b in &raw_branches[1..] {
            let (start_anchored, core, end_anchored) = crate::shape::strip_anchors(b);
            if start_anchored != anchored_start || end_anchored != anchored_end {
                return None;
            }
            literals.push(Self::literal_from_branch(core)?);
        }

        let mut states = vec![Self::new_state()];
        for lit in &literals {
            let mut cur = 0usize;
            for &byte in lit {
                let next = states[cur].next[byte as usize];
                cur = if next == NO_STATE {
                    let id = states.len();
                    states.push(Self::new_state());
                    states[cur].next[byte as usize] = id as u32;
                    id
                } else {
                    next as usize
                };
            }
            states[cur].accept = true;
        }

        Some(Dfa { states, anchored_start, anchored_end })
    }

    /// Reject if this branch's anchor-stripped core is itself a parenthesized
    /// sub-alternation or contains metacharacters other than escapes.
    fn literal_from_branch(core: &str) -> Option<Vec<u8>> {
        if core.contains('(') || core.contains(')') {
            return None;
        }
        if !is_literal_with_escapes(core) {
            return None;
        }
        Some(unescape_literal(core))
    }

    fn walk_from(&self, text: &[u8], start: usize) -> bool {
        let mut cur = 0usize;
        let mut pos = start;
        loop {
            if self.states[cur].accept && (!self.anchored_end || pos == text.len()) {
                return true;
            }
            if pos >= text.len() {
                return false;
            }
            let next = self.states[cur].next[text[pos] as usize];
            if next == NO_STATE {
                return false;
            }
            cur = next as usize;
            pos += 1;
        }
    }

    pub fn is_match(&self, text: &[u8]) -> bool {
        if self.anchored_start {
            self.walk_from(text, 0)
        } else {
            (0..=text.len()).any(|start| self.walk_from(text, start))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_literal() {
        let dfa = Dfa::try_build("hello").unwrap();
        assert!(dfa.is_match(b"say hello there"));
        assert!(!dfa.is_match(b"say hallo there"));
    }

    #[test]
    fn anchored_literal_alternation() {
        let dfa = Dfa::try_build("^cat|^dog").unwrap();
        assert!(dfa.is_match(b"cat"));
        assert!(dfa.is_match(b"dogfish"));
        assert!(!dfa.is_match(b"xcat"));
    }

    #[test]
    fn rejects_metacharacters() {
        assert!(Dfa::try_build("h.llo").is_none());
        assert!(Dfa::try_build("(a|b)c").is_none());
        assert!(Dfa::try_build("a+").is_none());
    }

    #[test]
    fn rejects_mixed_per_branch_anchors() {
        // `^` and `$` are atoms scoped to their own branch (`A|B$` means
        // `(A)|(B$)`), not flags on the whole alternation — a single trie
        // can't represent that, so this must fall through rather than
        // silently forcing every branch to the same anchor.
        assert!(Dfa::try_build("cat|dog$").is_none());
        assert!(Dfa::try_build("^a|b|c$").is_none());
        assert!(Dfa::try_build("^cat|dog$").is_none());
    }

    #[test]
    fn end_anchor_requires_suffix_match() {
        let dfa = Dfa::try_build("foo$").unwrap();
        assert!(dfa.is_match(b"barfoo"));
        assert!(!dfa.is_match(b"foobar"));
    }
}
