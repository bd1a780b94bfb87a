//! The compiled handle. Holds exactly one matcher branch, chosen once at
//! compile time by `dispatch::recognize`, plus whatever precomputed data
//! that branch needs. Nothing here allocates during `is_match`.

use crate::automaton::{Automaton, StateId};
use crate::dfa::Dfa;
use crate::dispatch;
use crate::error::Error;
use crate::literal::LiteralPrefix;
use crate::nfa::{self, Scratch};
use crate::specialize::advanced_alt::AdvancedAlternation;
use crate::specialize::both_anchors::BothAnchors;
use crate::specialize::literal_alt::LiteralAlternation;
use crate::specialize::url_shape::UrlShape;

/// Precomputed start-position hints attached to the general-automaton
/// branch.
pub(crate) struct GeneralHints {
    pub anchored_start: bool,
    pub literal_prefix: Option<LiteralPrefix>,
    pub first_byte: Option<(u8, StateId)>,
}

pub(crate) enum MatcherKind {
    BothAnchors(BothAnchors),
    UrlShape(UrlShape),
    LiteralAlternation(LiteralAlternation),
    AdvancedAlternation(AdvancedAlternation),
    Dfa(Dfa),
    General { automaton: Automaton, hints: GeneralHints },
}

/// A fully compiled pattern. Immutable after `compile` returns; safe to
/// share across threads matching distinct inputs, since every per-call
/// working set lives in a `Scratch` the caller owns, never on `Program`
/// itself (see the crate-level concurrency note).
pub(crate) struct Program {
    kind: MatcherKind,
    pattern: String,
}

impl Program {
    pub fn compile(pattern: &str) -> Result<Program, Error> {
        let kind = dispatch::recognize(pattern)?;
        Ok(Program { kind, pattern: pattern.to_string() })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Number of automaton states backing the general matcher, or 0 for any
    /// specialized branch — used to size a reusable `Scratch`.
    pub fn scratch_size(&self) -> usize {
        match &self.kind {
            MatcherKind::General { automaton, .. } => automaton.len(),
            _ => 0,
        }
    }

    pub fn is_match(&self, text: &[u8]) -> bool {
        let mut scratch = Scratch::new(self.scratch_size());
        self.is_match_with(&mut scratch, text)
    }

    pub fn is_match_with(&self, scratch: &mut Scratch, text: &[u8]) -> bool {
        match &self.kind {
            MatcherKind::BothAnchors(m) => m.is_match(text),
            MatcherKind::UrlShape(m) => m.is_match(text),
            MatcherKind::LiteralAlternation(m) => m.is_match(text),
            MatcherKind::AdvancedAlternation(m) => m.is_match(text),
            MatcherKind::Dfa(m) => m.is_match(text),
            MatcherKind::General { automaton, hints } => general_search(automaton, hints, scratch, text),
        }
    }
}

fn general_search(automaton: &Automaton, hints: &GeneralHints, scratch: &mut Scratch, text: &[u8]) -> bool {
    if hints.anchored_start {
        return nfa::is_match_anchored(automaton, scratch, text);
    }
    if let Some(lp) = &hints.literal_prefix {
        let mut start = 0;
        while let Some(off) = lp.find_from(text, start) {
            let after = off + lp.as_bytes().len();
            if nfa::is_match_from(automaton, scratch, text, lp.resume, after) {
                return true;
            }
            start = off + 1;
        }
        return false;
    }
    if let Some((byte, resume)) = hints.first_byte {
        let mut start = 0;
        while start <= text.len() {
            match memchr::memchr(byte, &text[start..]) {
                Some(rel) => {
                    let pos = start + rel;
                    if nfa::is_match_from(automaton, scratch, text, resume, pos + 1) {
                        return true;
                    }
                    start = pos + 1;
                }
                None => return false,
            }
        }
        return false;
    }
    nfa::is_match(automaton, scratch, text)
}
