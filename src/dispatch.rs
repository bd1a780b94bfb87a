//! The compile-time dispatcher. Tries each specialization in the frozen
//! fixed priority order, falls through to the DFA and finally the
//! general automaton. First recognizer that accepts the pattern wins; the
//! match-time behavior is fixed from then on — there is no re-evaluation.

use crate::dfa::Dfa;
use crate::error::Error;
use crate::literal;
use crate::parser;
use crate::program::{GeneralHints, MatcherKind};
use crate::specialize::advanced_alt::AdvancedAlternation;
use crate::specialize::both_anchors::BothAnchors;
use crate::specialize::literal_alt::LiteralAlternation;
use crate::specialize::url_shape::UrlShape;

pub(crate) fn recognize(pattern: &str) -> Result<MatcherKind, Error> {
    if let Some(m) = BothAnchors::try_build(pattern) {
        log::debug!("quickrex: pattern {:?} compiled as both-anchors literal", pattern);
        return Ok(MatcherKind::BothAnchors(m));
    }
    if let Some(m) = UrlShape::try_build(pattern) {
        log::debug!("quickrex: pattern {:?} compiled as URL-shape", pattern);
        return Ok(MatcherKind::UrlShape(m));
    }
    if let Some(m) = LiteralAlternation::try_build(pattern) {
        log::debug!("quickrex: pattern {:?} compiled as literal alternation", pattern);
        return Ok(MatcherKind::LiteralAlternation(m));
    }
    if let Some(m) = AdvancedAlternation::try_build(pattern) {
        log::debug!("quickrex: pattern {:?} compiled as advanced alternation", pattern);
        return Ok(MatcherKind::AdvancedAlternation(m));
    }
    if let Some(m) = Dfa::try_build(pattern) {
        log::debug!("quickrex: pattern {:?} compiled as literal DFA", pattern);
        return Ok(MatcherKind::Dfa(m));
    }
    log::trace!("quickrex: pattern {:?} falling through to the general automaton", pattern);
    general(pattern)
}

fn general(pattern: &str) -> Result<MatcherKind, Error> {
    let automaton = parser::parse(pattern)?;
    let anchored_start = matches!(
        automaton.states[automaton.start],
        crate::automaton::State::StartAnchor { .. }
    );
    let (prefix_bytes, prefix_resume) = literal::literal_prefix(&automaton);
    let literal_prefix = literal::LiteralPrefix::new(prefix_bytes, prefix_resume);
    let first_byte = if literal_prefix.is_none() {
        literal::first_required_byte(&automaton)
    } else {
        None
    };
    log::trace!(
        "quickrex: general automaton hints for {:?}: anchored_start={} literal_prefix={} first_byte={}",
        pattern,
        anchored_start,
        hints_literal_prefix_len(&literal_prefix),
        first_byte.is_some(),
    );
    let hints = GeneralHints { anchored_start, literal_prefix, first_byte };
    Ok(MatcherKind::General { automaton, hints })
}

fn hints_literal_prefix_len(lp: &Option<literal::LiteralPrefix>) -> usize {
    lp.as_ref().map(|p| p.as_bytes().len()).unwrap_or(0)
}
