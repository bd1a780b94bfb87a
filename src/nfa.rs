//! The general matcher: a two-set NFA simulation with position-aware
//! epsilon closure. This is the correctness floor every specialization is
//! checked against — it can execute any automaton this crate can compile,
//! and it never backtracks, so its worst-case cost is `O(states * |text|)`.
//!
//! Deduplication is a sparse set keyed by state id, rebuilt every step
//! (`clist`/`nlist`), the classic dense/sparse thread-list trick for
//! simulating an NFA without revisiting a state twice in one step,
//! generalized here to a boolean-only, byte-only automaton with no capture
//! bookkeeping.

use crate::automaton::{Automaton, State, StateId};

/// A step-local set of state ids with O(1) membership, insertion and clear.
/// Doesn't allocate after construction — `clear` just resets a length, it
/// never touches the backing storage.
struct SparseSet {
    dense: Vec<StateId>,
    sparse: Vec<usize>,
    len: usize,
}

impl SparseSet {
    fn with_capacity(n: usize) -> SparseSet {
        SparseSet { dense: vec![0; n], sparse: vec![0; n], len: 0 }
    }

    #[inline]
    fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    fn contains(&self, id: StateId) -> bool {
        let s = self.sparse[id];
        s < self.len && self.dense[s] == id
    }

    #[inline]
    fn insert(&mut self, id: StateId) {
        if self.contains(id) {
            return;
        }
        self.dense[self.len] = id;
        self.sparse[id] = self.len;
        self.len += 1;
    }
}

/// The two working sets a match call needs, plus a small epsilon-closure
/// work stack. Callers that match the same compiled pattern repeatedly
/// (see `Regex::is_match_with`) can keep one `Scratch` around and reuse it;
/// `is_match` allocates a fresh one per call for simplicity.
pub struct Scratch {
    clist: SparseSet,
    nlist: SparseSet,
    stack: Vec<StateId>,
}

impl Scratch {
    pub(crate) fn new(num_states: usize) -> Scratch {
        Scratch {
            clist: SparseSet::with_capacity(num_states),
            nlist: SparseSet::with_capacity(num_states),
            stack: Vec::new(),
        }
    }
}

/// Try every offset in `text`, in order, via continuous re-seeding (the
/// classic "prepend `.*?`" trick): a single O(states * |text|) pass that
/// covers every unanchored start position at once. This is the fallback
/// used when the pattern has no start anchor and no usable literal hint.
pub(crate) fn is_match(automaton: &Automaton, scratch: &mut Scratch, text: &[u8]) -> bool {
    run(automaton, scratch, text, automaton.start, 0, true)
}

/// Run the simulation seeded once at offset 0 and never re-seeded — for
/// patterns with a leading `^`, where only offset 0 can possibly match.
pub(crate) fn is_match_anchored(automaton: &Automaton, scratch: &mut Scratch, text: &[u8]) -> bool {
    run(automaton, scratch, text, automaton.start, 0, false)
}

/// Run the simulation seeded once at `from` and never re-seeded, entering
/// the automaton at `seed` rather than `automaton.start` — used to probe a
/// single candidate start position turned up by a literal-prefix or
/// first-byte scan (see `literal.rs`), resuming right after the bytes the
/// scan already confirmed rather than re-walking them through the NFA.
pub(crate) fn is_match_from(
    automaton: &Automaton,
    scratch: &mut Scratch,
    text: &[u8],
    seed: StateId,
    from: usize,
) -> bool {
    run(automaton, scratch, text, seed, from, false)
}

fn run(
    automaton: &Automaton,
    scratch: &mut Scratch,
    text: &[u8],
    seed: StateId,
    from: usize,
    reseed: bool,
) -> bool {
    scratch.clist.clear();
    scratch.nlist.clear();
    let text_len = text.len();
    let mut matched = false;
    let mut pos = from;

    loop {
        if scratch.clist.len == 0 {
            if matched || (!reseed && pos > from) {
                break;
            }
        }
        if scratch.clist.len == 0 || (reseed && !matched) {
            let from_state = if reseed { automaton.start } else { seed };
            closure(automaton, &mut scratch.clist, &mut scratch.stack, from_state, pos, text_len);
        }

        for i in 0..scratch.clist.len {
            let id = scratch.clist.dense[i];
            match automaton.states[id] {
                State::Accept => {
                    matched = true;
                    break;
                }
                State::Byte { byte, out } => {
                    if pos < text_len && text[pos] == byte {
                        closure(automaton, &mut scratch.nlist, &mut scratch.stack, out, pos + 1, text_len);
                    }
                }
                State::Any { out } => {
                    if pos < text_len {
                        closure(automaton, &mut scratch.nlist, &mut scratch.stack, out, pos + 1, text_len);
                    }
                }
                State::Class { ref class, out } => {
                    if pos < text_len && class.contains(text[pos]) {
                        closure(automaton, &mut scratch.nlist, &mut scratch.stack, out, pos + 1, text_len);
                    }
                }
                State::Split { .. } | State::StartAnchor { .. } | State::EndAnchor { .. } => {
                    unreachable!("epsilon states are expanded by closure(), never added to a thread list")
                }
            }
        }
        if matched || pos >= text_len {
            break;
        }
        pos += 1;
        std::mem::swap(&mut scratch.clist, &mut scratch.nlist);
        scratch.nlist.clear();
    }
    matched
}

/// Iterative epsilon closure: push `id` onto `set` (and anything reachable
/// from it through `Split`/anchors whose condition holds at `pos`), using
/// `stack` as an explicit worklist rather than recursion, so a pathological
/// chain of nested alternations can't blow the call stack.
fn closure(
    automaton: &Automaton,
    set: &mut SparseSet,
    stack: &mut Vec<StateId>,
    start: StateId,
    pos: usize,
    text_len: usize,
) {
    stack.clear();
    stack.push(start);
    while let Some(id) = stack.pop() {
        if set.contains(id) {
            continue;
        }
        set.insert(id);
        match automaton.states[id] {
            State::Split { out1, out2 } => {
                stack.push(out2);
                stack.push(out1);
            }
            State::StartAnchor { out } => {
                if pos == 0 {
                    stack.push(out);
                }
            }
            State::EndAnchor { out } => {
                if pos == text_len {
                    stack.push(out);
                }
            }
            State::Byte { .. } | State::Any { .. } | State::Class { .. } | State::Accept => {}
        }
    }
}
